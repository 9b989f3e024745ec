//! 黑白棋规则库
//!
//! 包含:
//! - 棋子、棋盘、位置等核心数据结构
//! - 落子规则、翻子和弃权
//! - 对局引擎（回合推进、历史、悔棋）
//! - 走法选择策略接口 (MoveStrategy)
//! - 坐标记法、布局字符串和 JSON 棋谱

mod board;
mod constants;
mod error;
mod game;
mod layout;
mod moves;
mod notation;
mod piece;
mod record;
mod strategy;

pub use board::{Board, BoardState, GameResult, Score};
pub use constants::*;
pub use error::{OthelloError, Result};
pub use game::{Game, MoveOutcome, Ply, TurnOutcome, TurnStatus};
pub use layout::{Layout, INITIAL_LAYOUT};
pub use moves::MoveRules;
pub use notation::Notation;
pub use piece::{Cell, Position, Side};
pub use record::{GameMetadata, GameRecord, MoveRecord, RECORD_VERSION};
pub use strategy::{FirstLegalMove, MoveStrategy};
