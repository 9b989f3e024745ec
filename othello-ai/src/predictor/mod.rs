//! 外部走法预测器
//!
//! 预测器只需回答"给定落子历史，下一手下在哪里"。模型本身不在本库中，
//! 启用 `remote` feature 后可通过 HTTP 调用预测服务。

mod client;
mod engine;
mod parser;

use othello_core::Position;

use crate::error::PredictorError;

pub use client::{HttpPredictor, PredictorConfig};
pub use engine::{AiBackend, PredictorEngine, PredictorStats};
pub use parser::{MoveToken, PredictionParser, RawPrediction};

/// 走法预测器
pub trait MovePredictor {
    /// 预测器名称（用于日志）
    fn name(&self) -> &str;

    /// 根据落子历史（不含弃权）预测下一手
    fn predict(&mut self, history: &[Position]) -> Result<Position, PredictorError>;
}
