//! 黑白棋 AI 引擎
//!
//! 包含:
//! - 落子评估函数
//! - 三档难度的搜索 AI（随机 / 贪心 / 两层极小极大）
//! - 外部走法预测器适配（失败时回退到随机合法落子）

mod error;
mod evaluate;
pub mod predictor;
mod search;

pub use error::PredictorError;
pub use evaluate::Evaluator;
pub use search::{AiConfig, AiEngine, Difficulty};
