//! 预测器错误类型

use othello_core::Position;
use thiserror::Error;

/// 外部预测器错误
///
/// 这些错误都不会中断对局：`PredictorEngine` 记录警告后改走随机合法落子。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PredictorError {
    #[error("Predictor unavailable: {0}")]
    Unavailable(String),

    #[error("Predicted move {position} is not legal")]
    InvalidMove { position: Position },

    #[error("Malformed prediction: {0}")]
    Malformed(String),
}
