//! 错误类型定义

use thiserror::Error;

/// 黑白棋规则错误
///
/// 所有错误都是可恢复的：调用方（输入适配器或 AI 调度）负责重试，
/// 被拒绝的操作不会修改棋局。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OthelloError {
    /// 坐标超出 0-7 范围
    #[error("Invalid position: ({row}, {col})")]
    InvalidPosition { row: i32, col: i32 },

    /// 坐标合法，但格子已被占用或任何方向都无法翻子
    #[error("Illegal move at ({row}, {col})")]
    IllegalMove { row: u8, col: u8 },

    /// 无法解析的坐标记法（如 "Z9"）
    #[error("Invalid notation: {input:?}")]
    InvalidNotation { input: String },

    /// 无效的棋盘布局字符串
    #[error("Invalid layout: {reason}")]
    InvalidLayout { reason: String },

    /// 当前方仍有合法落子，不能弃权
    #[error("Pass is not allowed while legal moves exist")]
    PassNotAllowed,

    /// 策略没有给出走法
    #[error("Strategy {strategy} returned no move")]
    StrategyNoMove { strategy: String },

    /// 游戏已结束
    #[error("Game is already over")]
    GameOver,
}

/// 规则操作结果类型
pub type Result<T> = std::result::Result<T, OthelloError>;
