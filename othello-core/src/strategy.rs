//! 走法选择策略接口
//!
//! 本地搜索 AI 和外部预测器都实现同一个接口，引擎不关心具体来源。

use crate::board::BoardState;
use crate::moves::MoveRules;
use crate::piece::Position;

/// 走法选择策略
pub trait MoveStrategy {
    /// 策略名称（用于日志和错误信息）
    fn name(&self) -> &str;

    /// 根据当前局面和历史落子选择走法
    ///
    /// 无合法落子时返回 None，由调用方按弃权处理。
    fn choose_move(&mut self, state: &BoardState, history: &[Position]) -> Option<Position>;
}

/// 总是选择第一个合法落子（行优先），用于测试和演示
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstLegalMove;

impl MoveStrategy for FirstLegalMove {
    fn name(&self) -> &str {
        "first-legal"
    }

    fn choose_move(&mut self, state: &BoardState, _history: &[Position]) -> Option<Position> {
        MoveRules::legal_moves(state).into_iter().next()
    }
}
