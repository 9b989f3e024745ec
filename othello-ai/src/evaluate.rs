//! 落子评估函数

use othello_core::{Board, BoardState, Cell, MoveRules, Position};

/// 评估器
pub struct Evaluator;

/// 位置分值
mod position_weights {
    /// 角
    pub const CORNER: i32 = 100;
    /// 紧邻角的格子（送角位）
    pub const CORNER_ADJACENT: i32 = -50;
    /// 边（与角加成叠加）
    pub const EDGE: i32 = 20;
    /// 每多一子的加成
    pub const PER_PIECE: i32 = 2;

    /// 十二个紧邻角的格子 (row, col)
    pub const CORNER_ADJACENT_CELLS: [(u8, u8); 12] = [
        (0, 1), (1, 0), (1, 1),
        (0, 6), (1, 6), (1, 7),
        (6, 0), (6, 1), (7, 1),
        (6, 6), (6, 7), (7, 6),
    ];
}

impl Evaluator {
    /// 评估当前走子方在 pos 落子的价值
    ///
    /// 在局面副本上模拟，不改动传入的局面。子数项为落子前后本方子数差的两倍，
    /// 即 `2 × (翻子数 + 1)`，落下的那颗子也计入。
    pub fn score_move(state: &BoardState, pos: Position) -> i32 {
        let mover = Cell::from(state.current_turn());
        let before = state.count(mover) as i32;

        let mut simulated = *state;
        // 非法落子时副本不变，子数项为 0
        let _ = MoveRules::apply_move(&mut simulated, pos);
        let after = simulated.count(mover) as i32;

        Self::position_bonus(pos) + position_weights::PER_PIECE * (after - before)
    }

    /// 位置加成：角、送角位和边
    pub fn position_bonus(pos: Position) -> i32 {
        let mut bonus = 0;

        if pos.is_corner() {
            bonus += position_weights::CORNER;
        }
        if Self::is_corner_adjacent(pos) {
            bonus += position_weights::CORNER_ADJACENT;
        }
        if pos.is_edge() {
            bonus += position_weights::EDGE;
        }

        bonus
    }

    /// 是否为紧邻角的格子
    pub fn is_corner_adjacent(pos: Position) -> bool {
        position_weights::CORNER_ADJACENT_CELLS.contains(&(pos.row(), pos.col()))
    }

    /// 子力差：白子数减黑子数
    ///
    /// 与 AI 执哪一方无关，困难难度的极小极大值始终按这个方向计算。
    pub fn material(board: &Board) -> i32 {
        board.count(Cell::White) as i32 - board.count(Cell::Black) as i32
    }
}
