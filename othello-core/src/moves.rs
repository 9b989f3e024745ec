//! 落子合法性判定与翻子

use crate::board::BoardState;
use crate::constants::DIRECTIONS;
use crate::error::{OthelloError, Result};
use crate::piece::{Cell, Position, Side};

/// 规则函数集合
///
/// 全部是纯函数，唯一会修改状态的是 [`MoveRules::apply_move`] 和 [`MoveRules::pass`]。
pub struct MoveRules;

impl MoveRules {
    /// 从 `pos` 沿 `dir` 方向能否夹住对方棋子
    ///
    /// 第一个格子必须是对方棋子，连续的对方棋子之后必须紧跟己方棋子；
    /// 走出棋盘或遇到空格都算失败。
    pub fn can_flip(state: &BoardState, pos: Position, dir: (i8, i8)) -> bool {
        Self::flip_line(state, pos, dir).is_some()
    }

    /// 沿某一方向会被翻转的棋子，无法翻子时返回 None
    fn flip_line(state: &BoardState, pos: Position, (dr, dc): (i8, i8)) -> Option<Vec<Position>> {
        let me = Cell::from(state.current_turn());
        let opp = Cell::from(state.current_turn().opponent());
        let board = state.board();

        let mut line = Vec::new();
        let mut current = pos.offset(dr, dc)?;
        while board.get(current) == opp {
            line.push(current);
            current = current.offset(dr, dc)?;
        }

        if board.get(current) == me && !line.is_empty() {
            Some(line)
        } else {
            None
        }
    }

    /// 当前走子方在 `pos` 落子是否合法
    pub fn is_legal_move(state: &BoardState, pos: Position) -> bool {
        if !pos.is_valid() || !state.board().get(pos).is_empty() {
            return false;
        }

        DIRECTIONS
            .iter()
            .any(|&dir| Self::can_flip(state, pos, dir))
    }

    /// 当前走子方的全部合法落子（行优先顺序）
    pub fn legal_moves(state: &BoardState) -> Vec<Position> {
        Position::all()
            .filter(|&pos| Self::is_legal_move(state, pos))
            .collect()
    }

    /// 指定阵营是否有合法落子（不修改 `state`）
    pub fn has_legal_move(state: &BoardState, side: Side) -> bool {
        let view = state.with_turn(side);
        Position::all().any(|pos| Self::is_legal_move(&view, pos))
    }

    /// 在 `pos` 落子会翻转的全部棋子（非法落子返回空列表）
    pub fn flips(state: &BoardState, pos: Position) -> Vec<Position> {
        if !pos.is_valid() || !state.board().get(pos).is_empty() {
            return Vec::new();
        }

        DIRECTIONS
            .iter()
            .filter_map(|&dir| Self::flip_line(state, pos, dir))
            .flatten()
            .collect()
    }

    /// 执行落子：放子、翻子、切换走子方
    ///
    /// 越界返回 `InvalidPosition`，非法落子返回 `IllegalMove`，两种情况状态都保持不变。
    /// 翻子列表在写入前一次性收集，写入不会影响其他方向的扫描。
    pub fn apply_move(state: &mut BoardState, pos: Position) -> Result<Vec<Position>> {
        let pos = pos.validate()?;
        if !Self::is_legal_move(state, pos) {
            return Err(OthelloError::IllegalMove {
                row: pos.row(),
                col: pos.col(),
            });
        }

        let flipped = Self::flips(state, pos);
        let me = Cell::from(state.current_turn());

        let board = state.board_mut();
        board.set(pos, me);
        for &p in &flipped {
            board.set(p, me);
        }
        state.switch_turn();

        Ok(flipped)
    }

    /// 按行列坐标落子，越界返回 `InvalidPosition`
    pub fn apply_move_at(state: &mut BoardState, row: i32, col: i32) -> Result<Vec<Position>> {
        let pos = Position::checked(row, col)?;
        Self::apply_move(state, pos)
    }

    /// 强制弃权：只切换走子方，不修改棋盘
    pub fn pass(state: &mut BoardState) {
        state.switch_turn();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Layout;

    fn pos(row: u8, col: u8) -> Position {
        Position::new_unchecked(row, col)
    }

    #[test]
    fn test_initial_legal_moves() {
        let state = BoardState::initial();
        let moves = MoveRules::legal_moves(&state);

        // D3, C4, F5, E6
        assert_eq!(moves, vec![pos(2, 3), pos(3, 2), pos(4, 5), pos(5, 4)]);
    }

    #[test]
    fn test_apply_d3() {
        let mut state = BoardState::initial();
        let flipped = MoveRules::apply_move(&mut state, pos(2, 3)).unwrap();

        assert_eq!(flipped, vec![pos(3, 3)]);
        assert_eq!(state.board().get(pos(2, 3)), Cell::Black);
        assert_eq!(state.board().get(pos(3, 3)), Cell::Black);
        assert_eq!(state.count_pieces(Side::Black), 4);
        assert_eq!(state.count_pieces(Side::White), 1);
        assert_eq!(state.current_turn(), Side::White);
    }

    #[test]
    fn test_illegal_move_leaves_state_unchanged() {
        let mut state = BoardState::initial();
        let before = state;

        for _ in 0..2 {
            let err = MoveRules::apply_move(&mut state, pos(0, 0)).unwrap_err();
            assert_eq!(err, OthelloError::IllegalMove { row: 0, col: 0 });
            assert_eq!(state, before);
        }
    }

    #[test]
    fn test_occupied_cell_is_illegal() {
        let mut state = BoardState::initial();
        assert!(!MoveRules::is_legal_move(&state, pos(3, 3)));
        assert!(MoveRules::apply_move(&mut state, pos(3, 3)).is_err());
    }

    #[test]
    fn test_empty_cell_without_flip_is_illegal() {
        // 紧邻对方棋子但另一端没有己方棋子
        let state = BoardState::initial();
        assert!(state.board().get(pos(2, 2)).is_empty());
        assert!(!MoveRules::is_legal_move(&state, pos(2, 2)));
        assert!(MoveRules::flips(&state, pos(2, 2)).is_empty());
    }

    #[test]
    fn test_out_of_range_is_invalid_position() {
        let mut state = BoardState::initial();
        let err = MoveRules::apply_move_at(&mut state, 8, 0).unwrap_err();
        assert_eq!(err, OthelloError::InvalidPosition { row: 8, col: 0 });

        let err = MoveRules::apply_move_at(&mut state, 0, 0).unwrap_err();
        assert_eq!(err, OthelloError::IllegalMove { row: 0, col: 0 });
        assert_eq!(state, BoardState::initial());
    }

    #[test]
    fn test_unchecked_out_of_range_is_invalid_position() {
        let mut state = BoardState::initial();

        for (row, col) in [(9, 0), (0, 8), (255, 255)] {
            let err = MoveRules::apply_move(&mut state, Position::new_unchecked(row, col)).unwrap_err();
            assert_eq!(
                err,
                OthelloError::InvalidPosition {
                    row: row as i32,
                    col: col as i32
                }
            );
        }
        assert_eq!(state, BoardState::initial());
    }

    #[test]
    fn test_played_cell_not_in_next_legal_moves() {
        let mut state = BoardState::initial();
        MoveRules::apply_move(&mut state, pos(2, 3)).unwrap();
        assert!(!MoveRules::legal_moves(&state).contains(&pos(2, 3)));
    }

    #[test]
    fn test_can_flip_requires_own_terminator() {
        // 黑方在 A1，向右是两颗白子后接空格：不能翻
        let state = Layout::parse("1WW5/8/8/8/8/8/8/7B b").unwrap();
        assert!(!MoveRules::can_flip(&state, pos(0, 0), (0, 1)));

        // 两颗白子后接黑子：可以翻
        let state = Layout::parse("1WWB4/8/8/8/8/8/8/8 b").unwrap();
        assert!(MoveRules::can_flip(&state, pos(0, 0), (0, 1)));
        assert!(!MoveRules::can_flip(&state, pos(0, 0), (1, 0)));
    }

    #[test]
    fn test_multi_direction_flip() {
        // A1 落黑子，同时翻转横向与斜向
        let state = Layout::parse("1WB5/1W6/2B5/8/8/8/8/8 b").unwrap();
        let mut next = state;
        let flipped = MoveRules::apply_move(&mut next, pos(0, 0)).unwrap();

        assert_eq!(flipped.len(), 2);
        assert!(flipped.contains(&pos(0, 1)));
        assert!(flipped.contains(&pos(1, 1)));
        assert_eq!(next.count_pieces(Side::Black), 5);
        assert_eq!(next.count_pieces(Side::White), 0);
    }

    #[test]
    fn test_flips_collected_per_direction() {
        // D4 落黑子：左、右、下三条线各翻一颗
        let state = Layout::parse("8/8/8/1BW1WB2/3W4/3B4/8/8 b").unwrap();
        let mut next = state;
        let flipped = MoveRules::apply_move(&mut next, pos(3, 3)).unwrap();

        assert_eq!(flipped, vec![pos(3, 2), pos(3, 4), pos(4, 3)]);
        assert_eq!(next.count_pieces(Side::Black), 7);
        assert_eq!(next.count_pieces(Side::White), 0);
    }

    #[test]
    fn test_pass_only_switches_turn() {
        let mut state = BoardState::initial();
        let board = *state.board();
        MoveRules::pass(&mut state);

        assert_eq!(state.current_turn(), Side::White);
        assert_eq!(*state.board(), board);
    }

    #[test]
    fn test_has_legal_move_does_not_mutate() {
        let state = BoardState::initial();
        assert!(MoveRules::has_legal_move(&state, Side::White));
        assert_eq!(state.current_turn(), Side::Black);
    }
}
