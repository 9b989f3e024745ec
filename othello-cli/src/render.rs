//! 文本棋盘

use std::fmt::Write;

use othello_core::{BoardState, Cell, Position, Side, BOARD_SIZE};

/// 黑子
pub const BLACK_STONE: char = '●';
/// 白子
pub const WHITE_STONE: char = '○';
/// 合法落子提示
pub const HINT_MARK: char = '*';
/// 空格
pub const EMPTY_MARK: char = '.';

/// 棋子符号
pub fn stone(side: Side) -> char {
    match side {
        Side::Black => BLACK_STONE,
        Side::White => WHITE_STONE,
    }
}

/// 阵营中文名
pub fn side_label(side: Side) -> &'static str {
    match side {
        Side::Black => "黑方",
        Side::White => "白方",
    }
}

/// 纯文本棋盘渲染
pub struct TextBoard;

impl TextBoard {
    /// 渲染棋盘，`hints` 中的空格标为 `*`
    pub fn render(state: &BoardState, hints: &[Position]) -> String {
        let cells = state.board().cells();
        let mut out = String::new();

        out.push_str("   ");
        for col in 0..BOARD_SIZE {
            out.push(' ');
            out.push((b'A' + col as u8) as char);
        }
        out.push('\n');

        for row in 0..BOARD_SIZE {
            let _ = write!(out, "{:>2} ", row + 1);
            for col in 0..BOARD_SIZE {
                let pos = Position::new_unchecked(row as u8, col as u8);
                let mark = match cells[pos.to_index()] {
                    Cell::Black => BLACK_STONE,
                    Cell::White => WHITE_STONE,
                    Cell::Empty if hints.contains(&pos) => HINT_MARK,
                    Cell::Empty => EMPTY_MARK,
                };
                out.push(' ');
                out.push(mark);
            }
            out.push('\n');
        }

        out
    }

    /// 比分行
    pub fn score_line(state: &BoardState) -> String {
        let score = state.score();
        format!(
            "{} {} {}  {} {} {}",
            side_label(Side::Black),
            BLACK_STONE,
            score.black,
            side_label(Side::White),
            WHITE_STONE,
            score.white
        )
    }
}
