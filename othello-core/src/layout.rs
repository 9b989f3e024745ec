//! 棋盘布局字符串解析和生成
//!
//! 格式：`<棋盘> <走子方>`，仿照 FEN：
//! - 棋盘按行从第 1 行（row 0）到第 8 行（row 7），用 `/` 分隔
//! - `B` 为黑子、`W` 为白子，数字表示连续空格数
//! - 走子方 `b` / `w`，省略时为黑方
//!
//! 示例（初始局面）：`8/8/8/3WB3/3BW3/8/8/8 b`

use crate::board::{Board, BoardState};
use crate::constants::BOARD_SIZE;
use crate::error::{OthelloError, Result};
use crate::piece::{Cell, Position, Side};

/// 初始局面布局
pub const INITIAL_LAYOUT: &str = "8/8/8/3WB3/3BW3/8/8/8 b";

/// 布局字符串处理
pub struct Layout;

impl Layout {
    /// 解析布局字符串为棋局状态
    pub fn parse(layout: &str) -> Result<BoardState> {
        let parts: Vec<&str> = layout.split_whitespace().collect();
        if parts.is_empty() {
            return Err(OthelloError::InvalidLayout {
                reason: "Empty layout string".to_string(),
            });
        }

        let board = Self::parse_board(parts[0])?;

        let current_turn = match parts.get(1) {
            Some(side) => {
                let mut chars = side.chars();
                match (chars.next().and_then(Side::from_layout_char), chars.next()) {
                    (Some(side), None) => side,
                    _ => {
                        return Err(OthelloError::InvalidLayout {
                            reason: format!("Invalid side: {}", side),
                        })
                    }
                }
            }
            None => Side::Black,
        };

        Ok(BoardState::from_board(board, current_turn))
    }

    /// 解析棋盘部分
    fn parse_board(board_str: &str) -> Result<Board> {
        let mut board = Board::empty();
        let rows: Vec<&str> = board_str.split('/').collect();

        if rows.len() != BOARD_SIZE {
            return Err(OthelloError::InvalidLayout {
                reason: format!("Expected {} rows, got {}", BOARD_SIZE, rows.len()),
            });
        }

        for (row_idx, row) in rows.iter().enumerate() {
            let mut col = 0usize;

            for c in row.chars() {
                if col >= BOARD_SIZE {
                    return Err(OthelloError::InvalidLayout {
                        reason: format!("Row {} has too many columns", row_idx + 1),
                    });
                }

                if let Some(empty_count) = c.to_digit(10) {
                    if empty_count == 0 {
                        return Err(OthelloError::InvalidLayout {
                            reason: format!("Row {} has a zero-length gap", row_idx + 1),
                        });
                    }
                    col += empty_count as usize;
                } else if let Some(cell) = Cell::from_layout_char(c) {
                    board.set(Position::new_unchecked(row_idx as u8, col as u8), cell);
                    col += 1;
                } else {
                    return Err(OthelloError::InvalidLayout {
                        reason: format!("Invalid stone character: {}", c),
                    });
                }
            }

            if col != BOARD_SIZE {
                return Err(OthelloError::InvalidLayout {
                    reason: format!("Row {} has {} columns, expected {}", row_idx + 1, col, BOARD_SIZE),
                });
            }
        }

        Ok(board)
    }

    /// 将棋局状态转换为布局字符串
    pub fn to_string(state: &BoardState) -> String {
        format!(
            "{} {}",
            Self::board_to_string(state.board()),
            state.current_turn().to_layout_char()
        )
    }

    /// 将棋盘转换为布局的棋盘部分
    pub fn board_to_string(board: &Board) -> String {
        let mut rows = Vec::with_capacity(BOARD_SIZE);

        for cells in board.rows() {
            let mut row = String::new();
            let mut empty_count = 0;

            for cell in cells {
                match cell.to_layout_char() {
                    Some(c) => {
                        if empty_count > 0 {
                            row.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        row.push(c);
                    }
                    None => empty_count += 1,
                }
            }

            if empty_count > 0 {
                row.push_str(&empty_count.to_string());
            }

            rows.push(row);
        }

        rows.join("/")
    }
}
