//! 坐标记法
//!
//! 两种编码在所有跨边界的地方都要支持：
//! - 代数记法：列字母 A-H 对应 0-7，行数字 1-8 对应 0-7，大小写不敏感（如 `D3`）
//! - 线性索引：`row * 8 + col`（0-63）
//!
//! 棋谱（transcript）把代数记法首尾相连，如锦标赛记录中的 `f5d6c3d3c4`。

use std::str::FromStr;

use crate::constants::{BOARD_SIZE, NUM_SQUARES};
use crate::error::{OthelloError, Result};
use crate::piece::Position;

/// 坐标记法
pub struct Notation;

impl Notation {
    /// 解析代数记法，如 "D3" / "d3"
    pub fn parse(input: &str) -> Result<Position> {
        let invalid = || OthelloError::InvalidNotation {
            input: input.to_string(),
        };

        let trimmed = input.trim();
        let mut chars = trimmed.chars();
        let (Some(letter), Some(digit), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(invalid());
        };

        let col = match letter.to_ascii_uppercase() {
            c @ 'A'..='H' => c as u8 - b'A',
            _ => return Err(invalid()),
        };
        let row = match digit.to_digit(10) {
            Some(d) if (1..=BOARD_SIZE as u32).contains(&d) => (d - 1) as u8,
            _ => return Err(invalid()),
        };

        Ok(Position::new_unchecked(row, col))
    }

    /// 解析线性索引（0-63）
    pub fn parse_index(input: &str) -> Result<Position> {
        input
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|&index| index < NUM_SQUARES)
            .and_then(Position::from_index)
            .ok_or_else(|| OthelloError::InvalidNotation {
                input: input.to_string(),
            })
    }

    /// 两种编码都接受：先尝试代数记法，再尝试线性索引
    pub fn parse_any(input: &str) -> Result<Position> {
        Self::parse(input).or_else(|_| Self::parse_index(input))
    }

    /// 转换为代数记法（大写）
    pub fn to_algebraic(pos: Position) -> String {
        pos.to_string()
    }

    /// 解析棋谱，如 "f5d6c3"；允许中间有空白
    pub fn parse_transcript(transcript: &str) -> Result<Vec<Position>> {
        let compact: Vec<char> = transcript.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.len() % 2 != 0 {
            return Err(OthelloError::InvalidNotation {
                input: transcript.to_string(),
            });
        }

        compact
            .chunks(2)
            .map(|pair| Self::parse(&pair.iter().collect::<String>()))
            .collect()
    }

    /// 生成棋谱（小写，锦标赛记录习惯）
    pub fn to_transcript(moves: &[Position]) -> String {
        moves
            .iter()
            .map(|pos| pos.to_string().to_ascii_lowercase())
            .collect()
    }
}

impl FromStr for Position {
    type Err = OthelloError;

    fn from_str(s: &str) -> Result<Self> {
        Notation::parse_any(s)
    }
}
