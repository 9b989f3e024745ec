//! 棋子、格子与坐标定义

use serde::{Deserialize, Serialize};

use crate::constants::{BOARD_SIZE, NUM_SQUARES};
use crate::error::{OthelloError, Result};

/// 阵营
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// 黑方（先手，对应 PlayerA）
    Black,
    /// 白方（后手，对应 PlayerB）
    White,
}

impl Side {
    /// 获取对方阵营
    pub fn opponent(&self) -> Side {
        match self {
            Side::Black => Side::White,
            Side::White => Side::Black,
        }
    }

    /// 获取布局字符
    pub fn to_layout_char(&self) -> char {
        match self {
            Side::Black => 'b',
            Side::White => 'w',
        }
    }

    /// 从布局字符解析
    pub fn from_layout_char(c: char) -> Option<Side> {
        match c {
            'b' | 'B' => Some(Side::Black),
            'w' | 'W' => Some(Side::White),
            _ => None,
        }
    }

    /// 显示名称
    pub fn name(&self) -> &'static str {
        match self {
            Side::Black => "Black",
            Side::White => "White",
        }
    }
}

/// 格子状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// 空格
    #[default]
    Empty,
    /// 黑子
    Black,
    /// 白子
    White,
}

impl Cell {
    /// 格子上棋子所属阵营，空格返回 None
    pub fn side(&self) -> Option<Side> {
        match self {
            Cell::Empty => None,
            Cell::Black => Some(Side::Black),
            Cell::White => Some(Side::White),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// 获取布局字符（空格没有字符，布局里用数字表示连续空格）
    pub fn to_layout_char(&self) -> Option<char> {
        match self {
            Cell::Empty => None,
            Cell::Black => Some('B'),
            Cell::White => Some('W'),
        }
    }

    /// 从布局字符解析棋子
    pub fn from_layout_char(c: char) -> Option<Cell> {
        match c {
            'B' | 'X' => Some(Cell::Black),
            'W' | 'O' => Some(Cell::White),
            _ => None,
        }
    }
}

impl From<Side> for Cell {
    fn from(side: Side) -> Self {
        match side {
            Side::Black => Cell::Black,
            Side::White => Cell::White,
        }
    }
}

/// 棋盘位置
///
/// 字段私有，反序列化时同样检查边界；只有 `new_unchecked` 能造出越界位置，
/// 规则函数会把它当作 `InvalidPosition` 拒绝。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawPosition")]
pub struct Position {
    /// 行 (0-7)，对应记法中的数字 1-8
    row: u8,
    /// 列 (0-7)，对应记法中的字母 A-H
    col: u8,
}

/// 反序列化用的未检查坐标
#[derive(Deserialize)]
struct RawPosition {
    row: u8,
    col: u8,
}

impl TryFrom<RawPosition> for Position {
    type Error = OthelloError;

    fn try_from(raw: RawPosition) -> Result<Self> {
        Self::checked(raw.row as i32, raw.col as i32)
    }
}

impl Position {
    /// 创建新位置
    pub fn new(row: u8, col: u8) -> Option<Self> {
        if (row as usize) < BOARD_SIZE && (col as usize) < BOARD_SIZE {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// 创建新位置（不检查边界，内部使用）
    pub const fn new_unchecked(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// 检查坐标并创建位置，越界时返回 `InvalidPosition`（不做截断）
    pub fn checked(row: i32, col: i32) -> Result<Self> {
        let size = BOARD_SIZE as i32;
        if (0..size).contains(&row) && (0..size).contains(&col) {
            Ok(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            Err(OthelloError::InvalidPosition { row, col })
        }
    }

    /// 行 (0-7)
    pub fn row(&self) -> u8 {
        self.row
    }

    /// 列 (0-7)
    pub fn col(&self) -> u8 {
        self.col
    }

    /// 检查位置是否在棋盘内
    pub fn is_valid(&self) -> bool {
        (self.row as usize) < BOARD_SIZE && (self.col as usize) < BOARD_SIZE
    }

    /// 越界时返回 `InvalidPosition`
    pub fn validate(self) -> Result<Self> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(OthelloError::InvalidPosition {
                row: self.row as i32,
                col: self.col as i32,
            })
        }
    }

    /// 是否是四个角之一
    pub fn is_corner(&self) -> bool {
        let last = (BOARD_SIZE - 1) as u8;
        (self.row == 0 || self.row == last) && (self.col == 0 || self.col == last)
    }

    /// 是否在边上（行或列为 0 或 7）
    pub fn is_edge(&self) -> bool {
        let last = (BOARD_SIZE - 1) as u8;
        self.row == 0 || self.row == last || self.col == 0 || self.col == last
    }

    /// 获取偏移后的位置
    pub fn offset(&self, dr: i8, dc: i8) -> Option<Position> {
        let row = self.row as i16 + dr as i16;
        let col = self.col as i16 + dc as i16;
        let size = BOARD_SIZE as i16;
        if (0..size).contains(&row) && (0..size).contains(&col) {
            Some(Position {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// 转换为线性索引（row * 8 + col）
    pub fn to_index(&self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    /// 从线性索引转换
    pub fn from_index(index: usize) -> Option<Self> {
        if index < NUM_SQUARES {
            Some(Position {
                row: (index / BOARD_SIZE) as u8,
                col: (index % BOARD_SIZE) as u8,
            })
        } else {
            None
        }
    }

    /// 按行优先顺序遍历全部 64 个位置
    pub fn all() -> impl Iterator<Item = Position> {
        (0..NUM_SQUARES).map(|index| Position {
            row: (index / BOARD_SIZE) as u8,
            col: (index % BOARD_SIZE) as u8,
        })
    }
}

impl std::fmt::Display for Position {
    /// 以代数记法显示，如 (2, 3) -> "D3"；越界位置显示为坐标对
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_valid() {
            write!(f, "{}{}", (b'A' + self.col) as char, self.row + 1)
        } else {
            write!(f, "({}, {})", self.row, self.col)
        }
    }
}
