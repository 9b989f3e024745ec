//! 规则常量定义

/// 棋盘边长（行数 = 列数）
pub const BOARD_SIZE: usize = 8;

/// 格子总数
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;

/// 八个方向（王步偏移，不含 (0, 0)），格式为 (行偏移, 列偏移)
pub const DIRECTIONS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// 一局最多的落子数（60 个空格）
pub const MAX_MOVES: usize = NUM_SQUARES - 4;
