//! 棋盘状态

use serde::{Deserialize, Serialize};

use crate::constants::{BOARD_SIZE, NUM_SQUARES};
use crate::moves::MoveRules;
use crate::piece::{Cell, Position, Side};

/// 棋盘
///
/// 固定 8x8 网格，始终恰好 64 个格子。外部只读，修改统一经过 [`MoveRules`]。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    grid: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// 创建空棋盘
    pub fn empty() -> Self {
        Self {
            grid: [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// 创建初始棋盘：中心 2x2 对角摆放
    pub fn initial() -> Self {
        let mut board = Self::empty();
        board.set(Position::new_unchecked(3, 3), Cell::White);
        board.set(Position::new_unchecked(3, 4), Cell::Black);
        board.set(Position::new_unchecked(4, 3), Cell::Black);
        board.set(Position::new_unchecked(4, 4), Cell::White);
        board
    }

    /// 获取指定位置的格子
    pub fn get(&self, pos: Position) -> Cell {
        if pos.is_valid() {
            self.grid[pos.row() as usize][pos.col() as usize]
        } else {
            Cell::Empty
        }
    }

    /// 设置指定位置的格子（不检查规则）
    pub(crate) fn set(&mut self, pos: Position, cell: Cell) {
        if pos.is_valid() {
            self.grid[pos.row() as usize][pos.col() as usize] = cell;
        }
    }

    /// 统计某种格子的数量
    pub fn count(&self, cell: Cell) -> usize {
        self.grid
            .iter()
            .flat_map(|row| row.iter())
            .filter(|c| **c == cell)
            .count()
    }

    /// 行优先的格子快照，供渲染使用
    pub fn cells(&self) -> [Cell; NUM_SQUARES] {
        let mut cells = [Cell::Empty; NUM_SQUARES];
        for pos in Position::all() {
            cells[pos.to_index()] = self.get(pos);
        }
        cells
    }

    /// 按行访问
    pub fn rows(&self) -> &[[Cell; BOARD_SIZE]; BOARD_SIZE] {
        &self.grid
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

/// 双方棋子数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub black: usize,
    pub white: usize,
}

/// 对局结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// 黑方胜
    BlackWin,
    /// 白方胜
    WhiteWin,
    /// 平局
    Draw,
}

impl GameResult {
    /// 获胜方，平局返回 None
    pub fn winner(&self) -> Option<Side> {
        match self {
            GameResult::BlackWin => Some(Side::Black),
            GameResult::WhiteWin => Some(Side::White),
            GameResult::Draw => None,
        }
    }
}

/// 完整的棋局状态（棋盘 + 走子方）
///
/// 实现了 `Copy`：搜索时直接在副本上模拟，不需要恢复现场。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardState {
    board: Board,
    current_turn: Side,
}

impl BoardState {
    /// 创建初始状态，黑方先行
    pub fn initial() -> Self {
        Self {
            board: Board::initial(),
            current_turn: Side::Black,
        }
    }

    /// 从棋盘创建状态
    pub fn from_board(board: Board, current_turn: Side) -> Self {
        Self {
            board,
            current_turn,
        }
    }

    /// 只读棋盘
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// 当前走子方
    pub fn current_turn(&self) -> Side {
        self.current_turn
    }

    /// 切换走子方
    pub(crate) fn switch_turn(&mut self) {
        self.current_turn = self.current_turn.opponent();
    }

    /// 返回一个换成 `side` 走棋的副本
    pub fn with_turn(&self, side: Side) -> Self {
        Self {
            board: self.board,
            current_turn: side,
        }
    }

    /// 某一方的棋子数
    pub fn count_pieces(&self, side: Side) -> usize {
        self.board.count(Cell::from(side))
    }

    /// 某种格子的数量（包括空格）
    pub fn count(&self, cell: Cell) -> usize {
        self.board.count(cell)
    }

    /// 空格数
    pub fn empty_count(&self) -> usize {
        self.board.count(Cell::Empty)
    }

    /// 棋盘是否已满
    pub fn is_full(&self) -> bool {
        self.empty_count() == 0
    }

    /// 双方棋子数
    pub fn score(&self) -> Score {
        Score {
            black: self.count_pieces(Side::Black),
            white: self.count_pieces(Side::White),
        }
    }

    /// 双方都没有合法落子时为终局（与轮到谁无关）
    pub fn is_terminal(&self) -> bool {
        !MoveRules::has_legal_move(self, Side::Black) && !MoveRules::has_legal_move(self, Side::White)
    }

    /// 按棋子数判定胜负；终局前调用也返回当前的比较结果
    pub fn winner(&self) -> GameResult {
        let score = self.score();
        if score.black > score.white {
            GameResult::BlackWin
        } else if score.white > score.black {
            GameResult::WhiteWin
        } else {
            GameResult::Draw
        }
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::initial()
    }
}
