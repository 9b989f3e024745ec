//! 对局控制
//!
//! 负责轮次推进：枚举合法落子、执行落子、强制弃权、终局判定与悔棋。

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::board::{BoardState, GameResult, Score};
use crate::constants::MAX_MOVES;
use crate::error::{OthelloError, Result};
use crate::moves::MoveRules;
use crate::piece::{Position, Side};
use crate::strategy::MoveStrategy;

/// 一手记录
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ply {
    /// 落子
    Move { side: Side, position: Position },
    /// 弃权
    Pass { side: Side },
}

impl Ply {
    pub fn side(&self) -> Side {
        match self {
            Ply::Move { side, .. } | Ply::Pass { side } => *side,
        }
    }
}

/// 落子结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub side: Side,
    pub position: Position,
    /// 被翻转的棋子
    pub flipped: Vec<Position>,
}

/// 当前轮次状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnStatus {
    /// 轮到当前方落子，附带合法落子列表（行优先）
    ToMove(Vec<Position>),
    /// 当前方无子可下，必须弃权
    MustPass,
    /// 双方都无子可下
    GameOver(GameResult),
}

/// 由策略驱动的一个轮次的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    Moved(MoveOutcome),
    Passed(Side),
    GameOver(GameResult),
}

/// 一局棋
#[derive(Debug, Clone)]
pub struct Game {
    /// 起始局面（悔棋时从这里重放）
    initial: BoardState,
    state: BoardState,
    history: Vec<Ply>,
}

impl Game {
    /// 从标准初始局面开始
    pub fn new() -> Self {
        Self::from_state(BoardState::initial())
    }

    /// 从任意局面开始
    pub fn from_state(state: BoardState) -> Self {
        Self {
            initial: state,
            state,
            history: Vec::with_capacity(MAX_MOVES),
        }
    }

    /// 从初始局面重放一串落子，自动补上中间的强制弃权
    pub fn replay(moves: &[Position]) -> Result<Self> {
        Self::replay_from(BoardState::initial(), moves)
    }

    /// 从指定局面重放一串落子
    pub fn replay_from(state: BoardState, moves: &[Position]) -> Result<Self> {
        let mut game = Self::from_state(state);
        for &pos in moves {
            if game.turn_status() == TurnStatus::MustPass {
                game.pass()?;
            }
            game.play(pos)?;
        }
        Ok(game)
    }

    /// 起始局面
    pub fn initial_state(&self) -> &BoardState {
        &self.initial
    }

    /// 当前局面（只读）
    pub fn state(&self) -> &BoardState {
        &self.state
    }

    /// 当前走子方
    pub fn current_turn(&self) -> Side {
        self.state.current_turn()
    }

    /// 当前方的合法落子
    pub fn legal_moves(&self) -> Vec<Position> {
        MoveRules::legal_moves(&self.state)
    }

    /// 双方棋子数
    pub fn score(&self) -> Score {
        self.state.score()
    }

    /// 当前轮次状态
    pub fn turn_status(&self) -> TurnStatus {
        let moves = self.legal_moves();
        if !moves.is_empty() {
            return TurnStatus::ToMove(moves);
        }
        if self.state.is_terminal() {
            TurnStatus::GameOver(self.state.winner())
        } else {
            TurnStatus::MustPass
        }
    }

    /// 是否已终局
    pub fn is_over(&self) -> bool {
        self.state.is_terminal()
    }

    /// 终局后的结果
    pub fn result(&self) -> Option<GameResult> {
        self.is_over().then(|| self.state.winner())
    }

    /// 全部记录（含弃权）
    pub fn history(&self) -> &[Ply] {
        &self.history
    }

    /// 只包含落子的历史，作为预测器输入
    pub fn move_history(&self) -> Vec<Position> {
        self.history
            .iter()
            .filter_map(|ply| match ply {
                Ply::Move { position, .. } => Some(*position),
                Ply::Pass { .. } => None,
            })
            .collect()
    }

    /// 当前方落子
    pub fn play(&mut self, pos: Position) -> Result<MoveOutcome> {
        if self.is_over() {
            return Err(OthelloError::GameOver);
        }

        let side = self.current_turn();
        let flipped = MoveRules::apply_move(&mut self.state, pos)?;
        self.history.push(Ply::Move { side, position: pos });

        debug!("{} plays {}, flipped {}", side.name(), pos, flipped.len());
        if self.is_over() {
            let score = self.score();
            info!(
                "Game over: {:?} (black {}, white {})",
                self.state.winner(),
                score.black,
                score.white
            );
        }

        Ok(MoveOutcome {
            side,
            position: pos,
            flipped,
        })
    }

    /// 按行列坐标落子，越界返回 `InvalidPosition`
    pub fn play_at(&mut self, row: i32, col: i32) -> Result<MoveOutcome> {
        let pos = Position::checked(row, col)?;
        self.play(pos)
    }

    /// 弃权：只有当前方无合法落子时才允许
    pub fn pass(&mut self) -> Result<()> {
        if self.is_over() {
            return Err(OthelloError::GameOver);
        }
        if MoveRules::has_legal_move(&self.state, self.current_turn()) {
            return Err(OthelloError::PassNotAllowed);
        }

        let side = self.current_turn();
        MoveRules::pass(&mut self.state);
        self.history.push(Ply::Pass { side });
        debug!("{} passes", side.name());
        Ok(())
    }

    /// 由策略推进一个轮次
    ///
    /// 无合法落子时直接弃权，不询问策略；策略给出非法落子时返回错误，局面不变。
    pub fn play_turn(&mut self, strategy: &mut dyn MoveStrategy) -> Result<TurnOutcome> {
        match self.turn_status() {
            TurnStatus::GameOver(result) => Ok(TurnOutcome::GameOver(result)),
            TurnStatus::MustPass => {
                let side = self.current_turn();
                self.pass()?;
                Ok(TurnOutcome::Passed(side))
            }
            TurnStatus::ToMove(moves) => {
                let history = self.move_history();
                let pos = strategy
                    .choose_move(&self.state, &history)
                    .ok_or_else(|| OthelloError::StrategyNoMove {
                        strategy: strategy.name().to_string(),
                    })?
                    .validate()?;

                if !moves.contains(&pos) {
                    return Err(OthelloError::IllegalMove {
                        row: pos.row(),
                        col: pos.col(),
                    });
                }

                self.play(pos).map(TurnOutcome::Moved)
            }
        }
    }

    /// 悔一手（落子或弃权），从起始局面重放剩余记录
    pub fn undo(&mut self) -> Option<Ply> {
        let ply = self.history.pop()?;

        let mut state = self.initial;
        for past in &self.history {
            match past {
                Ply::Move { position, .. } => {
                    // 记录中的落子在重放时必然合法
                    let replayed = MoveRules::apply_move(&mut state, *position);
                    debug_assert!(replayed.is_ok(), "history replay diverged at {}", position);
                }
                Ply::Pass { .. } => MoveRules::pass(&mut state),
            }
        }
        self.state = state;

        debug!("Undo {:?}", ply);
        Some(ply)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
