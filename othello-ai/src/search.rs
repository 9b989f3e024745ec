//! 搜索引擎
//!
//! 三档难度：
//! - easy：在合法落子中均匀随机
//! - medium：贪心，取 `Evaluator::score_move` 最高者
//! - hard：两层极小极大，按子力差（白减黑）取值

use std::fmt;
use std::str::FromStr;

use othello_core::{BoardState, MoveRules, MoveStrategy, Position};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::evaluate::Evaluator;

/// AI 难度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// 全部难度，按从易到难排列
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// 显示名称
    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" | "1" => Ok(Difficulty::Easy),
            "medium" | "2" => Ok(Difficulty::Medium),
            "hard" | "3" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {}", other)),
        }
    }
}

/// AI 配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AiConfig {
    pub difficulty: Difficulty,
    /// 随机数种子；None 时从系统熵初始化
    #[serde(default)]
    pub seed: Option<u64>,
}

impl AiConfig {
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            seed: None,
        }
    }

    /// 固定随机种子，便于复现
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// AI 引擎
pub struct AiEngine {
    config: AiConfig,
    rng: ChaCha8Rng,
    nodes_searched: u64,
}

impl AiEngine {
    /// 创建新的 AI 引擎
    pub fn new(config: AiConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self {
            config,
            rng,
            nodes_searched: 0,
        }
    }

    /// 从难度创建
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        Self::new(AiConfig::from_difficulty(difficulty))
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    pub fn difficulty(&self) -> Difficulty {
        self.config.difficulty
    }

    /// 为当前走子方选择落子；没有合法落子时返回 None
    pub fn search(&mut self, state: &BoardState) -> Option<Position> {
        self.nodes_searched = 0;

        let moves = MoveRules::legal_moves(state);
        if moves.is_empty() {
            debug!("{} AI has no legal move for {}", self.config.difficulty, state.current_turn().name());
            return None;
        }

        let chosen = match self.config.difficulty {
            Difficulty::Easy => moves.choose(&mut self.rng).copied(),
            Difficulty::Medium => self.greedy(state, &moves),
            Difficulty::Hard => self.minimax(state, &moves),
        };

        if let Some(pos) = chosen {
            debug!(
                "{} AI chose {} from {} moves ({} nodes)",
                self.config.difficulty,
                pos,
                moves.len(),
                self.nodes_searched
            );
        }
        chosen
    }

    /// 贪心：评估分最高者，相同分数取先出现的
    fn greedy(&mut self, state: &BoardState, moves: &[Position]) -> Option<Position> {
        let mut best: Option<(Position, i32)> = None;

        for &pos in moves {
            self.nodes_searched += 1;
            let score = Evaluator::score_move(state, pos);
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((pos, score));
            }
        }

        best.map(|(pos, _)| pos)
    }

    /// 两层极小极大，相同分数取先出现的
    fn minimax(&mut self, state: &BoardState, moves: &[Position]) -> Option<Position> {
        let mut best: Option<(Position, i32)> = None;

        for &pos in moves {
            let value = self.reply_value(state, pos);
            if best.map_or(true, |(_, best_value)| value > best_value) {
                best = Some((pos, value));
            }
        }

        best.map(|(pos, _)| pos)
    }

    /// 落子 pos 后，对手所有应着中子力差的最小值；对手无应着时取落子后的子力差
    fn reply_value(&mut self, state: &BoardState, pos: Position) -> i32 {
        self.nodes_searched += 1;

        let mut after_move = *state;
        if MoveRules::apply_move(&mut after_move, pos).is_err() {
            return i32::MIN;
        }

        let replies = MoveRules::legal_moves(&after_move);
        if replies.is_empty() {
            return Evaluator::material(after_move.board());
        }

        let mut min_value = i32::MAX;
        for reply in replies {
            self.nodes_searched += 1;
            let mut after_reply = after_move;
            if MoveRules::apply_move(&mut after_reply, reply).is_ok() {
                min_value = min_value.min(Evaluator::material(after_reply.board()));
            }
        }
        min_value
    }

    /// 获取上次搜索的节点数
    pub fn nodes_searched(&self) -> u64 {
        self.nodes_searched
    }
}

impl MoveStrategy for AiEngine {
    fn name(&self) -> &str {
        self.config.difficulty.name()
    }

    fn choose_move(&mut self, state: &BoardState, _history: &[Position]) -> Option<Position> {
        self.search(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use othello_core::{Game, Layout};

    fn pos(row: u8, col: u8) -> Position {
        Position::new_unchecked(row, col)
    }

    fn engine(difficulty: Difficulty) -> AiEngine {
        AiEngine::new(AiConfig::from_difficulty(difficulty).with_seed(7))
    }

    #[test]
    fn test_easy_single_legal_move() {
        let state = Layout::parse("1WB5/8/8/8/8/8/8/8 b").unwrap();
        assert_eq!(MoveRules::legal_moves(&state), vec![pos(0, 0)]);

        for seed in 0..10 {
            let mut ai = AiEngine::new(AiConfig::from_difficulty(Difficulty::Easy).with_seed(seed));
            assert_eq!(ai.search(&state), Some(pos(0, 0)));
        }
    }

    #[test]
    fn test_easy_is_reproducible_with_seed() {
        let state = BoardState::initial();
        let mut a = engine(Difficulty::Easy);
        let mut b = engine(Difficulty::Easy);

        for _ in 0..5 {
            assert_eq!(a.search(&state), b.search(&state));
        }
    }

    #[test]
    fn test_easy_returns_legal_move() {
        let state = BoardState::initial();
        let legal = MoveRules::legal_moves(&state);
        let mut ai = engine(Difficulty::Easy);

        for _ in 0..20 {
            let mv = ai.search(&state).unwrap();
            assert!(legal.contains(&mv));
        }
    }

    #[test]
    fn test_medium_prefers_corner() {
        let state = Layout::parse("1WB5/8/8/3WB3/3BW3/8/8/8 b").unwrap();
        let legal = MoveRules::legal_moves(&state);
        assert!(legal.len() > 1);

        let mut ai = engine(Difficulty::Medium);
        assert_eq!(ai.search(&state), Some(pos(0, 0)));
    }

    #[test]
    fn test_medium_ties_keep_first() {
        // 初始局面四个落子得分相同
        let mut ai = engine(Difficulty::Medium);
        assert_eq!(ai.search(&BoardState::initial()), Some(pos(2, 3)));
        assert_eq!(ai.nodes_searched(), 4);
    }

    #[test]
    fn test_hard_initial_position() {
        // 每个落子后白方最佳应着都使子力差为 0，取第一个
        let mut ai = engine(Difficulty::Hard);
        assert_eq!(ai.search(&BoardState::initial()), Some(pos(2, 3)));
        assert!(ai.nodes_searched() > 4);
    }

    #[test]
    fn test_hard_reply_value_without_replies() {
        let state = Layout::parse("1WB5/8/8/8/8/8/8/8 b").unwrap();
        let mut ai = engine(Difficulty::Hard);

        // A1 后白方无子，取落子后子力差 0 - 3
        assert_eq!(ai.reply_value(&state, pos(0, 0)), -3);
        assert_eq!(ai.search(&state), Some(pos(0, 0)));
    }

    #[test]
    fn test_hard_takes_min_over_replies() {
        let state = BoardState::initial();
        let mut ai = engine(Difficulty::Hard);

        // D3 后黑 4 白 1，白方任一应着翻 1 子：黑 3 白 3
        assert_eq!(ai.reply_value(&state, pos(2, 3)), 0);
    }

    /// 黑方两个落子：H5 翻两子但之后白方可吃回，G6 只翻一子
    const SPLIT_LAYOUT: &str = "8/8/8/2BBB3/3BBWW1/5W2/4W1B1/8 b";

    #[test]
    fn test_hard_reply_value_is_min_of_replies() {
        let state = Layout::parse(SPLIT_LAYOUT).unwrap();
        assert_eq!(MoveRules::legal_moves(&state), vec![pos(4, 7), pos(5, 6)]);
        let mut ai = engine(Difficulty::Hard);

        // G6 后黑 8 白 3，白方应着 C3/G8 得 0、C5 得 2、F4/H6/H8 得 -2
        assert_eq!(ai.reply_value(&state, pos(5, 6)), -2);
        // H5 后黑 9 白 2，白方应着 C3 得 -2、F4/H4/H8 得 -4
        assert_eq!(ai.reply_value(&state, pos(4, 7)), -4);

        // 每个落子 1 个节点，加上各自的应着
        ai.search(&state);
        assert_eq!(ai.nodes_searched(), 1 + 4 + 1 + 6);
    }

    #[test]
    fn test_hard_and_medium_disagree() {
        let state = Layout::parse(SPLIT_LAYOUT).unwrap();

        // H5 是边，得分 20 + 2 × 3 = 26；G6 得分 2 × 2 = 4
        assert_eq!(Evaluator::score_move(&state, pos(4, 7)), 26);
        assert_eq!(Evaluator::score_move(&state, pos(5, 6)), 4);
        assert_eq!(engine(Difficulty::Medium).search(&state), Some(pos(4, 7)));

        // -2 > -4
        assert_eq!(engine(Difficulty::Hard).search(&state), Some(pos(5, 6)));
    }

    #[test]
    fn test_no_legal_moves_returns_none() {
        let state = Layout::parse("B7/8/8/8/8/8/8/8 b").unwrap();
        for difficulty in Difficulty::ALL {
            let mut ai = engine(difficulty);
            assert_eq!(ai.search(&state), None);
        }
    }

    #[test]
    fn test_search_does_not_mutate_state() {
        let state = BoardState::initial();
        let before = state;
        for difficulty in Difficulty::ALL {
            let mut ai = engine(difficulty);
            ai.search(&state);
            assert_eq!(state, before);
        }
    }

    #[test]
    fn test_full_game_between_engines() {
        let mut game = Game::new();
        let mut black = engine(Difficulty::Hard);
        let mut white = engine(Difficulty::Medium);

        for _ in 0..200 {
            if game.is_over() {
                break;
            }
            let strategy: &mut dyn MoveStrategy = match game.current_turn() {
                othello_core::Side::Black => &mut black,
                othello_core::Side::White => &mut white,
            };
            game.play_turn(strategy).unwrap();
        }

        assert!(game.is_over());
        let score = game.score();
        assert!(score.black + score.white <= 64);
    }

    #[test]
    fn test_difficulty_parse() {
        assert_eq!("easy".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert_eq!("HARD".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert_eq!("2".parse::<Difficulty>().unwrap(), Difficulty::Medium);
        assert!("expert".parse::<Difficulty>().is_err());
        assert_eq!(Difficulty::default(), Difficulty::Medium);
    }

    #[test]
    fn test_difficulty_serde() {
        let json = serde_json::to_string(&Difficulty::Hard).unwrap();
        assert_eq!(json, "\"hard\"");
        let config: AiConfig = serde_json::from_str(r#"{"difficulty":"easy"}"#).unwrap();
        assert_eq!(config.difficulty, Difficulty::Easy);
        assert_eq!(config.seed, None);
    }
}
