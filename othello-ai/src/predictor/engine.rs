//! 预测器 AI 引擎
//!
//! 把 `MovePredictor` 包装成 `MoveStrategy`：
//! - 预测结果合法时直接采用
//! - 服务不可用、回复无法解析或落子不合法时重试，仍失败则随机选一个合法落子

use othello_core::{BoardState, MoveRules, MoveStrategy, Position};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::MovePredictor;
use crate::error::PredictorError;

/// 预测统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PredictorStats {
    /// 采用预测结果的次数
    pub predicted: u32,
    /// 回退到随机落子的次数
    pub fallbacks: u32,
}

/// 预测器 AI 引擎
pub struct PredictorEngine<P> {
    predictor: P,
    rng: ChaCha8Rng,
    /// 每手最多请求次数
    max_attempts: u32,
    stats: PredictorStats,
}

impl<P: MovePredictor> PredictorEngine<P> {
    /// 创建新的预测器引擎
    pub fn new(predictor: P) -> Self {
        Self {
            predictor,
            rng: ChaCha8Rng::from_entropy(),
            max_attempts: 1,
            stats: PredictorStats::default(),
        }
    }

    /// 固定回退用的随机种子
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self
    }

    /// 设置每手最多请求次数（至少 1 次）
    pub fn set_max_attempts(&mut self, attempts: u32) {
        self.max_attempts = attempts.max(1);
    }

    pub fn predictor(&self) -> &P {
        &self.predictor
    }

    pub fn stats(&self) -> PredictorStats {
        self.stats
    }

    /// 请求预测并校验合法性
    fn try_predict(
        &mut self,
        legal: &[Position],
        history: &[Position],
    ) -> Result<Position, PredictorError> {
        let position = self.predictor.predict(history)?;
        if legal.contains(&position) {
            Ok(position)
        } else {
            Err(PredictorError::InvalidMove { position })
        }
    }

    /// 选择落子；没有合法落子时返回 None
    pub fn choose(&mut self, state: &BoardState, history: &[Position]) -> Option<Position> {
        let legal = MoveRules::legal_moves(state);
        if legal.is_empty() {
            return None;
        }

        for attempt in 1..=self.max_attempts {
            match self.try_predict(&legal, history) {
                Ok(position) => {
                    self.stats.predicted += 1;
                    debug!("{} predicted {} (attempt {})", self.predictor.name(), position, attempt);
                    return Some(position);
                }
                Err(e) => {
                    warn!(
                        "{} prediction failed (attempt {}/{}): {}",
                        self.predictor.name(),
                        attempt,
                        self.max_attempts,
                        e
                    );
                }
            }
        }

        self.stats.fallbacks += 1;
        let fallback = legal.choose(&mut self.rng).copied();
        if let Some(position) = fallback {
            info!("Falling back to random move {}", position);
        }
        fallback
    }
}

impl<P: MovePredictor> MoveStrategy for PredictorEngine<P> {
    fn name(&self) -> &str {
        self.predictor.name()
    }

    fn choose_move(&mut self, state: &BoardState, history: &[Position]) -> Option<Position> {
        self.choose(state, history)
    }
}

/// AI 后端类型
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiBackend {
    /// 本地搜索（easy / medium / hard）
    #[default]
    Search,
    /// 外部预测器，失败时回退到随机落子
    Predictor,
}
