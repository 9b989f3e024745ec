//! 棋谱记录格式
//!
//! JSON 格式的棋谱，用于和外部预测器、分析工具交换对局。只在内存中序列化，不落盘。

use serde::{Deserialize, Serialize};

use crate::board::GameResult;
use crate::error::Result;
use crate::game::{Game, Ply};
use crate::layout::{Layout, INITIAL_LAYOUT};
use crate::notation::Notation;
use crate::piece::{Position, Side};

/// 棋谱版本
pub const RECORD_VERSION: &str = "1.0";

/// 游戏元数据
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameMetadata {
    /// 黑方玩家名
    pub black_player: String,
    /// 白方玩家名
    pub white_player: String,
    /// 游戏结果
    pub result: Option<GameResult>,
    /// AI 难度或预测器名称（人机模式）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_opponent: Option<String>,
}

/// 走法记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// 落子方
    pub side: Side,
    /// 代数记法，如 "D3"
    pub notation: String,
    /// 线性索引 row * 8 + col
    pub index: u8,
}

impl MoveRecord {
    /// 创建新的走法记录
    pub fn new(side: Side, pos: Position) -> Self {
        Self {
            side,
            notation: Notation::to_algebraic(pos),
            index: pos.to_index() as u8,
        }
    }

    /// 获取落子位置（以代数记法为准）
    pub fn position(&self) -> Result<Position> {
        Notation::parse(&self.notation)
    }
}

/// 完整的棋谱记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRecord {
    /// 版本号
    pub version: String,
    /// 元数据
    pub metadata: GameMetadata,
    /// 初始局面布局
    pub initial_layout: String,
    /// 走法列表（不含弃权，重放时自动补上）
    pub moves: Vec<MoveRecord>,
}

impl GameRecord {
    /// 创建新的棋谱记录
    pub fn new(black_player: String, white_player: String) -> Self {
        Self {
            version: RECORD_VERSION.to_string(),
            metadata: GameMetadata {
                black_player,
                white_player,
                result: None,
                ai_opponent: None,
            },
            initial_layout: INITIAL_LAYOUT.to_string(),
            moves: Vec::new(),
        }
    }

    /// 从对局生成棋谱
    pub fn from_game(game: &Game, black_player: String, white_player: String) -> Self {
        let mut record = Self::new(black_player, white_player);
        record.initial_layout = Layout::to_string(game.initial_state());
        for ply in game.history() {
            if let Ply::Move { side, position } = ply {
                record.add_move(MoveRecord::new(*side, *position));
            }
        }
        record.metadata.result = game.result();
        record
    }

    /// 设置 AI 对手
    pub fn set_ai_opponent(&mut self, opponent: &str) {
        self.metadata.ai_opponent = Some(opponent.to_string());
    }

    /// 添加走法
    pub fn add_move(&mut self, mv: MoveRecord) {
        self.moves.push(mv);
    }

    /// 设置游戏结果
    pub fn set_result(&mut self, result: GameResult) {
        self.metadata.result = Some(result);
    }

    /// 落子位置列表
    pub fn positions(&self) -> Result<Vec<Position>> {
        self.moves.iter().map(MoveRecord::position).collect()
    }

    /// 紧凑棋谱，如 "d3c3c4"
    pub fn to_transcript(&self) -> Result<String> {
        Ok(Notation::to_transcript(&self.positions()?))
    }

    /// 从初始局面重放为对局
    pub fn replay(&self) -> Result<Game> {
        let initial = Layout::parse(&self.initial_layout)?;
        Game::replay_from(initial, &self.positions()?)
    }

    /// 转换为 JSON 字符串
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// 从 JSON 字符串解析
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_game() -> Game {
        let moves = Notation::parse_transcript("d3c3c4").unwrap();
        Game::replay(&moves).unwrap()
    }

    #[test]
    fn test_game_record_json() {
        let game = sample_game();
        let mut record = GameRecord::from_game(&game, "玩家1".to_string(), "AI-中等".to_string());
        record.set_ai_opponent("medium");

        let json = record.to_json().unwrap();
        let parsed = GameRecord::from_json(&json).unwrap();

        assert_eq!(parsed.metadata.black_player, "玩家1");
        assert_eq!(parsed.metadata.ai_opponent.as_deref(), Some("medium"));
        assert_eq!(parsed.moves.len(), 3);
        assert_eq!(parsed.moves[0], MoveRecord::new(Side::Black, Position::new_unchecked(2, 3)));
        assert_eq!(parsed.moves[0].index, 19);
    }

    #[test]
    fn test_record_replay() {
        let game = sample_game();
        let record = GameRecord::from_game(&game, "A".to_string(), "B".to_string());

        let replayed = record.replay().unwrap();
        assert_eq!(replayed.state(), game.state());
        assert_eq!(record.to_transcript().unwrap(), "d3c3c4");
    }

    #[test]
    fn test_record_with_bad_move_fails_replay() {
        let mut record = GameRecord::new("A".to_string(), "B".to_string());
        record.add_move(MoveRecord::new(Side::Black, Position::new_unchecked(0, 0)));
        assert!(record.replay().is_err());
    }
}
