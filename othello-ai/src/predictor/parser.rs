//! 预测结果解析器
//!
//! 接受三种回复：
//! - JSON：`{"move": "d3"}`、`{"move": 19}` 或 `{"index": 19}`，可夹在其他文本中
//! - 代数记法：`D3`
//! - 线性索引：`19`

use anyhow::{bail, Context, Result};
use othello_core::{BoardState, MoveRules, Notation, Position};
use serde::Deserialize;
use tracing::debug;

use crate::error::PredictorError;

/// JSON 回复中的落子字段，字符串或索引均可
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum MoveToken {
    Index(usize),
    Text(String),
}

/// 预测服务返回的 JSON 格式
#[derive(Debug, Deserialize)]
pub struct RawPrediction {
    #[serde(default, rename = "move")]
    pub mv: Option<MoveToken>,
    #[serde(default)]
    pub index: Option<usize>,
    #[serde(default)]
    pub confidence: Option<f32>,
}

impl RawPrediction {
    /// 转换为棋盘位置，`move` 优先于 `index`
    pub fn to_position(&self) -> Result<Position> {
        match (&self.mv, self.index) {
            (Some(MoveToken::Text(text)), _) => Ok(Notation::parse_any(text)?),
            (Some(MoveToken::Index(index)), _) => Self::index_to_position(*index),
            (None, Some(index)) => Self::index_to_position(index),
            (None, None) => bail!("Prediction has neither 'move' nor 'index'"),
        }
    }

    fn index_to_position(index: usize) -> Result<Position> {
        Position::from_index(index).with_context(|| format!("Index {} out of range", index))
    }
}

/// 预测结果解析器
pub struct PredictionParser;

impl PredictionParser {
    /// 解析预测回复
    pub fn parse(response: &str) -> std::result::Result<Position, PredictorError> {
        Self::parse_position(response).map_err(|e| PredictorError::Malformed(format!("{:#}", e)))
    }

    /// 解析并检查是否为当前局面的合法落子
    pub fn parse_and_validate(
        response: &str,
        state: &BoardState,
    ) -> std::result::Result<Position, PredictorError> {
        let position = Self::parse(response)?;
        if MoveRules::is_legal_move(state, position) {
            Ok(position)
        } else {
            Err(PredictorError::InvalidMove { position })
        }
    }

    fn parse_position(response: &str) -> Result<Position> {
        let trimmed = response.trim();
        if trimmed.is_empty() {
            bail!("Empty response");
        }

        if trimmed.contains('{') {
            let json = Self::extract_json(trimmed)?;
            let raw: RawPrediction =
                serde_json::from_str(json).context("Failed to parse prediction JSON")?;
            if let Some(confidence) = raw.confidence {
                debug!("Prediction confidence: {:.3}", confidence);
            }
            return raw.to_position();
        }

        // 纯文本：取第一个词，去掉引号和句末标点
        let token = trimmed
            .split_whitespace()
            .next()
            .map(|t| t.trim_matches(|c: char| c == '"' || c == '\'' || c == '.' || c == ','))
            .unwrap_or_default();
        Notation::parse_any(token).with_context(|| format!("Unrecognized move token '{}'", token))
    }

    /// 从文本中提取第一个完整的 JSON 对象
    fn extract_json(text: &str) -> Result<&str> {
        let start = text.find('{').context("No JSON object found in response")?;

        let mut depth = 0usize;
        for (i, ch) in text[start..].char_indices() {
            match ch {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(&text[start..start + i + 1]);
                    }
                }
                _ => {}
            }
        }

        bail!("Unbalanced braces in JSON")
    }
}
