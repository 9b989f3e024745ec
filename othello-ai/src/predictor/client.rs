//! 预测服务 HTTP 客户端
//!
//! 把落子历史（小写代数记法）POST 到 `{base_url}/predict`，回复交给 `PredictionParser`。

use anyhow::Result;
use othello_core::Position;
use serde::{Deserialize, Serialize};

use super::MovePredictor;
use crate::error::PredictorError;

#[cfg(feature = "remote")]
use anyhow::Context;
#[cfg(feature = "remote")]
use othello_core::Notation;
#[cfg(feature = "remote")]
use tracing::{debug, info};

#[cfg(feature = "remote")]
use super::PredictionParser;

/// 预测服务配置
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PredictorConfig {
    /// 服务地址，默认 http://localhost:8000
    pub base_url: String,
    /// 模型名称
    pub model: String,
    /// 采样温度，0.0 为取概率最高的落子
    pub temperature: f32,
    /// 请求超时（秒）
    pub timeout_secs: u64,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            model: "othello-gpt".to_string(),
            temperature: 0.0,
            timeout_secs: 10,
        }
    }
}

/// 预测请求体
#[cfg(feature = "remote")]
#[derive(Serialize)]
struct PredictRequest<'a> {
    model: &'a str,
    history: Vec<String>,
    temperature: f32,
}

/// HTTP 预测器
#[cfg(feature = "remote")]
pub struct HttpPredictor {
    config: PredictorConfig,
    client: reqwest::blocking::Client,
}

#[cfg(feature = "remote")]
impl HttpPredictor {
    /// 创建新的 HTTP 预测器
    pub fn new(config: PredictorConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { config, client })
    }

    /// 使用默认配置创建
    pub fn with_defaults() -> Result<Self> {
        Self::new(PredictorConfig::default())
    }

    /// 检查预测服务是否可用
    pub fn health_check(&self) -> Result<()> {
        let url = format!("{}/health", self.config.base_url);

        let resp = self
            .client
            .get(&url)
            .send()
            .with_context(|| format!("Cannot reach predictor service ({})", self.config.base_url))?;

        if resp.status().is_success() {
            info!("Predictor health check passed");
            Ok(())
        } else {
            Err(anyhow::anyhow!(
                "Predictor service returned {} ({})",
                resp.status(),
                self.config.base_url
            ))
        }
    }

    /// 发送预测请求，返回原始回复文本
    pub fn request(&self, history: &[Position]) -> Result<String> {
        let url = format!("{}/predict", self.config.base_url);
        let request = PredictRequest {
            model: &self.config.model,
            history: history
                .iter()
                .map(|pos| Notation::to_algebraic(*pos).to_ascii_lowercase())
                .collect(),
            temperature: self.config.temperature,
        };

        debug!("Sending predict request: model={}, plies={}", self.config.model, history.len());

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .context("Failed to send predict request")?
            .error_for_status()
            .context("Predictor returned an error status")?;

        let text = response.text().context("Failed to read response body")?;
        let preview: String = text.chars().take(200).collect();
        debug!("Raw predictor response: {}", preview);

        Ok(text)
    }

    pub fn config(&self) -> &PredictorConfig {
        &self.config
    }

    /// 设置温度
    pub fn set_temperature(&mut self, temperature: f32) {
        self.config.temperature = temperature.clamp(0.0, 2.0);
    }
}

#[cfg(feature = "remote")]
impl MovePredictor for HttpPredictor {
    fn name(&self) -> &str {
        &self.config.model
    }

    fn predict(&mut self, history: &[Position]) -> std::result::Result<Position, PredictorError> {
        let text = self
            .request(history)
            .map_err(|e| PredictorError::Unavailable(format!("{:#}", e)))?;
        PredictionParser::parse(&text)
    }
}

/// 未启用 `remote` feature 时的占位实现，每次预测都报告不可用
#[cfg(not(feature = "remote"))]
pub struct HttpPredictor {
    config: PredictorConfig,
}

#[cfg(not(feature = "remote"))]
impl HttpPredictor {
    pub fn new(config: PredictorConfig) -> Result<Self> {
        Ok(Self { config })
    }

    pub fn with_defaults() -> Result<Self> {
        Self::new(PredictorConfig::default())
    }

    pub fn health_check(&self) -> Result<()> {
        anyhow::bail!("Remote predictor not enabled. Compile with --features remote")
    }

    pub fn request(&self, _history: &[Position]) -> Result<String> {
        anyhow::bail!("Remote predictor not enabled. Compile with --features remote")
    }

    pub fn config(&self) -> &PredictorConfig {
        &self.config
    }

    pub fn set_temperature(&mut self, temperature: f32) {
        self.config.temperature = temperature.clamp(0.0, 2.0);
    }
}

#[cfg(not(feature = "remote"))]
impl MovePredictor for HttpPredictor {
    fn name(&self) -> &str {
        &self.config.model
    }

    fn predict(&mut self, _history: &[Position]) -> std::result::Result<Position, PredictorError> {
        Err(PredictorError::Unavailable(
            "remote feature not enabled".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PredictorConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.timeout_secs, 10);
        assert!(config.temperature >= 0.0);
    }

    #[test]
    fn test_config_serde() {
        let json = r#"{"base_url":"http://10.0.0.2:9000","model":"tiny","temperature":0.5,"timeout_secs":3}"#;
        let config: PredictorConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.model, "tiny");
        assert_eq!(config.timeout_secs, 3);
    }

    #[test]
    fn test_set_temperature_clamped() {
        let mut predictor = HttpPredictor::with_defaults().unwrap();
        predictor.set_temperature(5.0);
        assert_eq!(predictor.config().temperature, 2.0);
    }

    #[test]
    fn test_unreachable_service_is_unavailable() {
        let config = PredictorConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: 1,
            ..PredictorConfig::default()
        };
        let mut predictor = HttpPredictor::new(config).unwrap();

        assert!(predictor.health_check().is_err());
        assert!(matches!(
            predictor.predict(&[]),
            Err(PredictorError::Unavailable(_))
        ));
    }
}
