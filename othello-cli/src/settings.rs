//! 游戏设置模块
//!
//! 设置以 JSON 保存在 `<配置目录>/othello/settings.json`，读取失败时使用默认设置。

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use othello_ai::predictor::{AiBackend, PredictorConfig};
use othello_ai::Difficulty;
use serde::{Deserialize, Serialize};

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// 显示名称
    pub fn display_name(&self) -> &'static str {
        match self {
            LogLevel::Error => "Error",
            LogLevel::Warn => "Warn",
            LogLevel::Info => "Info",
            LogLevel::Debug => "Debug",
            LogLevel::Trace => "Trace",
        }
    }

    /// EnvFilter 指令
    pub fn directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    /// 下一个选项
    pub fn next(self) -> Self {
        match self {
            LogLevel::Error => LogLevel::Warn,
            LogLevel::Warn => LogLevel::Info,
            LogLevel::Info => LogLevel::Debug,
            LogLevel::Debug => LogLevel::Trace,
            LogLevel::Trace => LogLevel::Error,
        }
    }
}

/// 游戏设置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// 默认 AI 难度
    pub default_difficulty: Difficulty,
    /// 人机对战使用的 AI 后端
    pub ai_backend: AiBackend,
    /// AI 落子前的停顿（毫秒）
    pub ai_move_delay_ms: u64,
    /// 棋盘上标出合法落子
    pub show_move_hints: bool,
    /// 日志级别
    pub log_level: LogLevel,
    /// 预测服务配置
    pub predictor: PredictorConfig,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            default_difficulty: Difficulty::Medium,
            ai_backend: AiBackend::default(),
            ai_move_delay_ms: 500,
            show_move_hints: true,
            log_level: LogLevel::default(),
            predictor: PredictorConfig::default(),
        }
    }
}

impl GameSettings {
    /// 获取设置文件路径
    pub fn settings_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut path| {
            path.push("othello");
            path.push("settings.json");
            path
        })
    }

    /// 从默认位置加载设置
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            tracing::warn!("Config directory unavailable, using default settings");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// 从指定文件加载设置
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::info!("Settings file not found, using defaults");
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(settings) => {
                    tracing::info!("Loaded settings: {:?}", path);
                    settings
                }
                Err(e) => {
                    tracing::warn!("Invalid settings file: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Cannot read settings file: {}, using defaults", e);
                Self::default()
            }
        }
    }

    /// 保存设置到默认位置
    pub fn save(&self) -> Result<()> {
        let path = Self::settings_path().context("Config directory unavailable")?;
        self.save_to(&path)
    }

    /// 保存设置到指定文件
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let content = serde_json::to_string_pretty(self).context("Failed to serialize settings")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write settings file {:?}", path))?;

        tracing::info!("Settings saved: {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = GameSettings::default();
        assert_eq!(settings.default_difficulty, Difficulty::Medium);
        assert_eq!(settings.ai_backend, AiBackend::Search);
        assert!(settings.show_move_hints);
        assert_eq!(settings.log_level, LogLevel::Warn);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("settings.json");

        let mut settings = GameSettings::default();
        settings.default_difficulty = Difficulty::Hard;
        settings.ai_backend = AiBackend::Predictor;
        settings.ai_move_delay_ms = 0;
        settings.predictor.model = "tiny".to_string();
        settings.save_to(&path).unwrap();

        let loaded = GameSettings::load_from(&path);
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let loaded = GameSettings::load_from(&temp_dir.path().join("absent.json"));
        assert_eq!(loaded, GameSettings::default());
    }

    #[test]
    fn test_malformed_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert_eq!(GameSettings::load_from(&path), GameSettings::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, r#"{"default_difficulty": "easy"}"#).unwrap();

        let loaded = GameSettings::load_from(&path);
        assert_eq!(loaded.default_difficulty, Difficulty::Easy);
        assert_eq!(loaded.ai_move_delay_ms, 500);
    }

    #[test]
    fn test_log_level_cycle() {
        let mut level = LogLevel::Error;
        for _ in 0..5 {
            level = level.next();
        }
        assert_eq!(level, LogLevel::Error);
        assert_eq!(LogLevel::Debug.directive(), "debug");
    }
}
