//! 黑白棋终端客户端
//!
//! 纯文本棋盘、键盘输入和本地设置；规则在 othello-core，AI 在 othello-ai。

pub mod input;
pub mod render;
pub mod session;
pub mod settings;

pub use session::{Session, SessionEnd};
pub use settings::{GameSettings, LogLevel};
