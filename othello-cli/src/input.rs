//! 命令行输入解析

use othello_core::{Notation, OthelloError, Position};

/// 玩家在对局中可输入的命令
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// 落子，代数记法（D3）或线性索引（19）
    Move(Position),
    /// 弃权（仅在无合法落子时有效）
    Pass,
    /// 列出合法落子
    Help,
    /// 悔棋
    Undo,
    /// 退出当前对局
    Quit,
}

impl Command {
    /// 解析一行输入，大小写不敏感
    pub fn parse(line: &str) -> Result<Command, OthelloError> {
        let trimmed = line.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "pass" => Ok(Command::Pass),
            "help" | "?" | "h" => Ok(Command::Help),
            "undo" | "u" => Ok(Command::Undo),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            _ => Notation::parse_any(trimmed).map(Command::Move),
        }
    }
}
