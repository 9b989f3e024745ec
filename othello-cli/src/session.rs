//! 终端对局会话
//!
//! 主菜单、人机对战、双人对战和设置。输入输出都是泛型的，测试里用内存缓冲驱动。

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use othello_ai::predictor::{AiBackend, HttpPredictor, PredictorEngine};
use othello_ai::{AiConfig, AiEngine, Difficulty};
use othello_core::{
    Game, GameRecord, GameResult, MoveStrategy, Notation, OthelloError, Ply, Side, TurnOutcome,
    TurnStatus,
};
use tracing::{debug, info, warn};

use crate::input::Command;
use crate::render::{side_label, stone, TextBoard};
use crate::settings::GameSettings;

const RULES: &str = "\
黑白棋规则
  目标：终局时棋子多的一方获胜。
  1. 每回合在一个空格落一子，黑方先行。
  2. 落子必须在至少一个方向上夹住对方连续的棋子。
  3. 被夹住的棋子全部翻成己方颜色。
  4. 没有合法落子时必须停一手。
  5. 双方都无子可下时对局结束。
  提示：角上的棋子不会被翻转；角旁的格子容易把角送给对方。";

/// 对局结束方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// 正常终局
    Finished(GameResult),
    /// 玩家退出或输入结束
    Quit,
}

/// 终端会话
pub struct Session<R, W> {
    input: R,
    output: W,
    settings: GameSettings,
    /// 设置文件路径；None 时不保存
    settings_path: Option<PathBuf>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W, settings: GameSettings) -> Self {
        Self {
            input,
            output,
            settings,
            settings_path: None,
        }
    }

    /// 修改设置后保存到该路径
    pub fn with_settings_path(mut self, path: Option<PathBuf>) -> Self {
        self.settings_path = path;
        self
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// 读取一行；输入结束时返回 None
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        self.read_line()
    }

    /// 主菜单循环
    pub fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.output)?;
            writeln!(self.output, "黑白棋 8x8")?;
            writeln!(self.output, "========================================")?;
            writeln!(self.output, "1. 人机对战")?;
            writeln!(self.output, "2. 双人对战")?;
            writeln!(self.output, "3. 游戏规则")?;
            writeln!(self.output, "4. 设置")?;
            writeln!(self.output, "5. 退出")?;

            let Some(choice) = self.prompt("请选择 (1-5): ")? else {
                return Ok(());
            };

            match choice.as_str() {
                "1" => {
                    self.play_vs_ai()?;
                }
                "2" => {
                    self.play_two_players()?;
                }
                "3" => writeln!(self.output, "{}", RULES)?,
                "4" => self.settings_menu()?,
                "5" | "q" | "quit" => {
                    writeln!(self.output, "再见！")?;
                    return Ok(());
                }
                _ => writeln!(self.output, "无效选择！")?,
            }
        }
    }

    /// 人机对战，玩家执黑先行
    pub fn play_vs_ai(&mut self) -> Result<SessionEnd> {
        let mut opponent = match self.settings.ai_backend {
            AiBackend::Search => {
                let Some(difficulty) = self.choose_difficulty()? else {
                    return Ok(SessionEnd::Quit);
                };
                Box::new(AiEngine::new(AiConfig::from_difficulty(difficulty))) as Box<dyn MoveStrategy>
            }
            AiBackend::Predictor => self.predictor_opponent()?,
        };

        writeln!(
            self.output,
            "你执黑 {}，AI 执白 {}。",
            stone(Side::Black),
            stone(Side::White)
        )?;
        writeln!(self.output, "输入落子如 D3 或 19；help 查看合法落子，undo 悔棋，quit 退出。")?;

        let mut game = Game::new();
        let end = self.run_game(&mut game, None, Some(opponent.as_mut()))?;
        self.finish(&game, "玩家", opponent.name())?;
        Ok(end)
    }

    /// 双人对战
    pub fn play_two_players(&mut self) -> Result<SessionEnd> {
        writeln!(self.output, "玩家一：黑方 {}", stone(Side::Black))?;
        writeln!(self.output, "玩家二：白方 {}", stone(Side::White))?;
        writeln!(self.output, "输入落子如 D3 或 19。")?;

        let mut game = Game::new();
        let end = self.run_game(&mut game, None, None)?;
        self.finish(&game, "玩家一", "玩家二")?;
        Ok(end)
    }

    fn choose_difficulty(&mut self) -> Result<Option<Difficulty>> {
        writeln!(self.output, "AI 难度：")?;
        writeln!(self.output, "1. 简单（随机）")?;
        writeln!(self.output, "2. 中等（贪心）")?;
        writeln!(self.output, "3. 困难（两层极小极大）")?;

        let default = self.settings.default_difficulty;
        let Some(choice) = self.prompt(&format!("请选择 (1-3，回车 = {}): ", default))? else {
            return Ok(None);
        };

        let difficulty = if choice.is_empty() {
            default
        } else {
            choice.parse().unwrap_or(default)
        };
        info!("Starting game against {} AI", difficulty);
        Ok(Some(difficulty))
    }

    fn predictor_opponent(&mut self) -> Result<Box<dyn MoveStrategy>> {
        let predictor = HttpPredictor::new(self.settings.predictor.clone())?;
        if let Err(e) = predictor.health_check() {
            warn!("Predictor health check failed: {:#}", e);
            writeln!(
                self.output,
                "预测服务不可用，AI 将随机落子。"
            )?;
        }
        info!("Starting game against predictor {}", self.settings.predictor.model);
        Ok(Box::new(PredictorEngine::new(predictor)))
    }

    /// 对局主循环
    ///
    /// `black` / `white` 为 None 的一方由键盘输入；两方都给出策略时是 AI 自战。
    pub fn run_game<'a>(
        &mut self,
        game: &mut Game,
        mut black: Option<&'a mut dyn MoveStrategy>,
        mut white: Option<&'a mut dyn MoveStrategy>,
    ) -> Result<SessionEnd> {
        let humans = usize::from(black.is_none()) + usize::from(white.is_none());

        loop {
            let side = game.current_turn();
            let status = game.turn_status();

            let hints = match &status {
                TurnStatus::ToMove(moves) if self.settings.show_move_hints => moves.clone(),
                _ => Vec::new(),
            };
            writeln!(self.output)?;
            write!(self.output, "{}", TextBoard::render(game.state(), &hints))?;
            writeln!(self.output, "{}", TextBoard::score_line(game.state()))?;

            let strategy = match side {
                Side::Black => black.as_deref_mut(),
                Side::White => white.as_deref_mut(),
            };

            match status {
                TurnStatus::GameOver(result) => {
                    writeln!(self.output, "{}", Self::result_message(result))?;
                    return Ok(SessionEnd::Finished(result));
                }
                TurnStatus::MustPass => {
                    writeln!(self.output, "{}无子可下，停一手。", side_label(side))?;
                    game.pass()?;
                }
                TurnStatus::ToMove(_) => match strategy {
                    Some(ai) => {
                        if self.settings.ai_move_delay_ms > 0 {
                            std::thread::sleep(Duration::from_millis(self.settings.ai_move_delay_ms));
                        }
                        if let TurnOutcome::Moved(outcome) = game.play_turn(ai)? {
                            writeln!(
                                self.output,
                                "{}落子 {}，翻转 {} 子。",
                                side_label(side),
                                outcome.position,
                                outcome.flipped.len()
                            )?;
                        }
                    }
                    None => {
                        let human_only = humans == 2;
                        if !self.human_turn(game, human_only)? {
                            return Ok(SessionEnd::Quit);
                        }
                    }
                },
            }
        }
    }

    /// 处理一个玩家回合，直到局面改变；返回 false 表示退出
    fn human_turn(&mut self, game: &mut Game, two_players: bool) -> Result<bool> {
        let side = game.current_turn();

        loop {
            let prompt = format!("{} {} 落子: ", side_label(side), stone(side));
            let Some(line) = self.prompt(&prompt)? else {
                return Ok(false);
            };

            let command = match Command::parse(&line) {
                Ok(command) => command,
                Err(_) => {
                    writeln!(self.output, "无效输入！输入 help 查看合法落子。")?;
                    continue;
                }
            };

            match command {
                Command::Move(pos) => match game.play(pos) {
                    Ok(outcome) => {
                        writeln!(
                            self.output,
                            "{}落子 {}，翻转 {} 子。",
                            side_label(side),
                            outcome.position,
                            outcome.flipped.len()
                        )?;
                        return Ok(true);
                    }
                    Err(OthelloError::IllegalMove { .. }) => {
                        writeln!(self.output, "非法落子 {}！输入 help 查看合法落子。", pos)?;
                    }
                    Err(e) => writeln!(self.output, "{}", e)?,
                },
                Command::Pass => match game.pass() {
                    Ok(()) => return Ok(true),
                    Err(_) => writeln!(self.output, "你还有合法落子，不能停一手。")?,
                },
                Command::Help => {
                    let moves: Vec<String> = game
                        .legal_moves()
                        .into_iter()
                        .map(Notation::to_algebraic)
                        .collect();
                    writeln!(self.output, "合法落子：{}", moves.join(" "))?;
                }
                Command::Undo => {
                    if self.undo(game, side, two_players) {
                        return Ok(true);
                    }
                    writeln!(self.output, "没有可悔的棋。")?;
                }
                Command::Quit => return Ok(false),
            }
        }
    }

    /// 悔棋：双人模式退一手，人机模式退回到玩家上一次落子之前
    fn undo(&mut self, game: &mut Game, human: Side, two_players: bool) -> bool {
        if two_players {
            return game.undo().is_some();
        }

        let mut undone = false;
        while let Some(ply) = game.undo() {
            undone = true;
            if matches!(ply, Ply::Move { side, .. } if side == human) {
                break;
            }
        }
        debug!("Undo to ply {}", game.history().len());
        undone
    }

    fn result_message(result: GameResult) -> String {
        match result {
            GameResult::BlackWin => "对局结束：黑方胜！".to_string(),
            GameResult::WhiteWin => "对局结束：白方胜！".to_string(),
            GameResult::Draw => "对局结束：平局。".to_string(),
        }
    }

    /// 对局结束后输出棋谱
    fn finish(&mut self, game: &Game, black_player: &str, white_player: &str) -> Result<()> {
        let record = GameRecord::from_game(game, black_player.to_string(), white_player.to_string());
        let transcript = record.to_transcript()?;
        if !transcript.is_empty() {
            writeln!(self.output, "棋谱：{}", transcript)?;
        }
        if let Ok(json) = record.to_json() {
            debug!("Game record: {}", json);
        }
        Ok(())
    }

    /// 设置菜单
    fn settings_menu(&mut self) -> Result<()> {
        loop {
            writeln!(self.output)?;
            writeln!(self.output, "设置")?;
            writeln!(self.output, "1. 默认难度：{}", self.settings.default_difficulty)?;
            writeln!(
                self.output,
                "2. AI 后端：{}",
                match self.settings.ai_backend {
                    AiBackend::Search => "本地搜索",
                    AiBackend::Predictor => "预测器",
                }
            )?;
            writeln!(
                self.output,
                "3. 落子提示：{}",
                if self.settings.show_move_hints { "开" } else { "关" }
            )?;
            writeln!(self.output, "4. 日志级别：{}", self.settings.log_level.display_name())?;
            writeln!(self.output, "5. 返回")?;

            let Some(choice) = self.prompt("请选择 (1-5): ")? else {
                return Ok(());
            };

            match choice.as_str() {
                "1" => {
                    let current = self.settings.default_difficulty;
                    let index = Difficulty::ALL.iter().position(|d| *d == current).unwrap_or(0);
                    self.settings.default_difficulty = Difficulty::ALL[(index + 1) % Difficulty::ALL.len()];
                }
                "2" => {
                    self.settings.ai_backend = match self.settings.ai_backend {
                        AiBackend::Search => AiBackend::Predictor,
                        AiBackend::Predictor => AiBackend::Search,
                    };
                }
                "3" => self.settings.show_move_hints = !self.settings.show_move_hints,
                "4" => self.settings.log_level = self.settings.log_level.next(),
                "5" | "" => return Ok(()),
                _ => {
                    writeln!(self.output, "无效选择！")?;
                    continue;
                }
            }

            self.save_settings()?;
        }
    }

    fn save_settings(&mut self) -> Result<()> {
        if let Some(path) = &self.settings_path {
            if let Err(e) = self.settings.save_to(path) {
                warn!("Failed to save settings: {:#}", e);
                writeln!(self.output, "无法保存设置：{:#}", e)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    use othello_core::Position;

    fn settings() -> GameSettings {
        GameSettings {
            ai_move_delay_ms: 0,
            ..GameSettings::default()
        }
    }

    fn session(script: &str) -> Session<Cursor<Vec<u8>>, Vec<u8>> {
        Session::new(Cursor::new(script.as_bytes().to_vec()), Vec::new(), settings())
    }

    fn output(session: Session<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(session.into_output()).unwrap()
    }

    fn pos(row: u8, col: u8) -> Position {
        Position::new_unchecked(row, col)
    }

    #[test]
    fn test_two_players_move_and_quit() {
        let mut s = session("d3\nquit\n");
        let mut game = Game::new();
        let end = s.run_game(&mut game, None, None).unwrap();

        assert_eq!(end, SessionEnd::Quit);
        assert_eq!(game.move_history(), vec![pos(2, 3)]);
        let out = output(s);
        assert!(out.contains("黑方落子 D3，翻转 1 子。"));
        assert!(out.contains("白方 ○ 落子: "));
    }

    #[test]
    fn test_illegal_and_invalid_input() {
        let mut s = session("a1\nzz\npass\nquit\n");
        let mut game = Game::new();
        s.run_game(&mut game, None, None).unwrap();

        assert!(game.history().is_empty());
        let out = output(s);
        assert!(out.contains("非法落子 A1！"));
        assert!(out.contains("无效输入！"));
        assert!(out.contains("不能停一手"));
    }

    #[test]
    fn test_help_lists_legal_moves() {
        let mut s = session("help\nquit\n");
        let mut game = Game::new();
        s.run_game(&mut game, None, None).unwrap();

        assert!(output(s).contains("合法落子：D3 C4 F5 E6"));
    }

    #[test]
    fn test_end_of_input_quits() {
        let mut s = session("");
        let mut game = Game::new();
        assert_eq!(s.run_game(&mut game, None, None).unwrap(), SessionEnd::Quit);
    }

    #[test]
    fn test_ai_replies_to_human() {
        let mut s = session("d3\nquit\n");
        let mut game = Game::new();
        let mut ai = AiEngine::new(AiConfig::from_difficulty(Difficulty::Medium).with_seed(1));
        s.run_game(&mut game, None, Some(&mut ai)).unwrap();

        // 三个应着得分相同，取行优先的第一个 C3
        assert_eq!(game.move_history(), vec![pos(2, 3), pos(2, 2)]);
        assert!(output(s).contains("白方落子 C3"));
    }

    #[test]
    fn test_undo_against_ai_returns_to_human_turn() {
        let mut s = session("d3\nundo\nquit\n");
        let mut game = Game::new();
        let mut ai = AiEngine::new(AiConfig::from_difficulty(Difficulty::Medium).with_seed(1));
        s.run_game(&mut game, None, Some(&mut ai)).unwrap();

        assert!(game.history().is_empty());
        assert_eq!(game.current_turn(), Side::Black);
    }

    #[test]
    fn test_undo_two_players() {
        let mut s = session("d3\nundo\nundo\nquit\n");
        let mut game = Game::new();
        s.run_game(&mut game, None, None).unwrap();

        assert!(game.history().is_empty());
        assert!(output(s).contains("没有可悔的棋。"));
    }

    #[test]
    fn test_ai_vs_ai_finishes() {
        let mut s = session("");
        let mut game = Game::new();
        let mut black = AiEngine::new(AiConfig::from_difficulty(Difficulty::Easy).with_seed(11));
        let mut white = AiEngine::new(AiConfig::from_difficulty(Difficulty::Hard).with_seed(12));

        let end = s.run_game(&mut game, Some(&mut black), Some(&mut white)).unwrap();

        let result = game.result().unwrap();
        assert_eq!(end, SessionEnd::Finished(result));
        assert!(output(s).contains("对局结束"));
    }

    #[test]
    fn test_menu_rules_and_invalid_choice() {
        let mut s = session("3\n9\n5\n");
        s.run().unwrap();

        let out = output(s);
        assert!(out.contains("黑白棋规则"));
        assert!(out.contains("无效选择！"));
        assert!(out.contains("再见！"));
    }

    #[test]
    fn test_menu_vs_ai_with_default_difficulty() {
        let mut s = session("1\n\nd3\nquit\n5\n");
        s.run().unwrap();

        let out = output(s);
        assert!(out.contains("请选择 (1-3，回车 = medium): "));
        assert!(out.contains("黑方落子 D3"));
        assert!(out.contains("棋谱：d3"));
    }

    #[test]
    fn test_settings_menu_saves() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");

        let mut s = session("4\n1\n3\n5\n5\n").with_settings_path(Some(path.clone()));
        s.run().unwrap();

        assert_eq!(s.settings().default_difficulty, Difficulty::Hard);
        assert!(!s.settings().show_move_hints);
        assert_eq!(GameSettings::load_from(&path), *s.settings());
    }
}
