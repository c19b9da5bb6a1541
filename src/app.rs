//! メインアプリケーション構造体
//!
//! 数値コマンドを受け付けるコンソールのメインループを実装

use crate::config::EditorConfig;
use crate::editor::EditEngine;
use crate::error::{ErrorDisplay, FileError, InputError, LineaError, Result};
use crate::file::{expand_path, is_safe_filename, load_document, save_document, ImportOptions};
use crate::input::{parse_command, parse_number, Command, CommandInput, LineReader, MENU_KEY};
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// 数値入力の最大桁数
const MAX_NUMBER_LEN: usize = 10;
/// コマンド入力の最大長
const MAX_COMMAND_LEN: usize = 8;

/// メインアプリケーション構造体
///
/// 入出力を抽象化しているため、テストでは文字列をそのまま流し込める
pub struct App<R: BufRead, W: Write> {
    /// 編集エンジン
    engine: EditEngine,
    /// エディタ設定
    config: EditorConfig,
    /// 入力
    input: LineReader<R>,
    /// 出力
    output: W,
    /// アプリケーション実行状態
    running: bool,
}

impl<R: BufRead, W: Write> App<R, W> {
    /// 新しいアプリケーションインスタンスを作成
    pub fn new(config: EditorConfig, reader: R, writer: W) -> Self {
        Self {
            engine: EditEngine::with_config(&config),
            config,
            input: LineReader::new(reader),
            output: writer,
            running: true,
        }
    }

    pub fn engine(&self) -> &EditEngine {
        &self.engine
    }

    /// アプリケーションが実行中かどうかを確認
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// アプリケーションを終了状態にする
    pub fn shutdown(&mut self) {
        self.running = false;
    }

    /// 出力先を取り出す
    pub fn into_output(self) -> W {
        self.output
    }

    /// メインループを実行
    ///
    /// 終了コマンドか入力の終端で戻る
    pub fn run(&mut self) -> Result<()> {
        writeln!(
            self.output,
            "Welcome! Enter '{}' to see available commands.",
            MENU_KEY
        )?;

        while self.running {
            writeln!(self.output, "Please, choose your command: ")?;
            self.output.flush()?;

            let outcome = self
                .input
                .read_limited(MAX_COMMAND_LEN)
                .map_err(|e| match e {
                    InputError::TooLong { .. } => InputError::InvalidCommand {
                        input: String::new(),
                    },
                    other => other,
                })
                .and_then(|line| parse_command(&line))
                .map_err(LineaError::from)
                .and_then(|request| match request {
                    CommandInput::Menu => {
                        write!(self.output, "{}", Command::menu_text())?;
                        Ok(())
                    }
                    CommandInput::Run(command) => self.execute(command),
                });

            match outcome {
                Ok(()) => {}
                Err(LineaError::Input(InputError::EndOfInput)) => {
                    log::info!("input closed, leaving main loop");
                    self.shutdown();
                }
                Err(err) => self.report(&err)?,
            }
        }

        self.output.flush()?;
        Ok(())
    }

    /// コマンドを一つ実行
    pub fn execute(&mut self, command: Command) -> Result<()> {
        log::debug!(
            "executing command {} (mutating: {})",
            command.code(),
            command.is_mutating()
        );

        match command {
            Command::Append => {
                let text = self.prompt_text("Enter text to append", self.config.max_read_width)?;
                self.engine.append(&text)?;
                writeln!(self.output, "Text appended.")?;
            }
            Command::NewLine => {
                self.engine.add_line()?;
                writeln!(self.output, "New line is started!")?;
            }
            Command::Save => self.save()?,
            Command::Load => self.load()?,
            Command::Print => self.print()?,
            Command::Insert => {
                let (line, position) = self.prompt_position()?;
                let text = self.prompt_text("Enter text to insert", self.config.max_payload_len)?;
                self.engine.insert_at(line, position, &text)?;
                writeln!(self.output, "Text inserted.")?;
            }
            Command::Search => self.search()?,
            Command::Delete => {
                let count = self.prompt_number("Choose the number of symbols to delete:")?;
                self.engine.delete(count)?;
                writeln!(self.output, "Deleted {} symbols.", count)?;
            }
            Command::Replace => {
                let text = self.prompt_text("Enter text to replace with", self.config.max_payload_len)?;
                self.engine.replace(&text)?;
                writeln!(self.output, "Text replaced.")?;
            }
            Command::Copy => {
                let count = self.prompt_number("Choose the number of symbols to copy:")?;
                let copied = self.engine.copy(count)?;
                writeln!(self.output, "Copied: {}", copied)?;
            }
            Command::Paste => {
                self.engine.paste()?;
                writeln!(self.output, "Text pasted.")?;
            }
            Command::Cut => {
                let count = self.prompt_number("Choose the number of symbols to cut:")?;
                let removed = self.engine.cut(count)?;
                writeln!(self.output, "Cut: {}", removed)?;
            }
            Command::Undo => {
                self.engine.undo()?;
                writeln!(self.output, "Undone.")?;
            }
            Command::Redo => {
                self.engine.redo()?;
                writeln!(self.output, "Redone.")?;
            }
            Command::MoveCursor => self.move_cursor()?,
            Command::Exit => {
                writeln!(self.output, "Okay, bye!")?;
                self.shutdown();
            }
        }

        Ok(())
    }

    fn save(&mut self) -> Result<()> {
        let path = self.prompt_path("Enter the file name for saving:")?;
        save_document(&path, &self.engine.export_lines())?;
        writeln!(
            self.output,
            "Text has been saved successfully to {}",
            path.display()
        )?;
        Ok(())
    }

    fn load(&mut self) -> Result<()> {
        let path = self.prompt_path("Enter the file name for loading:")?;
        let lines = load_document(&path, ImportOptions::from_config(&self.config))?;
        let count = lines.len();
        self.engine.load_lines(lines)?;
        writeln!(
            self.output,
            "Text has been loaded successfully from {} ({} lines)",
            path.display(),
            count
        )?;
        Ok(())
    }

    fn print(&mut self) -> Result<()> {
        match self.engine.cursor() {
            Some(cursor) => {
                write!(self.output, "{}", self.engine.render_text())?;
                writeln!(self.output, "Cursor: {}", cursor)?;
            }
            None => writeln!(self.output, "The text is empty.")?,
        }
        Ok(())
    }

    fn search(&mut self) -> Result<()> {
        let pattern = self.prompt_text("Enter text to search", self.config.max_payload_len)?;
        let matches = self.engine.search(&pattern)?;
        if matches.is_empty() {
            writeln!(self.output, "Text not found.")?;
        }
        for found in matches {
            writeln!(self.output, "Text is present in this position: {}", found)?;
        }
        Ok(())
    }

    fn move_cursor(&mut self) -> Result<()> {
        let (line, position) = self.prompt_position()?;
        self.engine.move_cursor(line, position)?;
        if let Some(cursor) = self.engine.cursor() {
            writeln!(self.output, "Cursor moved to {}", cursor)?;
        }
        Ok(())
    }

    /// 1始まりの行と位置を読み、0始まりにして返す
    fn prompt_position(&mut self) -> Result<(usize, usize)> {
        let line = self.prompt_number("Enter the line number:")?;
        let position = self.prompt_number("Enter the position:")?;

        match (line.checked_sub(1), position.checked_sub(1)) {
            (Some(line), Some(position)) => Ok((line, position)),
            _ => Err(LineaError::Input(InputError::InvalidArgument {
                arg: "line and position start at 1".to_string(),
            })),
        }
    }

    fn prompt_text(&mut self, message: &str, max: usize) -> Result<String> {
        writeln!(
            self.output,
            "{} (no more than {} characters):",
            message, max
        )?;
        self.output.flush()?;
        Ok(self.input.read_text(max)?)
    }

    fn prompt_number(&mut self, message: &str) -> Result<usize> {
        writeln!(self.output, "{}", message)?;
        self.output.flush()?;
        let line = self.input.read_limited(MAX_NUMBER_LEN)?;
        Ok(parse_number(&line)?)
    }

    fn prompt_path(&mut self, message: &str) -> Result<PathBuf> {
        writeln!(self.output, "{}", message)?;
        self.output.flush()?;
        let name = self.input.read_text(self.config.max_filename_len)?;
        if !is_safe_filename(&name) {
            return Err(LineaError::File(FileError::InvalidPath { path: name }));
        }
        expand_path(&name)
    }

    fn report(&mut self, error: &LineaError) -> Result<()> {
        let display = ErrorDisplay::new(error);
        log::debug!("command failed: {:?}", error);
        writeln!(self.output, "{}", display.render())?;
        Ok(())
    }
}
