//! コマンドシステム
//!
//! 数値コマンドコードとエディタ操作の対応

use crate::error::InputError;
use std::fmt;

/// メニュー表示を要求する入力
pub const MENU_KEY: &str = "m";

/// エディタコマンド
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Append,
    NewLine,
    Save,
    Load,
    Print,
    Insert,
    Search,
    Delete,
    Replace,
    Copy,
    Paste,
    Cut,
    Undo,
    Redo,
    MoveCursor,
    Exit,
}

impl Command {
    /// コード順の全コマンド
    pub const ALL: [Command; 16] = [
        Command::Append,
        Command::NewLine,
        Command::Save,
        Command::Load,
        Command::Print,
        Command::Insert,
        Command::Search,
        Command::Delete,
        Command::Replace,
        Command::Copy,
        Command::Paste,
        Command::Cut,
        Command::Undo,
        Command::Redo,
        Command::MoveCursor,
        Command::Exit,
    ];

    /// コマンドコード（1始まり）
    pub fn code(self) -> u32 {
        Self::ALL
            .iter()
            .position(|command| *command == self)
            .map(|index| index as u32 + 1)
            .unwrap_or(0)
    }

    /// コードからコマンドを取得
    pub fn from_code(code: u32) -> Option<Self> {
        let index = usize::try_from(code).ok()?.checked_sub(1)?;
        Self::ALL.get(index).copied()
    }

    /// 最大のコマンドコード
    pub fn max_code() -> u32 {
        Self::ALL.len() as u32
    }

    /// メニュー上の説明
    pub fn description(self) -> &'static str {
        match self {
            Command::Append => "Append text symbols to the end",
            Command::NewLine => "Start a new line",
            Command::Save => "Use files for saving the information",
            Command::Load => "Use files for loading the information",
            Command::Print => "Print the current text to the console",
            Command::Insert => "Insert text at the cursor position",
            Command::Search => "Search",
            Command::Delete => "Delete symbols at the cursor position",
            Command::Replace => "Replace text at the cursor position",
            Command::Copy => "Copy symbols at the cursor position",
            Command::Paste => "Paste at the cursor position",
            Command::Cut => "Cut symbols at the cursor position",
            Command::Undo => "Undo",
            Command::Redo => "Redo",
            Command::MoveCursor => "Move the cursor",
            Command::Exit => "Exit",
        }
    }

    /// ドキュメントを変更するコマンドか
    pub fn is_mutating(self) -> bool {
        matches!(
            self,
            Command::Append
                | Command::NewLine
                | Command::Load
                | Command::Insert
                | Command::Delete
                | Command::Replace
                | Command::Paste
                | Command::Cut
        )
    }

    /// メニュー全体
    pub fn menu_text() -> String {
        let mut menu = String::from("Possible commands:\n");
        for command in Self::ALL {
            menu.push_str(&format!("{}. {}\n", command.code(), command.description()));
        }
        menu.push_str(&format!("Enter '{}' to see this menu again.\n", MENU_KEY));
        menu
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.code(), self.description())
    }
}

/// コマンドプロンプトへの入力の解釈結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandInput {
    /// メニュー表示
    Menu,
    /// コマンド実行
    Run(Command),
}

/// 数字のみから成るか
pub fn is_integer(input: &str) -> bool {
    !input.is_empty() && input.chars().all(|c| c.is_ascii_digit())
}

/// 入力をコマンドとして解釈
pub fn parse_command(input: &str) -> std::result::Result<CommandInput, InputError> {
    let trimmed = input.trim();
    if trimmed == MENU_KEY {
        return Ok(CommandInput::Menu);
    }

    let invalid = || InputError::InvalidCommand {
        input: trimmed.to_string(),
    };

    if !is_integer(trimmed) {
        return Err(invalid());
    }

    trimmed
        .parse::<u32>()
        .ok()
        .and_then(Command::from_code)
        .map(CommandInput::Run)
        .ok_or_else(invalid)
}

/// 非負整数として解釈
pub fn parse_number(input: &str) -> std::result::Result<usize, InputError> {
    let trimmed = input.trim();
    if !is_integer(trimmed) {
        return Err(InputError::NotANumber {
            input: trimmed.to_string(),
        });
    }

    trimmed.parse::<usize>().map_err(|_| InputError::NotANumber {
        input: trimmed.to_string(),
    })
}
