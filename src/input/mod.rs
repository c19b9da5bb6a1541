//! 入力処理モジュール
//!
//! コマンドコードの解釈とコンソール入力の読み取り

pub mod commands;
pub mod reader;

// 公開API
pub use commands::{is_integer, parse_command, parse_number, Command, CommandInput, MENU_KEY};
pub use reader::LineReader;
