//! エラーハンドリングシステム
//!
//! linea 全体で使用される統一されたエラー型とユーティリティを定義
//! 編集エラーは全て回復可能で、プロセスを終了させない

use thiserror::Error;

/// アプリケーション全体のエラー型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LineaError {
    /// ファイル操作エラー
    #[error("File operation failed: {0}")]
    File(#[from] FileError),

    /// 編集操作エラー
    #[error("{0}")]
    Edit(#[from] EditError),

    /// 入力処理エラー
    #[error("{0}")]
    Input(#[from] InputError),

    /// 設定エラー
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// パスエラー
    #[error("Path error: {0}")]
    Path(String),
}

/// ファイル操作固有のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FileError {
    #[error("File not found: {path}")]
    NotFound { path: String },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("Invalid path: {path}")]
    InvalidPath { path: String },

    #[error("Encoding error: {message}")]
    Encoding { message: String },

    #[error("IO error: {message}")]
    Io { message: String },
}

/// 編集操作エラー型
///
/// 全ての編集操作は変更前に検証を行うため、これらのエラーが返された場合
/// ドキュメント・カーソル・クリップボードは変更されていない
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("Memory allocation failed while growing a line to {requested} bytes")]
    Allocation { requested: usize },

    #[error("Line {index} does not exist (document has {count} lines)")]
    IndexOutOfBounds { index: usize, count: usize },

    #[error("Position {position} is out of bounds for a line of length {len}")]
    OutOfBounds { position: usize, len: usize },

    #[error("Range of {count} characters from position {start} exceeds line length {len}")]
    RangeExceeded { start: usize, count: usize, len: usize },

    #[error("Clipboard is empty")]
    EmptyClipboard,

    #[error("Document is empty")]
    EmptyDocument,

    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Nothing to redo")]
    NothingToRedo,

    #[error("Text must not be empty")]
    EmptyText,

    #[error("Character count must be greater than zero")]
    EmptySpan,
}

/// 入力処理固有のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Invalid command: {input}")]
    InvalidCommand { input: String },

    #[error("Input is longer than {max} characters")]
    TooLong { max: usize },

    #[error("Not a number: {input}")]
    NotANumber { input: String },

    #[error("Invalid argument: {arg}")]
    InvalidArgument { arg: String },

    #[error("Input must not be empty")]
    Empty,

    #[error("Unexpected end of input")]
    EndOfInput,

    #[error("Failed to read input: {message}")]
    Io { message: String },
}

/// 設定固有のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid configuration file {path}: {message}")]
    InvalidFile { path: String, message: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// エラーレベル分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorLevel {
    Warning,
    Error,
}

/// エラー表示情報
///
/// コンソールへ出力する文言とレベルをまとめる
#[derive(Debug, Clone)]
pub struct ErrorDisplay {
    /// エラーメッセージ
    pub message: String,
    /// エラーレベル
    pub level: ErrorLevel,
}

impl ErrorDisplay {
    pub fn new(error: &LineaError) -> Self {
        let (message, level) = Self::format_error(error);
        Self { message, level }
    }

    fn format_error(error: &LineaError) -> (String, ErrorLevel) {
        match error {
            LineaError::Edit(EditError::NothingToUndo)
            | LineaError::Edit(EditError::NothingToRedo)
            | LineaError::Edit(EditError::EmptyClipboard) => {
                (format!("{}.", error), ErrorLevel::Warning)
            }
            LineaError::Edit(EditError::EmptyDocument) => (
                "The text is empty. Start a new line first (command 2).".to_string(),
                ErrorLevel::Warning,
            ),
            LineaError::File(FileError::NotFound { path }) => {
                (format!("File {} was not found.", path), ErrorLevel::Error)
            }
            LineaError::Input(InputError::InvalidCommand { .. }) => (
                "Invalid command! Please, enter a number from the menu.".to_string(),
                ErrorLevel::Error,
            ),
            _ => (format!("Failed. {}.", error), ErrorLevel::Error),
        }
    }

    /// 表示用の一行を作成
    pub fn render(&self) -> String {
        match self.level {
            ErrorLevel::Warning => format!("Warning: {}", self.message),
            ErrorLevel::Error => format!("Error: {}", self.message),
        }
    }
}

/// パニックハンドラの設定
pub fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        let location = panic_info.location().unwrap_or_else(|| {
            std::panic::Location::caller()
        });

        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s
        } else {
            "Unknown panic payload"
        };

        log::error!("panic at {}:{}: {}", location.file(), location.line(), message);
        eprintln!("PANIC at {}:{}: {}", location.file(), location.line(), message);
        eprintln!("Stack trace: {}", std::backtrace::Backtrace::capture());

        std::process::exit(1);
    }));
}

/// プロジェクト標準のResult型
pub type Result<T> = std::result::Result<T, LineaError>;

/// 各モジュール固有のResult型
pub mod file {
    pub type Result<T> = std::result::Result<T, super::FileError>;
}

pub mod edit {
    pub type Result<T> = std::result::Result<T, super::EditError>;
}

// std::io::Error から LineaError への変換
impl From<std::io::Error> for LineaError {
    fn from(error: std::io::Error) -> Self {
        LineaError::File(FileError::from(error))
    }
}

impl From<std::io::Error> for FileError {
    fn from(error: std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::InvalidData => FileError::Encoding {
                message: error.to_string(),
            },
            _ => FileError::Io {
                message: error.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_error_converts_to_linea_error() {
        let error: LineaError = EditError::EmptyClipboard.into();
        assert_eq!(error, LineaError::Edit(EditError::EmptyClipboard));
        assert_eq!(error.to_string(), "Clipboard is empty");
    }

    #[test]
    fn test_error_display_levels() {
        let warning = ErrorDisplay::new(&LineaError::Edit(EditError::NothingToUndo));
        assert_eq!(warning.level, ErrorLevel::Warning);
        assert_eq!(warning.render(), "Warning: Nothing to undo.");

        let error = ErrorDisplay::new(&LineaError::Edit(EditError::RangeExceeded {
            start: 2,
            count: 10,
            len: 5,
        }));
        assert_eq!(error.level, ErrorLevel::Error);
        assert!(error.message.contains("exceeds line length 5"));
    }

    #[test]
    fn test_not_found_message() {
        let error = LineaError::File(FileError::NotFound {
            path: "notes.txt".to_string(),
        });
        let display = ErrorDisplay::new(&error);
        assert_eq!(display.message, "File notes.txt was not found.");
    }

    #[test]
    fn test_invalid_data_maps_to_encoding_error() {
        let io = std::io::Error::new(std::io::ErrorKind::InvalidData, "bad utf-8");
        let error: LineaError = io.into();
        assert!(matches!(error, LineaError::File(FileError::Encoding { .. })));
    }
}
