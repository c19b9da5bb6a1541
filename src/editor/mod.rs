//! エディタモジュール
//!
//! 編集エンジン、クリップボード、編集履歴の統合モジュール

pub mod clipboard;
pub mod engine;
pub mod history;

// 公開API
pub use clipboard::Clipboard;
pub use engine::{EditEngine, CURSOR_MARKER};
pub use history::{HistoryManager, Snapshot};

// bufferモジュールの型を再エクスポート
pub use crate::buffer::{Cursor, Document, Line};
pub use crate::error::EditError;
