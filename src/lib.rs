//! linea - 行単位のコンソールテキストエディタ
//!
//! 行バッファ、カーソル、クリップボード、スナップショット方式のundo/redoを持つ

// コアモジュール
pub mod config;
pub mod error;
pub mod logging;

// データ層
pub mod buffer;
pub mod file;

// 編集層
pub mod editor;
pub mod search;

// 入力層
pub mod input;

// アプリケーション
pub mod app;

// 公開API
pub use app::App;
pub use config::EditorConfig;
pub use editor::EditEngine;
pub use error::{LineaError, Result};
