//! バッファ管理モジュール
//!
//! 行バッファ、ドキュメント、カーソル位置を提供

pub mod cursor;
pub mod document;
pub mod line;

// 公開API
pub use cursor::Cursor;
pub use document::Document;
pub use line::Line;
