//! ファイル操作モジュール
//!
//! ドキュメントの読み込み・保存とファイル名の展開

pub mod io;
pub mod path;

// 公開API
pub use io::{load_document, save_document, FileReader, FileSaver, ImportOptions};
pub use path::{expand_path, is_safe_filename};
