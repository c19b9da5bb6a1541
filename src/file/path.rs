//! パス処理ユーティリティ
//!
//! 入力されたファイル名のホームディレクトリ・環境変数展開

use crate::error::{FileError, LineaError, Result};
use std::path::PathBuf;

/// `~` と `$VAR` を展開してパスに変換
pub fn expand_path(input: &str) -> Result<PathBuf> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(LineaError::File(FileError::InvalidPath {
            path: input.to_string(),
        }));
    }

    match shellexpand::full(trimmed) {
        Ok(expanded) => Ok(PathBuf::from(expanded.as_ref())),
        Err(e) => Err(LineaError::Path(format!("failed to expand {}: {}", trimmed, e))),
    }
}

/// パスが安全かどうかチェック（制御文字を含まない）
pub fn is_safe_filename(name: &str) -> bool {
    !name.chars().any(|c| c == '\0' || c == '\r' || c == '\n')
}
