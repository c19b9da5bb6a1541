//! カーソル位置管理
//!
//! ドキュメント内の (行, 文字) 位置を管理する

use super::document::Document;
use crate::error::{edit::Result, EditError};
use std::fmt;

/// カーソル位置を表現する構造体
///
/// 内部は0ベース、表示は1ベース。
/// `column` は行長と等しくてもよい（最終文字の直後）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    /// 行番号（0ベース）
    pub line: usize,
    /// 列番号（0ベース、文字単位）
    pub column: usize,
}

impl Cursor {
    /// 指定位置にカーソルを作成（検証なし）
    pub fn at(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// ドキュメントに対して位置が有効か判定
    pub fn validate(&self, document: &Document) -> bool {
        document
            .line_at(self.line)
            .map(|line| self.column <= line.len())
            .unwrap_or(false)
    }

    /// 検証してから移動。失敗時は位置を変更しない
    pub fn move_to(&mut self, line: usize, column: usize, document: &Document) -> Result<()> {
        let len = document.line_at(line)?.len();
        if column > len {
            return Err(EditError::OutOfBounds {
                position: column,
                len,
            });
        }

        self.line = line;
        self.column = column;
        Ok(())
    }

    /// 表示用の1ベース座標
    pub fn display_position(&self) -> (usize, usize) {
        (self.line + 1, self.column + 1)
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (line, column) = self.display_position();
        write!(f, "line {}, position {}", line, column)
    }
}
