//! ドキュメント
//!
//! 行バッファの順序付き集合

use super::line::Line;
use crate::config::DEFAULT_BUFFER_UNIT;
use crate::error::{edit::Result, EditError};

/// 行の並びとして表現されたテキスト全体
///
/// 空のドキュメントと「空行を一つ持つ」ドキュメントは区別される
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    lines: Vec<Line>,
    /// 新規行に使う拡張単位
    unit: usize,
}

impl Document {
    /// 空のドキュメントを作成
    pub fn new() -> Self {
        Self::with_unit(DEFAULT_BUFFER_UNIT)
    }

    /// 行バッファの拡張単位を指定して作成
    pub fn with_unit(unit: usize) -> Self {
        Self {
            lines: Vec::new(),
            unit: unit.max(1),
        }
    }

    /// 文字列の並びから作成
    pub fn from_lines<I, S>(lines: I, unit: usize) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut document = Self::with_unit(unit);
        for line in lines {
            document.append_line(line.as_ref())?;
        }
        Ok(document)
    }

    pub fn unit(&self) -> usize {
        self.unit
    }

    /// 行数
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// 末尾に行を追加し、そのインデックスを返す
    pub fn append_line(&mut self, text: &str) -> Result<usize> {
        let line = Line::from_text(text, self.unit)?;
        self.lines.push(line);
        Ok(self.lines.len() - 1)
    }

    /// 指定行の直後に空行を挿入し、新しい行のインデックスを返す
    pub fn insert_line_after(&mut self, index: usize) -> Result<usize> {
        self.check_index(index)?;
        self.lines.insert(index + 1, Line::new(self.unit));
        Ok(index + 1)
    }

    /// 指定行を取り除いて返す
    pub fn remove_line(&mut self, index: usize) -> Result<Line> {
        self.check_index(index)?;
        Ok(self.lines.remove(index))
    }

    /// 指定行への参照
    pub fn line_at(&self, index: usize) -> Result<&Line> {
        let count = self.lines.len();
        self.lines
            .get(index)
            .ok_or(EditError::IndexOutOfBounds { index, count })
    }

    /// 指定行への可変参照
    pub fn line_at_mut(&mut self, index: usize) -> Result<&mut Line> {
        let count = self.lines.len();
        self.lines
            .get_mut(index)
            .ok_or(EditError::IndexOutOfBounds { index, count })
    }

    /// 全行を破棄
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// 行の反復子
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.iter()
    }

    /// 各行の文字列
    pub fn to_strings(&self) -> Vec<String> {
        self.lines.iter().map(|line| line.as_str().to_string()).collect()
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.lines.len() {
            Ok(())
        } else {
            Err(EditError::IndexOutOfBounds {
                index,
                count: self.lines.len(),
            })
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
