//! 行バッファ実装
//!
//! 一行分のテキストを保持する可変長バッファ。
//! 位置は文字単位、容量はUTF-8バイト単位で扱う。

use crate::config::DEFAULT_BUFFER_UNIT;
use crate::error::{edit::Result, EditError};
use std::fmt;

/// 一行分のテキストバッファ
///
/// 容量は拡張単位ごとに増加し、セッション中に縮小することはない
#[derive(Debug)]
pub struct Line {
    /// テキスト本体
    text: String,
    /// 拡張単位（バイト）
    unit: usize,
}

impl Line {
    /// 拡張単位分の容量を持つ空行を作成
    pub fn new(unit: usize) -> Self {
        let unit = unit.max(1);
        Self {
            text: String::with_capacity(unit),
            unit,
        }
    }

    /// 文字列から行を作成
    pub fn from_text(text: &str, unit: usize) -> Result<Self> {
        let mut line = Self::new(unit);
        line.append(text)?;
        Ok(line)
    }

    /// 文字数
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// バイト数
    pub fn len_bytes(&self) -> usize {
        self.text.len()
    }

    /// 空かどうか
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// 確保済み容量（バイト）
    pub fn capacity(&self) -> usize {
        self.text.capacity()
    }

    /// 拡張単位
    pub fn unit(&self) -> usize {
        self.unit
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// 現在の長さ + `additional` バイトを保持できるよう容量を確保
    ///
    /// 必要量ちょうどではなく拡張単位の倍数だけ増やす
    pub fn ensure_capacity(&mut self, additional: usize) -> Result<()> {
        let required = self.text.len().saturating_add(additional);
        let capacity = self.text.capacity();
        if capacity >= required {
            return Ok(());
        }

        let increments = (required - capacity).div_ceil(self.unit);
        let target = capacity.saturating_add(increments.saturating_mul(self.unit));

        self.text
            .try_reserve_exact(target - self.text.len())
            .map_err(|_| EditError::Allocation { requested: target })?;

        log::trace!("line buffer grew from {} to {} bytes", capacity, self.text.capacity());
        Ok(())
    }

    /// 末尾に追記
    pub fn append(&mut self, text: &str) -> Result<()> {
        self.ensure_capacity(text.len())?;
        self.text.push_str(text);
        Ok(())
    }

    /// 指定位置に挿入し、後続を右へずらす
    pub fn insert_at(&mut self, position: usize, text: &str) -> Result<()> {
        let byte_pos = self.byte_offset(position)?;
        self.ensure_capacity(text.len())?;
        self.text.insert_str(byte_pos, text);
        Ok(())
    }

    /// 指定範囲の文字列を取得
    pub fn slice(&self, start: usize, count: usize) -> Result<String> {
        let (begin, end) = self.byte_range(start, count)?;
        Ok(self.text[begin..end].to_string())
    }

    /// 指定範囲を削除し、後続を左へ詰める
    pub fn remove_range(&mut self, start: usize, count: usize) -> Result<String> {
        let (begin, end) = self.byte_range(start, count)?;
        Ok(self.text.drain(begin..end).collect())
    }

    /// 指定位置から上書き
    ///
    /// 行末を越える部分は追記として扱う
    pub fn overwrite_at(&mut self, position: usize, text: &str) -> Result<()> {
        let begin = self.byte_offset(position)?;
        let replaced = text.chars().count().min(self.len() - position);
        let end = self.byte_offset(position + replaced)?;

        let growth = text.len().saturating_sub(end - begin);
        self.ensure_capacity(growth)?;
        self.text.replace_range(begin..end, text);
        Ok(())
    }

    /// 文字位置をバイト位置に変換
    fn byte_offset(&self, position: usize) -> Result<usize> {
        if position == 0 {
            return Ok(0);
        }

        let mut count = 0;
        for (byte_idx, _) in self.text.char_indices() {
            if count == position {
                return Ok(byte_idx);
            }
            count += 1;
        }

        if count == position {
            Ok(self.text.len())
        } else {
            Err(EditError::OutOfBounds {
                position,
                len: count,
            })
        }
    }

    /// `[start, start + count)` のバイト範囲
    fn byte_range(&self, start: usize, count: usize) -> Result<(usize, usize)> {
        let len = self.len();
        match start.checked_add(count) {
            Some(end) if end <= len => Ok((self.byte_offset(start)?, self.byte_offset(end)?)),
            _ => Err(EditError::RangeExceeded { start, count, len }),
        }
    }
}

impl Default for Line {
    fn default() -> Self {
        Self::new(DEFAULT_BUFFER_UNIT)
    }
}

// 複製後も単位境界の容量を保つ
impl Clone for Line {
    fn clone(&self) -> Self {
        let mut text = String::with_capacity(self.text.capacity());
        text.push_str(&self.text);
        Self {
            text,
            unit: self.unit,
        }
    }
}

impl PartialEq for Line {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for Line {}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
