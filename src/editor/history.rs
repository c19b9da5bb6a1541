//! 編集履歴
//!
//! ドキュメントとカーソルの完全なスナップショットによるアンドゥ/リドゥ

use crate::buffer::{Cursor, Document};
use crate::config::DEFAULT_HISTORY_LIMIT;
use crate::error::{edit::Result, EditError};

/// 履歴エントリ（変更直前の状態の深いコピー）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub document: Document,
    pub cursor: Option<Cursor>,
}

impl Snapshot {
    pub fn capture(document: &Document, cursor: Option<Cursor>) -> Self {
        Self {
            document: document.clone(),
            cursor,
        }
    }
}

/// アンドゥ/リドゥスタック
#[derive(Debug, Clone)]
pub struct HistoryManager {
    undo: Vec<Snapshot>,
    redo: Vec<Snapshot>,
    limit: usize,
}

impl HistoryManager {
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }

    /// アンドゥ履歴の最大保持数を指定
    pub fn with_limit(limit: usize) -> Self {
        Self {
            undo: Vec::new(),
            redo: Vec::new(),
            limit: limit.max(1),
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }

    /// 変更前の状態を記録し、リドゥ履歴を破棄する
    pub fn snapshot(&mut self, document: &Document, cursor: Option<Cursor>) {
        self.record(Snapshot::capture(document, cursor));
    }

    /// 取得済みのスナップショットを積む
    ///
    /// 操作の成功が確定してから呼ぶことで、失敗した操作は履歴に影響しない
    pub fn record(&mut self, snapshot: Snapshot) {
        self.undo.push(snapshot);
        if self.undo.len() > self.limit {
            self.undo.remove(0);
            log::trace!("undo stack trimmed to {} entries", self.limit);
        }
        if !self.redo.is_empty() {
            log::trace!("discarding {} redo entries", self.redo.len());
            self.redo.clear();
        }
    }

    /// 現在の状態をリドゥへ積み、アンドゥ先頭の状態を復元
    pub fn undo(&mut self, document: &mut Document, cursor: &mut Option<Cursor>) -> Result<()> {
        let previous = self.undo.pop().ok_or(EditError::NothingToUndo)?;
        let current = Self::swap_in(previous, document, cursor);
        self.redo.push(current);
        log::debug!(
            "undo applied (undo depth {}, redo depth {})",
            self.undo.len(),
            self.redo.len()
        );
        Ok(())
    }

    /// アンドゥの逆操作
    pub fn redo(&mut self, document: &mut Document, cursor: &mut Option<Cursor>) -> Result<()> {
        let next = self.redo.pop().ok_or(EditError::NothingToRedo)?;
        let current = Self::swap_in(next, document, cursor);
        self.undo.push(current);
        log::debug!(
            "redo applied (undo depth {}, redo depth {})",
            self.undo.len(),
            self.redo.len()
        );
        Ok(())
    }

    /// スナップショットをライブ状態と入れ替え、旧ライブ状態を返す
    fn swap_in(
        snapshot: Snapshot,
        document: &mut Document,
        cursor: &mut Option<Cursor>,
    ) -> Snapshot {
        let Snapshot {
            document: restored,
            cursor: restored_cursor,
        } = snapshot;

        let live_document = std::mem::replace(document, restored);
        let live_cursor = std::mem::replace(cursor, restored_cursor);

        // 空のドキュメントではカーソルを持たない
        if document.is_empty() {
            *cursor = None;
        }

        Snapshot {
            document: live_document,
            cursor: live_cursor,
        }
    }
}

impl Default for HistoryManager {
    fn default() -> Self {
        Self::new()
    }
}
