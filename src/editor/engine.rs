//! 編集エンジン
//!
//! ドキュメント・カーソル・クリップボード・履歴を一つにまとめ、
//! コマンド単位の編集操作を提供する。
//!
//! 変更を伴う操作は全て、変更前の状態をスナップショットとして取得し、
//! 操作が成功した場合にのみ履歴へ積む。検証は変更より先に行うため、
//! エラー時にはどの状態も変化しない。

use crate::buffer::{Cursor, Document, Line};
use crate::config::EditorConfig;
use crate::editor::clipboard::Clipboard;
use crate::editor::history::{HistoryManager, Snapshot};
use crate::error::{edit::Result, EditError};
use crate::search::{search_document, LiteralMatcher, SearchMatch};

/// カーソル位置を示すマーカー
pub const CURSOR_MARKER: char = '|';

/// 行指向の編集エンジン
#[derive(Debug, Clone)]
pub struct EditEngine {
    document: Document,
    /// ドキュメントが空の間は None
    cursor: Option<Cursor>,
    clipboard: Clipboard,
    history: HistoryManager,
    matcher: LiteralMatcher,
}

impl EditEngine {
    /// 既定設定で空のエンジンを作成
    pub fn new() -> Self {
        Self::with_config(&EditorConfig::default())
    }

    /// 設定を指定して作成
    pub fn with_config(config: &EditorConfig) -> Self {
        Self {
            document: Document::with_unit(config.buffer_unit),
            cursor: None,
            clipboard: Clipboard::new(),
            history: HistoryManager::with_limit(config.history_limit),
            matcher: LiteralMatcher::new(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn cursor(&self) -> Option<Cursor> {
        self.cursor
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    /// カーソルのある行
    pub fn current_line(&self) -> Option<&Line> {
        self.cursor
            .and_then(|cursor| self.document.line_at(cursor.line).ok())
    }

    /// 現在行の末尾に追記する
    ///
    /// 挿入位置はカーソル列ではなく常に行末。追記後カーソルは新しい行末へ移る
    pub fn append(&mut self, text: &str) -> Result<()> {
        if text.is_empty() {
            return Err(EditError::EmptyText);
        }
        let cursor = self.current()?;

        self.commit("append", |engine| {
            let line = engine.document.line_at_mut(cursor.line)?;
            line.append(text)?;
            let end = line.len();
            engine.cursor = Some(Cursor::at(cursor.line, end));
            Ok(())
        })
    }

    /// 現在行の直後に空行を追加し、そこへ移動する
    ///
    /// ドキュメントが空なら唯一の行として追加する
    pub fn add_line(&mut self) -> Result<()> {
        let current = self.cursor;

        self.commit("add_line", |engine| {
            let index = match current {
                Some(cursor) => engine.document.insert_line_after(cursor.line)?,
                None => engine.document.append_line("")?,
            };
            engine.cursor = Some(Cursor::at(index, 0));
            Ok(())
        })
    }

    /// カーソル位置に挿入し、カーソルを挿入文字列の末尾へ進める
    pub fn insert(&mut self, text: &str) -> Result<()> {
        if text.is_empty() {
            return Err(EditError::EmptyText);
        }
        let cursor = self.current()?;
        self.splice_at(cursor, text, "insert")
    }

    /// 行番号と文字位置を指定して挿入する
    ///
    /// 位置の決定も操作の一部として扱うため、アンドゥすると
    /// 挿入前のカーソル位置へ戻る
    pub fn insert_at(&mut self, line: usize, column: usize, text: &str) -> Result<()> {
        if text.is_empty() {
            return Err(EditError::EmptyText);
        }
        self.current()?;
        self.splice_at(Cursor::at(line, column), text, "insert")
    }

    /// カーソル位置から `count` 文字を削除する。カーソルは移動しない
    pub fn delete(&mut self, count: usize) -> Result<()> {
        if count == 0 {
            return Err(EditError::EmptySpan);
        }
        let cursor = self.current()?;

        self.commit("delete", |engine| {
            engine
                .document
                .line_at_mut(cursor.line)?
                .remove_range(cursor.column, count)?;
            Ok(())
        })
    }

    /// カーソル位置から上書きし、カーソルを上書き範囲の末尾へ進める
    pub fn replace(&mut self, text: &str) -> Result<()> {
        if text.is_empty() {
            return Err(EditError::EmptyText);
        }
        let cursor = self.current()?;

        self.commit("replace", |engine| {
            engine
                .document
                .line_at_mut(cursor.line)?
                .overwrite_at(cursor.column, text)?;
            engine.cursor = Some(Cursor::at(
                cursor.line,
                cursor.column + text.chars().count(),
            ));
            Ok(())
        })
    }

    /// カーソル位置から `count` 文字をクリップボードへコピーする
    ///
    /// 履歴には記録しない
    pub fn copy(&mut self, count: usize) -> Result<String> {
        if count == 0 {
            return Err(EditError::EmptySpan);
        }
        let cursor = self.current()?;

        let copied = self
            .document
            .line_at(cursor.line)?
            .slice(cursor.column, count)?;
        self.clipboard.store(copied.clone());
        log::debug!("copied {} characters to clipboard", count);
        Ok(copied)
    }

    /// カーソル位置から `count` 文字を切り取ってクリップボードへ格納する
    pub fn cut(&mut self, count: usize) -> Result<String> {
        if count == 0 {
            return Err(EditError::EmptySpan);
        }
        let cursor = self.current()?;

        self.commit("cut", |engine| {
            let removed = engine
                .document
                .line_at_mut(cursor.line)?
                .remove_range(cursor.column, count)?;
            engine.clipboard.store(removed.clone());
            Ok(removed)
        })
    }

    /// クリップボードの内容をカーソル位置に挿入する
    pub fn paste(&mut self) -> Result<()> {
        let text = self
            .clipboard
            .content()
            .ok_or(EditError::EmptyClipboard)?
            .to_string();
        let cursor = self.current()?;
        self.splice_at(cursor, &text, "paste")
    }

    /// 全行から `pattern` の出現位置を探す
    pub fn search(&self, pattern: &str) -> Result<Vec<SearchMatch>> {
        if pattern.is_empty() {
            return Err(EditError::EmptyText);
        }
        Ok(search_document(&self.document, pattern, &self.matcher))
    }

    /// 直前の変更を取り消す
    pub fn undo(&mut self) -> Result<()> {
        self.history.undo(&mut self.document, &mut self.cursor)
    }

    /// 取り消した変更をやり直す
    pub fn redo(&mut self) -> Result<()> {
        self.history.redo(&mut self.document, &mut self.cursor)
    }

    /// カーソルを移動する（履歴には記録しない）
    pub fn move_cursor(&mut self, line: usize, column: usize) -> Result<()> {
        let mut cursor = self.current()?;
        cursor.move_to(line, column, &self.document)?;
        self.cursor = Some(cursor);
        Ok(())
    }

    /// ドキュメントを読み込んだ行で置き換える
    ///
    /// 新しいドキュメントを完全に構築してから差し替えるため、
    /// 失敗時は現在の内容が残る。読み込みもアンドゥできる
    pub fn load_lines<I, S>(&mut self, lines: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let loaded = Document::from_lines(lines, self.document.unit())?;

        self.commit("load", |engine| {
            engine.cursor = if loaded.is_empty() {
                None
            } else {
                Some(Cursor::at(0, 0))
            };
            engine.document = loaded;
            Ok(())
        })
    }

    /// 保存用に各行の文字列を取り出す
    pub fn export_lines(&self) -> Vec<String> {
        self.document.to_strings()
    }

    /// 全行を表示用に整形する。現在行にはカーソル位置にマーカーを入れる
    pub fn render_text(&self) -> String {
        let mut output = String::new();
        for (index, line) in self.document.lines().enumerate() {
            match self.cursor {
                Some(cursor) if cursor.line == index => {
                    for (position, ch) in line.as_str().chars().enumerate() {
                        if position == cursor.column {
                            output.push(CURSOR_MARKER);
                        }
                        output.push(ch);
                    }
                    if cursor.column >= line.len() {
                        output.push(CURSOR_MARKER);
                    }
                }
                _ => output.push_str(line.as_str()),
            }
            output.push('\n');
        }
        output
    }

    fn current(&self) -> Result<Cursor> {
        self.cursor.ok_or(EditError::EmptyDocument)
    }

    /// 指定位置へ挿入（insert / insert_at / paste 共通）
    ///
    /// 移動は commit の内側で行うので、履歴には移動前のカーソルが残る
    fn splice_at(&mut self, target: Cursor, text: &str, operation: &str) -> Result<()> {
        self.commit(operation, |engine| {
            let mut cursor = engine.current()?;
            cursor.move_to(target.line, target.column, &engine.document)?;
            engine
                .document
                .line_at_mut(cursor.line)?
                .insert_at(cursor.column, text)?;
            engine.cursor = Some(Cursor::at(
                cursor.line,
                cursor.column + text.chars().count(),
            ));
            Ok(())
        })
    }

    /// 変更前の状態を取得してから編集を行い、成功時のみ履歴へ積む
    fn commit<T>(
        &mut self,
        operation: &str,
        edit: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        let before = Snapshot::capture(&self.document, self.cursor);
        match edit(self) {
            Ok(value) => {
                self.history.record(before);
                log::debug!("{} applied, cursor now {:?}", operation, self.cursor);
                Ok(value)
            }
            Err(err) => {
                log::debug!("{} rejected: {}", operation, err);
                Err(err)
            }
        }
    }
}

impl Default for EditEngine {
    fn default() -> Self {
        Self::new()
    }
}
