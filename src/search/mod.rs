//! 検索モジュール
//!
//! ドキュメント全体に対するリテラル検索

pub mod matcher;

pub use matcher::{LiteralMatcher, StringMatcher};

use crate::buffer::Document;
use std::fmt;

/// 検索マッチ（0ベース、表示は1ベース）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchMatch {
    /// 行番号
    pub line: usize,
    /// 行内の文字位置
    pub column: usize,
}

impl SearchMatch {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SearchMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, position {}", self.line + 1, self.column + 1)
    }
}

/// 全行を走査し、行順・行内左から右の順でマッチを返す
pub fn search_document<M: StringMatcher>(
    document: &Document,
    pattern: &str,
    matcher: &M,
) -> Vec<SearchMatch> {
    document
        .lines()
        .enumerate()
        .flat_map(|(line_index, line)| {
            matcher
                .find_matches(line.as_str(), pattern)
                .into_iter()
                .map(move |column| SearchMatch::new(line_index, column))
        })
        .collect()
}
