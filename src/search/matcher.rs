//! 検索用マッチャー

/// 文字列マッチング戦略
pub trait StringMatcher {
    /// 一行内のすべてのマッチ開始位置（文字単位）を返す
    fn find_matches(&self, text: &str, pattern: &str) -> Vec<usize>;
}

/// 単純なリテラルマッチャー
///
/// 開始位置が重なるマッチもすべて報告する（"aa" は "aaa" に 0, 1 で一致）
#[derive(Debug, Default, Clone)]
pub struct LiteralMatcher;

impl LiteralMatcher {
    /// インスタンスを作成
    pub fn new() -> Self {
        Self
    }
}

impl StringMatcher for LiteralMatcher {
    fn find_matches(&self, text: &str, pattern: &str) -> Vec<usize> {
        if pattern.is_empty() {
            return Vec::new();
        }

        let chars: Vec<char> = text.chars().collect();
        let pattern_chars: Vec<char> = pattern.chars().collect();

        if pattern_chars.len() > chars.len() {
            return Vec::new();
        }

        let last_start = chars.len() - pattern_chars.len();
        (0..=last_start)
            .filter(|&start| chars[start..start + pattern_chars.len()] == pattern_chars[..])
            .collect()
    }
}
