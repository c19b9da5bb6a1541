//! クリップボード実装

/// 直近のコピー/カット内容を一つだけ保持する
///
/// ペーストでは消費されないため、同じ内容を何度でも貼り付けられる
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Clipboard {
    content: Option<String>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// 内容を丸ごと置き換える
    pub fn store(&mut self, text: String) {
        self.content = Some(text);
    }

    /// 現在の内容
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_none()
    }

    pub fn clear(&mut self) {
        self.content = None;
    }
}
