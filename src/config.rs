//! エディタ設定
//!
//! バッファ拡張単位や入力長の上限などを保持し、JSONファイルから読み込む

use crate::error::{ConfigError, LineaError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 行バッファの拡張単位
pub const DEFAULT_BUFFER_UNIT: usize = 100;
/// 挿入・置換・検索などの入力文字列の最大長
pub const DEFAULT_MAX_PAYLOAD_LEN: usize = 30;
/// ファイル名の最大長
pub const DEFAULT_MAX_FILENAME_LEN: usize = 20;
/// ファイル読み込み時の一行あたりの最大幅
pub const DEFAULT_MAX_READ_WIDTH: usize = 99;
/// アンドゥ履歴の最大保持数
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// 読み込み幅を超える行の扱い
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LongLinePolicy {
    /// 最大幅で切り詰める
    #[default]
    Truncate,
    /// 複数チャンクを連結して一行として保持する
    Concatenate,
}

/// エディタ設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct EditorConfig {
    pub buffer_unit: usize,
    pub max_payload_len: usize,
    pub max_filename_len: usize,
    pub max_read_width: usize,
    pub history_limit: usize,
    pub long_line_policy: LongLinePolicy,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            buffer_unit: DEFAULT_BUFFER_UNIT,
            max_payload_len: DEFAULT_MAX_PAYLOAD_LEN,
            max_filename_len: DEFAULT_MAX_FILENAME_LEN,
            max_read_width: DEFAULT_MAX_READ_WIDTH,
            history_limit: DEFAULT_HISTORY_LIMIT,
            long_line_policy: LongLinePolicy::Truncate,
        }
    }
}

impl EditorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// JSON文字列から設定を作成
    pub fn from_json(source: &str, origin: &str) -> Result<Self> {
        let config: EditorConfig = serde_json::from_str(source).map_err(|e| {
            ConfigError::InvalidFile {
                path: origin.to_string(),
                message: e.to_string(),
            }
        })?;
        config.validate()?;
        Ok(config)
    }

    /// 設定ファイルを読み込む
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| ConfigError::InvalidFile {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        log::debug!("loading configuration from {}", path.display());
        Self::from_json(&source, &path.display().to_string())
    }

    /// 明示パス、既定パスの順に探し、無ければデフォルト値を返す
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        match default_config_path() {
            Some(path) if path.is_file() => Self::load(path),
            _ => Ok(Self::default()),
        }
    }

    /// 値の妥当性を検証
    pub fn validate(&self) -> Result<()> {
        let checks = [
            ("buffer-unit", self.buffer_unit),
            ("max-payload-len", self.max_payload_len),
            ("max-filename-len", self.max_filename_len),
            ("max-read-width", self.max_read_width),
            ("history-limit", self.history_limit),
        ];

        for (key, value) in checks {
            if value == 0 {
                return Err(LineaError::Config(ConfigError::InvalidValue {
                    key: key.to_string(),
                    value: value.to_string(),
                }));
            }
        }

        Ok(())
    }
}

/// 既定の設定ファイルパス（`<config_dir>/linea/config.json`）
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("linea").join("config.json"))
}
