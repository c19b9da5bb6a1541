//! ファイルI/O操作
//!
//! テキストファイルを行の並びとして読み込み、行の並びを保存する。
//! 読み込みは全行の取得が完了してから結果を返すため、
//! 失敗してもエディタ側のドキュメントは変更されない。

use crate::config::{EditorConfig, LongLinePolicy};
use crate::error::{FileError, LineaError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// UTF-8 BOM
const BOM: char = '\u{feff}';

/// 読み込み時の行幅ポリシー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportOptions {
    /// 一行あたりの最大文字数
    pub max_read_width: usize,
    /// 最大幅を超える行の扱い
    pub policy: LongLinePolicy,
}

impl ImportOptions {
    pub fn from_config(config: &EditorConfig) -> Self {
        Self {
            max_read_width: config.max_read_width,
            policy: config.long_line_policy,
        }
    }
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self::from_config(&EditorConfig::default())
    }
}

/// ファイル読み込み処理
#[derive(Debug, Clone, Default)]
pub struct FileReader {
    options: ImportOptions,
}

impl FileReader {
    pub fn new(options: ImportOptions) -> Self {
        Self { options }
    }

    /// ファイルを行単位で読み込む
    pub fn read_lines(&self, path: &Path) -> Result<Vec<String>> {
        if !path.exists() {
            return Err(LineaError::File(FileError::NotFound {
                path: path.display().to_string(),
            }));
        }

        if path.is_dir() {
            return Err(LineaError::File(FileError::InvalidPath {
                path: path.display().to_string(),
            }));
        }

        let file = File::open(path).map_err(|e| io_error(path, e))?;
        let lines = self.read_from(BufReader::new(file)).map_err(|e| match e {
            LineaError::File(FileError::Io { message }) => LineaError::File(FileError::Io {
                message: format!("{}: {}", path.display(), message),
            }),
            other => other,
        })?;

        log::info!("read {} lines from {}", lines.len(), path.display());
        Ok(lines)
    }

    /// 任意のリーダーから行を読み込む
    pub fn read_from<R: BufRead>(&self, mut reader: R) -> Result<Vec<String>> {
        let mut lines = Vec::new();
        let mut raw = String::new();
        let mut truncated = 0usize;

        loop {
            raw.clear();
            let read = reader.read_line(&mut raw).map_err(FileError::from)?;
            if read == 0 {
                break;
            }

            let mut text = strip_line_ending(&raw);
            if lines.is_empty() {
                text = text.strip_prefix(BOM).unwrap_or(text);
            }

            let (fitted, was_truncated) = self.fit_width(text);
            if was_truncated {
                truncated += 1;
            }
            lines.push(fitted);
        }

        if truncated > 0 {
            log::warn!(
                "{} lines were truncated to {} characters",
                truncated,
                self.options.max_read_width
            );
        }

        Ok(lines)
    }

    /// 最大幅ごとのチャンクに分け、ポリシーに従って行を組み立てる
    fn fit_width(&self, text: &str) -> (String, bool) {
        let width = self.options.max_read_width.max(1);
        let chars: Vec<char> = text.chars().collect();
        let mut chunks = chars.chunks(width);

        let mut line: String = chunks.next().map(|c| c.iter().collect()).unwrap_or_default();
        match self.options.policy {
            LongLinePolicy::Truncate => {
                let truncated = chunks.next().is_some();
                (line, truncated)
            }
            LongLinePolicy::Concatenate => {
                for chunk in chunks {
                    line.extend(chunk.iter());
                }
                (line, false)
            }
        }
    }
}

/// ファイル保存処理
#[derive(Debug, Clone)]
pub struct FileSaver {
    atomic_save: bool,
}

impl FileSaver {
    pub fn new() -> Self {
        Self { atomic_save: true }
    }

    /// 一時ファイルを経由しない保存
    pub fn direct() -> Self {
        Self { atomic_save: false }
    }

    /// 各行の末尾に改行を付けて保存
    pub fn save_lines<S: AsRef<str>>(&self, path: &Path, lines: &[S]) -> Result<()> {
        let mut content = String::new();
        for line in lines {
            content.push_str(line.as_ref());
            content.push('\n');
        }

        if self.atomic_save {
            self.atomic_save_impl(path, &content)?;
        } else {
            Self::write_all(path, &content)?;
        }

        log::info!("wrote {} lines to {}", lines.len(), path.display());
        Ok(())
    }

    /// アトミック保存（一時ファイル経由）
    fn atomic_save_impl(&self, path: &Path, content: &str) -> Result<()> {
        let temp_path = generate_temp_path(path)?;
        log::debug!("atomic save via {}", temp_path.display());

        Self::write_all(&temp_path, content)?;

        std::fs::rename(&temp_path, path).map_err(|e| {
            // 一時ファイル削除を試行
            let _ = std::fs::remove_file(&temp_path);
            io_error(path, e)
        })?;

        Ok(())
    }

    fn write_all(path: &Path, content: &str) -> Result<()> {
        let mut file = File::create(path).map_err(|e| io_error(path, e))?;
        file.write_all(content.as_bytes())
            .and_then(|_| file.flush())
            .map_err(|e| io_error(path, e))?;
        Ok(())
    }
}

impl Default for FileSaver {
    fn default() -> Self {
        Self::new()
    }
}

/// ファイル読み込みの便利関数
pub fn load_document<P: AsRef<Path>>(path: P, options: ImportOptions) -> Result<Vec<String>> {
    FileReader::new(options).read_lines(path.as_ref())
}

/// ファイル書き込みの便利関数
pub fn save_document<P: AsRef<Path>, S: AsRef<str>>(path: P, lines: &[S]) -> Result<()> {
    FileSaver::new().save_lines(path.as_ref(), lines)
}

fn strip_line_ending(raw: &str) -> &str {
    let text = raw.strip_suffix('\n').unwrap_or(raw);
    text.strip_suffix('\r').unwrap_or(text)
}

fn generate_temp_path(original: &Path) -> Result<PathBuf> {
    let filename = original.file_name().ok_or_else(|| {
        LineaError::File(FileError::InvalidPath {
            path: original.display().to_string(),
        })
    })?;

    // 一意な一時ファイル名生成
    let temp_name = format!(".{}_{}", filename.to_string_lossy(), std::process::id());

    Ok(match original.parent() {
        Some(parent) => parent.join(temp_name),
        None => PathBuf::from(temp_name),
    })
}

fn io_error(path: &Path, error: std::io::Error) -> LineaError {
    let path = path.display().to_string();
    let file_error = match error.kind() {
        std::io::ErrorKind::NotFound => FileError::NotFound { path },
        std::io::ErrorKind::PermissionDenied => FileError::PermissionDenied { path },
        _ => FileError::Io {
            message: format!("{}: {}", path, error),
        },
    };
    LineaError::File(file_error)
}
