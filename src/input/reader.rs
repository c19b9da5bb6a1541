//! 行入力リーダー
//!
//! コンソール入力を一行ずつ読み取り、長さ制限を検証する

use crate::error::InputError;
use std::io::BufRead;

/// 行単位の入力リーダー
///
/// 長すぎる入力は行末まで読み捨ててからエラーを返すため、
/// 次の読み取りは必ず新しい行から始まる
pub struct LineReader<R: BufRead> {
    reader: R,
    buffer: String,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: String::new(),
        }
    }

    /// 一行読み取り、改行を除いて返す
    pub fn read_line(&mut self) -> std::result::Result<String, InputError> {
        self.buffer.clear();
        let read = self
            .reader
            .read_line(&mut self.buffer)
            .map_err(|e| InputError::Io {
                message: e.to_string(),
            })?;
        if read == 0 {
            return Err(InputError::EndOfInput);
        }

        let text = self.buffer.strip_suffix('\n').unwrap_or(self.buffer.as_str());
        let text = text.strip_suffix('\r').unwrap_or(text);
        Ok(text.to_string())
    }

    /// 最大文字数を指定して一行読み取る
    pub fn read_limited(&mut self, max: usize) -> std::result::Result<String, InputError> {
        let line = self.read_line()?;
        if line.chars().count() > max {
            log::debug!("rejected input of {} characters (max {})", line.chars().count(), max);
            return Err(InputError::TooLong { max });
        }
        Ok(line)
    }

    /// 空でない文字列を最大文字数付きで読み取る
    pub fn read_text(&mut self, max: usize) -> std::result::Result<String, InputError> {
        let line = self.read_limited(max)?;
        if line.is_empty() {
            return Err(InputError::Empty);
        }
        Ok(line)
    }
}
