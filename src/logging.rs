//! ロギングシステム
//!
//! `log` ファサードのバックエンドとして動作する開発者向けロガー

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// ログレベルを指定する環境変数
pub const LOG_ENV_VAR: &str = "LINEA_LOG";

/// ログレベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    fn tag(self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        }
    }

    /// 文字列からログレベルを解釈（未知の値は None）
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warning),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }

    fn to_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Trace => log::LevelFilter::Trace,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warning => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
        }
    }
}

impl From<log::Level> for LogLevel {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Trace => LogLevel::Trace,
            log::Level::Debug => LogLevel::Debug,
            log::Level::Info => LogLevel::Info,
            log::Level::Warn => LogLevel::Warning,
            log::Level::Error => LogLevel::Error,
        }
    }
}

/// ロガー
///
/// * 既定では警告以上をstderrへ出力
/// * ファイル出力を指定すると追記モードで書き込む
#[derive(Debug, Clone)]
pub struct Logger {
    level: LogLevel,
    output_stderr: bool,
    output_file: Option<PathBuf>,
}

impl Logger {
    /// デフォルト構築
    pub fn new(level: LogLevel) -> Self {
        Self {
            level,
            output_stderr: true,
            output_file: None,
        }
    }

    /// 環境変数 `LINEA_LOG` からレベルを決定
    pub fn from_env() -> Self {
        let level = std::env::var(LOG_ENV_VAR)
            .ok()
            .and_then(|value| LogLevel::parse(&value))
            .unwrap_or(LogLevel::Warning);
        Self::new(level)
    }

    /// ログレベルを取得
    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// ログレベルを変更
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// ファイル出力を設定
    pub fn with_file_output<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.output_file = Some(path.into());
        self
    }

    /// 標準エラー出力を無効化
    pub fn without_stderr(mut self) -> Self {
        self.output_stderr = false;
        self
    }

    fn should_log(&self, level: LogLevel) -> bool {
        level >= self.level
    }

    fn write_line(&self, message: &str) {
        if self.output_stderr {
            eprintln!("{}", message);
        }

        if let Some(path) = &self.output_file {
            if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
                let _ = writeln!(file, "{}", message);
            }
        }
    }

    /// 任意のログレベルでメッセージを出力
    pub fn log_message(&self, level: LogLevel, target: &str, message: impl AsRef<str>) {
        if self.should_log(level) {
            self.write_line(&format!("{} [{}]: {}", level.tag(), target, message.as_ref()));
        }
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.should_log(metadata.level().into())
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            self.log_message(
                record.level().into(),
                record.target(),
                record.args().to_string(),
            );
        }
    }

    fn flush(&self) {}
}

/// グローバルロガーとして登録
///
/// 二回目以降の呼び出しは無視される
pub fn init(logger: Logger) {
    let filter = logger.level().to_filter();
    if log::set_boxed_logger(Box::new(logger)).is_ok() {
        log::set_max_level(filter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Log;
    use tempfile::tempdir;

    #[test]
    fn logger_respects_log_level() {
        let logger = Logger::new(LogLevel::Debug).without_stderr();
        assert!(logger.should_log(LogLevel::Debug));
        assert!(!logger.should_log(LogLevel::Trace));

        let warn_logger = Logger::new(LogLevel::Debug)
            .with_level(LogLevel::Warning)
            .without_stderr();
        assert!(!warn_logger.should_log(LogLevel::Info));
        assert!(warn_logger.should_log(LogLevel::Error));
    }

    #[test]
    fn parse_accepts_known_levels() {
        assert_eq!(LogLevel::parse("DEBUG"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse(" warn "), Some(LogLevel::Warning));
        assert_eq!(LogLevel::parse("verbose"), None);
    }

    #[test]
    fn records_are_appended_to_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("linea.log");
        let logger = Logger::new(LogLevel::Info)
            .without_stderr()
            .with_file_output(&path);

        logger.log(
            &log::Record::builder()
                .level(log::Level::Info)
                .target("linea::test")
                .args(format_args!("saved {} lines", 3))
                .build(),
        );
        logger.log(
            &log::Record::builder()
                .level(log::Level::Debug)
                .target("linea::test")
                .args(format_args!("filtered out"))
                .build(),
        );

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "INFO [linea::test]: saved 3 lines\n");
    }

    #[test]
    fn init_installs_global_logger_once() {
        init(Logger::new(LogLevel::Info).without_stderr());
        assert_eq!(log::max_level(), log::LevelFilter::Info);

        // 二回目は無視され、最大レベルも変わらない
        init(Logger::new(LogLevel::Trace).without_stderr());
        assert_eq!(log::max_level(), log::LevelFilter::Info);
        log::info!("logger installed");
    }
}
