use crate::domain::port::{LogLevel, Logger};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// ログエントリ
/// 構造化ログの基本構造を定義
/// アダプター層の実装詳細として配置
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
    pub component: String,
    pub additional_context: HashMap<String, String>,
}

impl LogEntry {
    /// 新しいログエントリを作成
    pub fn new(level: LogLevel, message: String, component: String) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            message,
            component,
            additional_context: HashMap::new(),
        }
    }

    /// 追加コンテキストを設定
    pub fn with_context(mut self, context: HashMap<String, String>) -> Self {
        self.additional_context = context;
        self
    }

    /// ログエントリを文字列として出力
    pub fn format(&self) -> String {
        let level_str = match self.level {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARN",
            LogLevel::Error => "ERROR",
        };

        let mut parts = vec![
            format!("[{}]", self.timestamp.format("%Y-%m-%d %H:%M:%S UTC")),
            format!("[{}]", level_str),
            format!("[{}]", self.component),
        ];

        parts.push(self.message.clone());

        if !self.additional_context.is_empty() {
            let mut keys: Vec<&String> = self.additional_context.keys().collect();
            keys.sort();
            let context: Vec<String> = keys
                .iter()
                .map(|key| format!("{}={}", key, self.additional_context[*key]))
                .collect();
            parts.push(format!("({})", context.join(", ")));
        }

        parts.join(" ")
    }
}

/// コンソールロガー
/// ログエントリを標準出力に1行で出力する
#[derive(Debug, Clone, Default)]
pub struct ConsoleLogger;

impl ConsoleLogger {
    pub fn new() -> Self {
        Self
    }

    fn log(&self, level: LogLevel, component: &str, message: &str, context: Option<HashMap<String, String>>) {
        let mut entry = LogEntry::new(level, message.to_string(), component.to_string());
        if let Some(context) = context {
            entry = entry.with_context(context);
        }
        println!("{}", entry.format());
    }
}

impl Logger for ConsoleLogger {
    fn debug(&self, component: &str, message: &str, context: Option<HashMap<String, String>>) {
        self.log(LogLevel::Debug, component, message, context);
    }

    fn info(&self, component: &str, message: &str, context: Option<HashMap<String, String>>) {
        self.log(LogLevel::Info, component, message, context);
    }

    fn warn(&self, component: &str, message: &str, context: Option<HashMap<String, String>>) {
        self.log(LogLevel::Warning, component, message, context);
    }

    fn error(&self, component: &str, message: &str, context: Option<HashMap<String, String>>) {
        self.log(LogLevel::Error, component, message, context);
    }
}
