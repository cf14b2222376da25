// 駆動される側のアダプター（出力ポートの実装）

pub mod console_logger;
pub mod memory_store;
pub mod mysql_store;

pub use console_logger::ConsoleLogger;
pub use memory_store::InMemoryTabularStore;
pub use mysql_store::MySqlTabularStore;
