pub mod driven;
pub mod driver;
pub mod store_config;
pub mod store_error;
pub mod store_migration;

pub use store_config::{StoreConfig, StoreMode};
pub use store_migration::StoreMigration;
