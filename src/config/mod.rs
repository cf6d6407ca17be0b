pub mod app_config;
pub mod database;

pub use app_config::{AppConfig, ConfigError, KakaoConfig, StorageConfig};
pub use database::{establish_connection, sync_schema};
