pub mod app;
pub mod db;

pub use app::{AppConfig, RuntimeEnv, StoreBackend};
pub use db::{db_url, DbProfile};
