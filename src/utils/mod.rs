pub mod app_config;
pub mod constants;

pub use app_config::AppConfig;
