pub mod bootstrap;
pub mod config;
pub mod handlers;
pub mod middleware;
pub mod observability;
pub mod server;

pub use bootstrap::{seed_demo_data, BootstrapStats};
pub use config::{
    AppConfig, BootstrapConfig, ConfigError, LoggingConfig, SearchSettings, ServerConfig,
};
pub use observability::{init_tracing, shutdown_tracing};
pub use server::{build_app, AppState, LabLinkServer, ServerBuilder};
