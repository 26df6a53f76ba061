pub mod bootstrap_settings;
pub mod config_spec;
pub mod database;
pub mod env_provider;
pub mod errors;
pub mod logging;

pub use bootstrap_settings::{BootstrapSettings, MailSettings};
pub use config_spec::{ConfigSpec, ConfigValue, ConfigValueSource};
pub use database::{migrate_catalog_database, DatabaseConnections};
pub use env_provider::{EnvironmentProvider, StaticEnvironment, SystemEnvironment};
pub use errors::ApplicationError;
pub use logging::{init_logging, LoggingConfig, LoggingError};
