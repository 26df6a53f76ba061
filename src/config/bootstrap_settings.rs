use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::config_spec::ConfigSpec;
use crate::config::errors::ApplicationError;
use crate::config::EnvironmentProvider;

/// Sender and recipient for enquiry notifications
///
/// Either may be missing; the notifier refuses to send until both are set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MailSettings {
    pub from: Option<String>,
    pub to: Option<String>,
}

impl MailSettings {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: Some(from.into()),
            to: Some(to.into()),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.from.is_some() && self.to.is_some()
    }
}

/// Settings read once at process start
pub struct BootstrapSettings {
    database_url: String,
    server_host: String,
    server_port: u16,
    upload_dir: PathBuf,
    max_upload_bytes: usize,
    mail: MailSettings,
    mail_outbox_dir: Option<PathBuf>,
    enable_seed_route: bool,
}

impl BootstrapSettings {
    /// Load settings from the given environment using ConfigSpec
    pub fn from_env_provider(
        env_provider: Arc<dyn EnvironmentProvider + Send + Sync>,
    ) -> Result<Self, ApplicationError> {
        let database_url = ConfigSpec::new(env_provider.clone())
            .env_override("DATABASE_URL")
            .default_value("sqlite://catalog.db?mode=rwc")
            .min_length(1)
            .load_setting_with_source()?
            .value;

        let server_host = ConfigSpec::new(env_provider.clone())
            .env_override("HOST")
            .default_value("0.0.0.0")
            .validator(ConfigSpec::validate_host_address)
            .load_setting_with_source()?
            .value;

        let port_value = ConfigSpec::new(env_provider.clone())
            .env_override("PORT")
            .default_value("5000")
            .validator(|value| ConfigSpec::validate_port_range(value, 1, 65535))
            .load_setting_with_source()?
            .value;
        let server_port = ConfigSpec::parse_port(&port_value, "PORT")?;

        let upload_dir = ConfigSpec::new(env_provider.clone())
            .env_override("UPLOAD_DIR")
            .default_value("uploads")
            .min_length(1)
            .load_setting_with_source()?
            .value;

        let max_upload_value = ConfigSpec::new(env_provider.clone())
            .env_override("MAX_UPLOAD_BYTES")
            .default_value("5242880")
            .load_setting_with_source()?
            .value;
        let max_upload_bytes = ConfigSpec::parse_byte_size(&max_upload_value, "MAX_UPLOAD_BYTES")?;

        let mail = MailSettings {
            from: ConfigSpec::new(env_provider.clone())
                .env_override("EMAIL_USER")
                .load_optional()?,
            to: ConfigSpec::new(env_provider.clone())
                .env_override("EMAIL_TO")
                .load_optional()?,
        };

        let mail_outbox_dir = ConfigSpec::new(env_provider.clone())
            .env_override("MAIL_OUTBOX_DIR")
            .load_optional()?
            .map(PathBuf::from);

        let seed_value = ConfigSpec::new(env_provider)
            .env_override("ENABLE_SEED_ROUTE")
            .default_value("false")
            .load_setting_with_source()?
            .value;
        let enable_seed_route = ConfigSpec::parse_bool(&seed_value, "ENABLE_SEED_ROUTE")?;

        Ok(Self {
            database_url,
            server_host,
            server_port,
            upload_dir: PathBuf::from(upload_dir),
            max_upload_bytes,
            mail,
            mail_outbox_dir,
            enable_seed_route,
        })
    }

    /// Convenience method that uses the system environment provider
    pub fn from_env() -> Result<Self, ApplicationError> {
        use crate::config::SystemEnvironment;
        Self::from_env_provider(Arc::new(SystemEnvironment))
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn server_host(&self) -> &str {
        &self.server_host
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }

    pub fn mail(&self) -> &MailSettings {
        &self.mail
    }

    pub fn mail_outbox_dir(&self) -> Option<&Path> {
        self.mail_outbox_dir.as_deref()
    }

    pub fn enable_seed_route(&self) -> bool {
        self.enable_seed_route
    }
}

impl fmt::Debug for BootstrapSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BootstrapSettings")
            .field("database_url", &self.database_url)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("upload_dir", &self.upload_dir)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .field("mail_configured", &self.mail.is_configured())
            .field("mail_outbox_dir", &self.mail_outbox_dir)
            .field("enable_seed_route", &self.enable_seed_route)
            .finish()
    }
}
