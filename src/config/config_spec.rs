use std::sync::Arc;

use crate::config::errors::ApplicationError;
use crate::config::EnvironmentProvider;

#[derive(Debug, Clone)]
pub struct ConfigValue {
    pub value: String,
    pub source: ConfigValueSource,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValueSource {
    EnvironmentVariable { name: String },
    Default,
    Unset,
}

/// Configuration specification with environment override → default priority
pub struct ConfigSpec {
    env_provider: Arc<dyn EnvironmentProvider + Send + Sync>,
    pub env_override: Option<String>,
    pub default_value: Option<String>,
    pub required: bool,
    pub min_length: Option<usize>,
    pub validator: Option<fn(&str) -> Result<(), String>>,
}

impl ConfigSpec {
    pub fn new(env_provider: Arc<dyn EnvironmentProvider + Send + Sync>) -> Self {
        Self {
            env_provider,
            env_override: None,
            default_value: None,
            required: false,
            min_length: None,
            validator: None,
        }
    }

    pub fn env_override(mut self, name: &str) -> Self {
        self.env_override = Some(name.to_string());
        self
    }

    pub fn default_value(mut self, value: &str) -> Self {
        self.default_value = Some(value.to_string());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn min_length(mut self, length: usize) -> Self {
        self.min_length = Some(length);
        self
    }

    pub fn validator(mut self, f: fn(&str) -> Result<(), String>) -> Self {
        self.validator = Some(f);
        self
    }

    fn setting_name(&self) -> &str {
        self.env_override.as_deref().unwrap_or("unknown_setting")
    }

    /// Load a setting value with source tracking
    ///
    /// Environment variable first, then the default. A setting with neither
    /// yields an empty `Unset` value unless it is required.
    pub fn load_setting_with_source(&self) -> Result<ConfigValue, ApplicationError> {
        if let Some(env_var) = &self.env_override {
            if let Some(value) = self.env_provider.get_var(env_var) {
                self.validate_value(&value, env_var)?;

                return Ok(ConfigValue {
                    value,
                    source: ConfigValueSource::EnvironmentVariable {
                        name: env_var.clone(),
                    },
                });
            }
        }

        if let Some(default) = &self.default_value {
            self.validate_value(default, self.setting_name())?;

            return Ok(ConfigValue {
                value: default.clone(),
                source: ConfigValueSource::Default,
            });
        }

        if self.required {
            return Err(ApplicationError::InvalidSetting {
                setting_name: self.setting_name().to_string(),
                reason: "Required setting has no value from any source".to_string(),
            });
        }

        Ok(ConfigValue {
            value: String::new(),
            source: ConfigValueSource::Unset,
        })
    }

    /// Load an optional setting; blank values count as absent
    pub fn load_optional(&self) -> Result<Option<String>, ApplicationError> {
        let loaded = self.load_setting_with_source()?;
        let value = loaded.value.trim();
        Ok((!value.is_empty()).then(|| value.to_string()))
    }

    /// Validate a setting value according to the ConfigSpec rules
    pub fn validate_value(&self, value: &str, setting_name: &str) -> Result<(), ApplicationError> {
        if let Some(min_len) = self.min_length {
            if value.len() < min_len {
                return Err(ApplicationError::InvalidSetting {
                    setting_name: setting_name.to_string(),
                    reason: format!("Value must be at least {} characters long", min_len),
                });
            }
        }

        if let Some(validator) = self.validator {
            validator(value).map_err(|reason| ApplicationError::InvalidSetting {
                setting_name: setting_name.to_string(),
                reason,
            })?;
        }

        Ok(())
    }
}

/// Type parsing utilities for configuration values
impl ConfigSpec {
    /// Parse a boolean flag
    ///
    /// Accepts true/false, 1/0, yes/no, on/off, enabled/disabled.
    pub fn parse_bool(value: &str, setting_name: &str) -> Result<bool, ApplicationError> {
        match value.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" | "enabled" => Ok(true),
            "false" | "0" | "no" | "off" | "disabled" => Ok(false),
            _ => Err(ApplicationError::ParseError {
                setting_name: setting_name.to_string(),
                error: format!(
                    "Expected boolean value, got '{}'. Valid values: true/false, 1/0, yes/no, on/off, enabled/disabled",
                    value
                ),
            }),
        }
    }

    /// Parse a byte count; must be positive
    pub fn parse_byte_size(value: &str, setting_name: &str) -> Result<usize, ApplicationError> {
        let size = value.trim().parse::<usize>().map_err(|e| ApplicationError::ParseError {
            setting_name: setting_name.to_string(),
            error: format!("Expected a number of bytes, got '{}': {}", value, e),
        })?;

        if size == 0 {
            return Err(ApplicationError::InvalidSetting {
                setting_name: setting_name.to_string(),
                reason: "Size must be greater than zero".to_string(),
            });
        }

        Ok(size)
    }

    /// Parse a port number from string with validation
    pub fn parse_port(value: &str, setting_name: &str) -> Result<u16, ApplicationError> {
        let port = value.trim().parse::<u16>().map_err(|e| ApplicationError::ParseError {
            setting_name: setting_name.to_string(),
            error: format!("Expected port number (1-65535), got '{}': {}", value, e),
        })?;

        if port == 0 {
            return Err(ApplicationError::InvalidSetting {
                setting_name: setting_name.to_string(),
                reason: "Port number must be between 1 and 65535".to_string(),
            });
        }

        Ok(port)
    }

    pub fn validate_port_range(value: &str, min: u16, max: u16) -> Result<(), String> {
        let parsed = value
            .parse::<u16>()
            .map_err(|_| format!("Expected port number between {} and {}", min, max))?;

        if parsed < min || parsed > max {
            return Err(format!("Port {} is outside valid range {}-{}", parsed, min, max));
        }

        Ok(())
    }

    /// Validate an IPv4 address format (4 dot-separated integers 0-255)
    pub fn validate_ipv4_address(value: &str) -> Result<(), String> {
        let parts: Vec<&str> = value.split('.').collect();

        if parts.len() != 4 {
            return Err(format!(
                "IPv4 address must have exactly 4 parts separated by dots, got {}",
                parts.len()
            ));
        }

        for (i, part) in parts.iter().enumerate() {
            if part.is_empty() {
                return Err(format!("IPv4 address part {} cannot be empty", i + 1));
            }

            if part.len() > 1 && part.starts_with('0') {
                return Err(format!(
                    "IPv4 address part {} cannot have leading zeros: '{}'",
                    i + 1,
                    part
                ));
            }

            let octet = part
                .parse::<u16>()
                .map_err(|_| format!("IPv4 address part {} must be a number: '{}'", i + 1, part))?;

            if octet > 255 {
                return Err(format!(
                    "IPv4 address part {} must be between 0-255, got {}",
                    i + 1,
                    octet
                ));
            }
        }

        Ok(())
    }

    /// Validate a host address (IPv4, IPv6, or hostname)
    ///
    /// Strict for dotted-quad IPv4, lenient for IPv6 and hostnames.
    pub fn validate_host_address(value: &str) -> Result<(), String> {
        if value.is_empty() {
            return Err("Host address cannot be empty".to_string());
        }

        if value.contains(':') {
            if value.starts_with('[') && value.ends_with(']') {
                let ipv6_part = &value[1..value.len() - 1];
                if ipv6_part.is_empty() || !ipv6_part.contains(':') {
                    return Err("Invalid IPv6 address format".to_string());
                }
            }
            return Ok(());
        }

        if value == "[]" {
            return Err("Invalid IPv6 address format".to_string());
        }

        if value.contains('.') {
            let parts: Vec<&str> = value.split('.').collect();
            if parts.len() == 4 && parts.iter().all(|part| part.chars().all(|c| c.is_ascii_digit())) {
                return Self::validate_ipv4_address(value);
            }
        }

        if value.contains(char::is_whitespace) {
            return Err("Host address cannot contain whitespace characters".to_string());
        }

        Ok(())
    }
}
