//! Application configuration management.
//!
//! This module handles loading configuration from environment variables.
//! It uses the `envy` crate to automatically deserialize environment variables into a type-safe struct.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::models::response::ContactInfoDto;

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `DATABASE_URL` (optional): PostgreSQL connection string. When unset the
///   services run against in-memory stores.
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 3000
/// - `DATABASE_MAX_CONNECTIONS` (optional): pool size, defaults to 5
/// - `BUILD_VERSION` (optional): reported by the `build-info` endpoints
/// - `CONTACT_MESSAGE`, `CONTACT_NAME`, `CONTACT_EMAIL`, `ON_CALL_SUPPORT`
///   (optional): reported by the `contact-info` endpoints. `ON_CALL_SUPPORT`
///   is a comma separated list.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub database_url: Option<String>,

    #[serde(default = "default_port")]
    pub server_port: u16,

    #[serde(default = "default_max_connections")]
    pub database_max_connections: u32,

    #[serde(default = "default_build_version")]
    pub build_version: String,

    #[serde(default = "default_contact_message")]
    pub contact_message: String,

    #[serde(default = "default_contact_name")]
    pub contact_name: String,

    #[serde(default = "default_contact_email")]
    pub contact_email: String,

    #[serde(default)]
    pub on_call_support: Vec<String>,
}

/// Default port if SERVER_PORT environment variable is not set.
fn default_port() -> u16 {
    3000
}

fn default_max_connections() -> u32 {
    5
}

fn default_build_version() -> String {
    "1.0".to_string()
}

fn default_contact_message() -> String {
    "Welcome to the EazyBank services".to_string()
}

fn default_contact_name() -> String {
    "EazyBank Support".to_string()
}

fn default_contact_email() -> String {
    "support@eazybank.example".to_string()
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// This method first attempts to load a `.env` file (which is optional),
    /// then reads environment variables and deserializes them into a Config struct.
    ///
    /// # Errors
    ///
    /// Returns an error if environment variable values cannot be parsed into
    /// expected types (e.g. a non-numeric `SERVER_PORT`).
    pub fn from_env() -> Result<Self, envy::Error> {
        // Try to load .env file if it exists (does nothing if not found)
        dotenvy::dotenv().ok();

        // Field names are automatically converted: database_url -> DATABASE_URL
        envy::from_env::<Config>()
    }

    /// Contact details reported by a service's `contact-info` endpoint.
    ///
    /// The message is prefixed with the service name so each service reports
    /// its own greeting.
    pub fn contact_info(&self, service: &str) -> ContactInfoDto {
        let mut contact_details = BTreeMap::new();
        contact_details.insert("name".to_string(), self.contact_name.clone());
        contact_details.insert("email".to_string(), self.contact_email.clone());

        ContactInfoDto {
            message: format!("{} - {}", self.contact_message, service),
            contact_details,
            on_call_support: self.on_call_support.clone(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: None,
            server_port: default_port(),
            database_max_connections: default_max_connections(),
            build_version: default_build_version(),
            contact_message: default_contact_message(),
            contact_name: default_contact_name(),
            contact_email: default_contact_email(),
            on_call_support: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config: Config = envy::from_iter(vars(&[])).unwrap();

        assert_eq!(config.database_url, None);
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.database_max_connections, 5);
        assert_eq!(config.build_version, "1.0");
        assert!(config.on_call_support.is_empty());
    }

    #[test]
    fn reads_values_and_splits_support_numbers() {
        let config: Config = envy::from_iter(vars(&[
            ("DATABASE_URL", "postgres://localhost/eazybank"),
            ("SERVER_PORT", "8080"),
            ("BUILD_VERSION", "3.1"),
            ("ON_CALL_SUPPORT", "555-0100,555-0101"),
        ]))
        .unwrap();

        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://localhost/eazybank")
        );
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.build_version, "3.1");
        assert_eq!(config.on_call_support, vec!["555-0100", "555-0101"]);
    }

    #[test]
    fn contact_info_is_labelled_per_service() {
        let info = Config::default().contact_info("Cards");

        assert_eq!(info.message, "Welcome to the EazyBank services - Cards");
        assert_eq!(info.contact_details["name"], "EazyBank Support");
    }
}
