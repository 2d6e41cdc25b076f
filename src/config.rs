use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::backend::database::DatabaseBackendConfig;
use crate::backend::DatabaseType;
use crate::error::{AppError, AppResult};
use crate::password::PasswordManager;

/// Signing secret used by the zero-config development setup
pub const DEVELOPMENT_JWT_SECRET: &str = "development-secret-change-me";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub backend: BackendConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub password: PasswordConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BackendConfig {
    #[serde(rename = "type")]
    pub backend_type: String,
    pub database: Option<DatabaseConfig>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    #[serde(rename = "type")]
    pub db_type: String,
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,
}

fn default_max_connections() -> u32 {
    10
}

fn default_acquire_timeout_secs() -> u64 {
    30
}

/// Session token and cookie settings
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,
    #[serde(default)]
    pub secure_cookie: bool,
}

fn default_cookie_name() -> String {
    "user_token".to_string()
}

fn default_token_ttl_hours() -> i64 {
    24
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PasswordConfig {
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

fn default_bcrypt_cost() -> u32 {
    10
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: default_bcrypt_cost(),
        }
    }
}

impl AppConfig {
    /// Load configuration from YAML file
    pub fn load_from_file<P: AsRef<Path>>(config_path: P) -> Result<Self, String> {
        let path = config_path.as_ref();

        if !path.exists() {
            return Err(format!("Configuration file not found: {}", path.display()));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file {}: {}", path.display(), e))?;

        let expanded_content = Self::expand_env_vars(&content)?;

        let app_config: AppConfig = serde_yaml::from_str(&expanded_content)
            .map_err(|e| format!("Failed to parse config file {}: {}", path.display(), e))?;

        app_config.validate().map_err(|e| e.to_string())?;

        Ok(app_config)
    }

    /// In-memory SQLite with a development signing secret
    pub fn default_config() -> Self {
        AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
            },
            backend: BackendConfig {
                backend_type: "database".to_string(),
                database: Some(DatabaseConfig {
                    db_type: "sqlite".to_string(),
                    url: ":memory:".to_string(),
                    max_connections: 1,
                    acquire_timeout_secs: default_acquire_timeout_secs(),
                }),
            },
            auth: AuthConfig {
                jwt_secret: DEVELOPMENT_JWT_SECRET.to_string(),
                cookie_name: default_cookie_name(),
                token_ttl_hours: default_token_ttl_hours(),
                secure_cookie: false,
            },
            password: PasswordConfig::default(),
        }
    }

    /// Check the settings that cannot be caught by deserialization alone
    pub fn validate(&self) -> AppResult<()> {
        if self.auth.jwt_secret.trim().is_empty() {
            return Err(AppError::Configuration(
                "auth.jwt_secret must not be empty".to_string(),
            ));
        }
        if self.auth.cookie_name.trim().is_empty() {
            return Err(AppError::Configuration(
                "auth.cookie_name must not be empty".to_string(),
            ));
        }
        if self.auth.token_ttl_hours <= 0 {
            return Err(AppError::Configuration(
                "auth.token_ttl_hours must be positive".to_string(),
            ));
        }
        PasswordManager::from_config(&self.password)?;
        self.database_backend_config()?;
        Ok(())
    }

    /// Translate the backend section into a storage configuration
    pub fn database_backend_config(&self) -> AppResult<DatabaseBackendConfig> {
        if self.backend.backend_type != "database" {
            return Err(AppError::Configuration(format!(
                "Unsupported backend type: {}",
                self.backend.backend_type
            )));
        }

        let database_config = self.backend.database.as_ref().ok_or_else(|| {
            AppError::Configuration(
                "Database configuration is required when backend type is 'database'".to_string(),
            )
        })?;

        let database_type = match database_config.db_type.as_str() {
            "postgresql" => DatabaseType::PostgreSQL,
            "sqlite" => DatabaseType::SQLite,
            other => {
                return Err(AppError::Configuration(format!(
                    "Unsupported database type: {}",
                    other
                )))
            }
        };

        let config = DatabaseBackendConfig::new(
            database_type,
            database_config.url.clone(),
            database_config.max_connections,
        )
        .with_acquire_timeout(Duration::from_secs(database_config.acquire_timeout_secs));
        config.validate()?;

        Ok(config)
    }

    /// Expand environment variables in format ${VAR_NAME} or ${VAR_NAME:-default}
    fn expand_env_vars(content: &str) -> Result<String, String> {
        let mut expanded = String::with_capacity(content.len());
        let mut rest = content;

        while let Some(start) = rest.find("${") {
            expanded.push_str(&rest[..start]);
            let after = &rest[start + 2..];

            let Some(end) = after.find('}') else {
                // Unterminated expression is kept verbatim
                expanded.push_str(&rest[start..]);
                return Ok(expanded);
            };

            let var_expr = &after[..end];
            let (var_name, default_value) = match var_expr.split_once(":-") {
                Some((name, default)) => (name, Some(default)),
                None => (var_expr, None),
            };

            let value = match (std::env::var(var_name), default_value) {
                (Ok(val), _) => val,
                (Err(_), Some(default)) => default.to_string(),
                (Err(_), None) => {
                    return Err(format!(
                        "Environment variable {} not found and no default provided",
                        var_name
                    ))
                }
            };

            expanded.push_str(&value);
            rest = &after[end + 1..];
        }

        expanded.push_str(rest);
        Ok(expanded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_var_expansion() {
        std::env::set_var("ESTATE_TEST_SECRET", "s3cret");
        std::env::set_var("ESTATE_TEST_PORT", "8080");

        let yaml_content = "port: ${ESTATE_TEST_PORT:-3000}\nsecret: \"${ESTATE_TEST_SECRET:-x}\"";
        let expanded = AppConfig::expand_env_vars(yaml_content).unwrap();
        assert!(expanded.contains("s3cret"));
        assert!(expanded.contains("8080"));

        let expanded_default =
            AppConfig::expand_env_vars("host: \"${ESTATE_MISSING_VAR:-localhost}\"").unwrap();
        assert_eq!(expanded_default, "host: \"localhost\"");

        assert!(AppConfig::expand_env_vars("x: ${ESTATE_MISSING_VAR}").is_err());
        assert_eq!(AppConfig::expand_env_vars("x: ${open").unwrap(), "x: ${open");

        std::env::remove_var("ESTATE_TEST_SECRET");
        std::env::remove_var("ESTATE_TEST_PORT");
    }

    #[test]
    fn test_config_file_loading() {
        let config_content = r#"
server:
  host: "0.0.0.0"
  port: 8080

backend:
  type: "database"
  database:
    type: "sqlite"
    url: "sqlite:./estate.db"

auth:
  jwt_secret: "${ESTATE_LOAD_SECRET:-file-secret}"
  token_ttl_hours: 12

password:
  bcrypt_cost: 12
"#;

        let temp_file = std::env::temp_dir().join("estate_test_config.yaml");
        std::fs::write(&temp_file, config_content).unwrap();

        let config = AppConfig::load_from_file(&temp_file).unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        let db_config = config.backend.database.as_ref().unwrap();
        assert_eq!(db_config.db_type, "sqlite");
        assert_eq!(db_config.max_connections, 10);
        assert_eq!(db_config.acquire_timeout_secs, 30);
        assert_eq!(config.auth.jwt_secret, "file-secret");
        assert_eq!(config.auth.cookie_name, "user_token");
        assert_eq!(config.auth.token_ttl_hours, 12);
        assert_eq!(config.password.bcrypt_cost, 12);

        std::fs::remove_file(temp_file).unwrap();
    }

    #[test]
    fn test_missing_config_file() {
        let result = AppConfig::load_from_file("/nonexistent/estate.yaml");
        assert!(result.unwrap_err().contains("Configuration file not found"));
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default_config();
        assert!(config.validate().is_ok());

        let backend_config = config.database_backend_config().unwrap();
        assert_eq!(backend_config.database_type, DatabaseType::SQLite);
        assert!(backend_config.is_memory_database());
        assert_eq!(config.password.bcrypt_cost, 10);
    }

    #[test]
    fn test_validation_rejects_bad_settings() {
        let mut config = AppConfig::default_config();
        config.auth.jwt_secret = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default_config();
        config.backend.database.as_mut().unwrap().db_type = "mongodb".to_string();
        assert!(matches!(
            config.validate(),
            Err(AppError::Configuration(ref m)) if m.contains("mongodb")
        ));

        let mut config = AppConfig::default_config();
        config.backend.database.as_mut().unwrap().max_connections = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default_config();
        config.backend.backend_type = "memory".to_string();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default_config();
        config.password.bcrypt_cost = 2;
        assert!(matches!(
            config.validate(),
            Err(AppError::Configuration(ref m)) if m.contains("bcrypt_cost")
        ));
    }

    #[test]
    fn test_invalid_yaml() {
        let temp_file = std::env::temp_dir().join("estate_invalid_config.yaml");
        std::fs::write(&temp_file, "server: [not, a, map]").unwrap();

        let result = AppConfig::load_from_file(&temp_file);
        assert!(result.unwrap_err().contains("Failed to parse config file"));

        std::fs::remove_file(temp_file).unwrap();
    }
}
