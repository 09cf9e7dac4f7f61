use dbmap_data::DataError;
use serde::Deserialize;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

/// Database connection settings, deserializable from application config.
///
/// For `sqlite::memory:` keep `max_connections` at 1 — every pooled
/// connection would otherwise open its own private database.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    5
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: default_max_connections(),
        }
    }

    pub fn max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    /// Open the shared pool described by this config.
    pub async fn connect(&self) -> Result<SqlitePool, DataError> {
        SqlitePoolOptions::new()
            .max_connections(self.max_connections)
            .connect(&self.url)
            .await
            .map_err(DataError::database)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_with_default_pool_size() {
        let config: DatabaseConfig =
            serde_json::from_str(r#"{"url": "sqlite:app.db"}"#).unwrap();
        assert_eq!(config.url, "sqlite:app.db");
        assert_eq!(config.max_connections, 5);
    }

    #[test]
    fn builder_overrides() {
        let config = DatabaseConfig::new("sqlite::memory:").max_connections(1);
        assert_eq!(config.max_connections, 1);
    }
}
