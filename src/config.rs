use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    // Sesiones
    pub inactivity_timeout_secs: u64, // Segundos sin actividad antes de desconectar
    pub max_retry_attempts: u8,       // Reintentos por canción antes de descartarla

    // Cola
    pub max_queue_size: usize,
    pub page_size: usize, // Canciones por página en /queue
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            // Sesiones
            inactivity_timeout_secs: std::env::var("INACTIVITY_TIMEOUT_SECS")
                .unwrap_or_else(|_| "300".to_string()) // 5 minutos
                .parse()?,
            max_retry_attempts: std::env::var("MAX_RETRY_ATTEMPTS")
                .unwrap_or_else(|_| "3".to_string())
                .parse()?,

            // Cola
            max_queue_size: std::env::var("MAX_QUEUE_SIZE")
                .unwrap_or_else(|_| "1000".to_string())
                .parse()?,
            page_size: std::env::var("QUEUE_PAGE_SIZE")
                .unwrap_or_else(|_| "10".to_string())
                .parse()?,
        };

        // Validate configuration before returning
        config.validate()?;

        Ok(config)
    }

    /// Validates configuration values for correctness.
    ///
    /// Performs sanity checks on configuration values to catch
    /// common mistakes before any session is created.
    ///
    /// # Validation Rules
    ///
    /// - Inactivity timeout must be greater than zero
    /// - Retry attempts must be at least 1
    /// - Queue capacity and page size must be greater than zero
    ///
    /// # Returns
    ///
    /// - `Ok(())`: All values are valid
    /// - `Err(anyhow::Error)`: Invalid configuration detected
    pub fn validate(&self) -> Result<()> {
        if self.inactivity_timeout_secs == 0 {
            anyhow::bail!("Inactivity timeout must be greater than 0 seconds");
        }

        if self.max_retry_attempts == 0 {
            anyhow::bail!("Max retry attempts must be at least 1");
        }

        if self.max_queue_size == 0 {
            anyhow::bail!("Max queue size must be greater than 0");
        }

        if self.page_size == 0 {
            anyhow::bail!("Queue page size must be greater than 0");
        }

        Ok(())
    }

    /// Tiempo de inactividad como `Duration`.
    pub fn inactivity_timeout(&self) -> Duration {
        Duration::from_secs(self.inactivity_timeout_secs)
    }

    /// Returns a summary of the current configuration for logging.
    pub fn summary(&self) -> String {
        format!(
            "Config Summary:\n  \
            Sessions: {}s idle timeout, {} retries per track\n  \
            Queue: {} max items, {} per page",
            self.inactivity_timeout_secs,
            self.max_retry_attempts,
            self.max_queue_size,
            self.page_size
        )
    }
}

/// Default configuration values.
///
/// Used as fallbacks when environment variables are not provided.
impl Default for Config {
    fn default() -> Self {
        Self {
            // Session defaults
            inactivity_timeout_secs: 300, // 5 minutos
            max_retry_attempts: 3,

            // Queue defaults
            max_queue_size: 1000,
            page_size: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.inactivity_timeout(), Duration::from_secs(300));
    }

    #[test]
    fn zero_retries_is_rejected() {
        let config = Config {
            max_retry_attempts: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let config = Config {
            page_size: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
