// src/config.rs
use crate::chunker::ChunkerConfig;
use std::env;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("PDF_PARSER_API_KEY environment variable is not set")]
    MissingApiKey,
    #[error("{var} must be a valid number, got '{value}'")]
    InvalidNumber { var: &'static str, value: String },
    #[error("CHUNK_SIZE must be greater than zero")]
    ZeroChunkSize,
    #[error("CHUNK_OVERLAP ({overlap}) must be smaller than CHUNK_SIZE ({chunk_size})")]
    OverlapTooLarge { overlap: usize, chunk_size: usize },
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    /// Shared secret expected in the X-API-Key header.
    pub api_key: String,
    /// CORS origins; a single "*" allows any origin.
    pub allowed_origins: Vec<String>,
    pub chunker: ChunkerConfig,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("BIND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = parse_var("BIND_PORT", 8000u16)?;

        let api_key = env::var("PDF_PARSER_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let allowed_origins: Vec<String> = env::var("PDF_PARSER_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let chunk_size = parse_var("CHUNK_SIZE", 400usize)?;
        let overlap = parse_var("CHUNK_OVERLAP", 100usize)?;
        if chunk_size == 0 {
            return Err(ConfigError::ZeroChunkSize);
        }
        if overlap >= chunk_size {
            return Err(ConfigError::OverlapTooLarge {
                overlap,
                chunk_size,
            });
        }

        Ok(Self {
            host,
            port,
            api_key,
            allowed_origins,
            chunker: ChunkerConfig {
                chunk_size,
                overlap,
            },
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn allow_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == "*")
    }
}

fn parse_var<T: FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(var) {
        Ok(raw) => {
            let parsed = raw.trim().parse();
            parsed.map_err(|_| ConfigError::InvalidNumber { var, value: raw })
        }
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env-var tests share process state; keep them in one test so parallel
    // execution cannot interleave set_var calls.
    #[test]
    fn test_from_env() {
        env::remove_var("BIND_HOST");
        env::remove_var("BIND_PORT");
        env::remove_var("CHUNK_SIZE");
        env::remove_var("CHUNK_OVERLAP");
        env::remove_var("PDF_PARSER_ALLOWED_ORIGINS");

        env::remove_var("PDF_PARSER_API_KEY");
        assert!(matches!(
            ApiConfig::from_env(),
            Err(ConfigError::MissingApiKey)
        ));

        env::set_var("PDF_PARSER_API_KEY", "secret");
        let config = ApiConfig::from_env().unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert_eq!(config.chunker.chunk_size, 400);
        assert_eq!(config.chunker.overlap, 100);
        assert!(config.allow_any_origin());
        assert_eq!(config.bind_addr(), "0.0.0.0:8000");

        env::set_var("PDF_PARSER_ALLOWED_ORIGINS", "http://a.example, http://b.example");
        let config = ApiConfig::from_env().unwrap();
        assert!(!config.allow_any_origin());
        assert_eq!(
            config.allowed_origins,
            vec!["http://a.example".to_string(), "http://b.example".to_string()]
        );

        env::set_var("CHUNK_SIZE", "50");
        env::set_var("CHUNK_OVERLAP", "50");
        assert!(matches!(
            ApiConfig::from_env(),
            Err(ConfigError::OverlapTooLarge { .. })
        ));

        env::set_var("CHUNK_SIZE", "abc");
        assert!(matches!(
            ApiConfig::from_env(),
            Err(ConfigError::InvalidNumber { var: "CHUNK_SIZE", .. })
        ));

        env::remove_var("CHUNK_SIZE");
        env::remove_var("CHUNK_OVERLAP");
        env::remove_var("PDF_PARSER_ALLOWED_ORIGINS");
        env::remove_var("PDF_PARSER_API_KEY");
    }
}
