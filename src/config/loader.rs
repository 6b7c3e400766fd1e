//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::ClientConfig;
use crate::config::validation::validate_config;
use crate::error::{ClientError, ClientResult};

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> ClientResult<ClientConfig> {
    let content = fs::read_to_string(path)
        .map_err(|e| ClientError::Config(format!("read {}: {}", path.display(), e)))?;
    let config: ClientConfig = toml::from_str(&content)
        .map_err(|e| ClientError::Config(format!("parse {}: {}", path.display(), e)))?;

    validate_config(&config).map_err(|errors| {
        let joined = errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        ClientError::Config(format!("validation failed: {}", joined))
    })?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_config_error() {
        let result = load_config(Path::new("/nonexistent/card-client.toml"));
        assert!(matches!(result, Err(ClientError::Config(_))));
    }
}
