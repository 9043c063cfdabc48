//! Search configuration

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::Result;

/// Configuration for a [`crate::search::Minimax`] searcher
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Random seed for the tie-break among equally good moves
    pub seed: Option<u64>,

    /// Evaluate the root moves on the rayon thread pool
    pub parallel: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            seed: None,
            parallel: false,
        }
    }
}

impl SearchConfig {
    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| crate::Error::Io {
            operation: format!("read search config {}", path.display()),
            source,
        })?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.seed, None);
        assert!(!config.parallel);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SearchConfig = serde_json::from_str(r#"{"seed": 7}"#).unwrap();
        assert_eq!(config, SearchConfig::default().with_seed(7));
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"seed": 3, "parallel": true}}"#).unwrap();

        let config = SearchConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.seed, Some(3));
        assert!(config.parallel);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SearchConfig::from_json_file(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, crate::Error::Io { .. }));
    }

    #[test]
    fn test_malformed_file_is_serialization_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = SearchConfig::from_json_file(file.path()).unwrap_err();
        assert!(matches!(err, crate::Error::Serialization(_)));
    }
}
