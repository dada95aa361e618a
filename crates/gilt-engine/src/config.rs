//! Engine configuration (gilt.toml)
//!
//! Every key is optional. A missing file section falls back to the
//! defaults below, which match how an undecorated class element would be
//! installed.
//!
//! ```toml
//! [elements]
//! writable = true
//! enumerable = false
//! configurable = true
//!
//! [accessors]
//! enumerable = false
//! configurable = true
//!
//! [engine]
//! descriptor-source = "synthesize"
//! object-literal-decorators = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Conventional configuration file name
pub const CONFIG_FILE_NAME: &str = "gilt.toml";

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Default attributes of method and field descriptors
    pub elements: ElementAttributes,

    /// Default attributes of accessor descriptors
    pub accessors: AccessorAttributes,

    /// Engine behavior switches
    pub engine: EngineOptions,
}

/// Default attributes for value-shaped class element descriptors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ElementAttributes {
    /// `[[Writable]]` (default: true)
    pub writable: bool,
    /// `[[Enumerable]]` (default: false)
    pub enumerable: bool,
    /// `[[Configurable]]` (default: true)
    pub configurable: bool,
}

impl Default for ElementAttributes {
    fn default() -> Self {
        Self {
            writable: true,
            enumerable: false,
            configurable: true,
        }
    }
}

/// Default attributes for accessor-shaped class element descriptors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AccessorAttributes {
    /// `[[Enumerable]]` (default: false)
    pub enumerable: bool,
    /// `[[Configurable]]` (default: true)
    pub configurable: bool,
}

impl Default for AccessorAttributes {
    fn default() -> Self {
        Self {
            enumerable: false,
            configurable: true,
        }
    }
}

/// How the descriptor a member chain starts from is obtained
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DescriptorSource {
    /// Build the default descriptor directly from the element
    #[default]
    Synthesize,
    /// Install the element ordinarily first, then read its descriptor back
    /// through the store
    ReadBack,
}

/// Engine behavior switches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct EngineOptions {
    /// Where member chains get their starting descriptor
    pub descriptor_source: DescriptorSource,

    /// Whether decorated object-literal properties are accepted
    pub object_literal_decorators: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            descriptor_source: DescriptorSource::Synthesize,
            object_literal_decorators: true,
        }
    }
}

impl EngineConfig {
    /// Load configuration from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Look for `gilt.toml` in `dir` and its ancestors
    pub fn discover(dir: impl AsRef<Path>) -> Option<PathBuf> {
        dir.as_ref()
            .ancestors()
            .map(|ancestor| ancestor.join(CONFIG_FILE_NAME))
            .find(|candidate| candidate.is_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_class_element_semantics() {
        let config = EngineConfig::default();
        assert!(config.elements.writable);
        assert!(!config.elements.enumerable);
        assert!(config.elements.configurable);
        assert!(!config.accessors.enumerable);
        assert!(config.accessors.configurable);
        assert_eq!(config.engine.descriptor_source, DescriptorSource::Synthesize);
        assert!(config.engine.object_literal_decorators);
    }

    #[test]
    fn test_empty_document_is_default() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_partial_sections() {
        let config = EngineConfig::from_toml_str(
            r#"
            [accessors]
            enumerable = true

            [engine]
            descriptor-source = "read-back"
            "#,
        )
        .unwrap();
        assert!(config.accessors.enumerable);
        assert!(config.accessors.configurable);
        assert_eq!(config.engine.descriptor_source, DescriptorSource::ReadBack);
        assert!(config.engine.object_literal_decorators);
        assert_eq!(config.elements, ElementAttributes::default());
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let err = EngineConfig::from_toml_str("[accessors]\nwritable = true\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_and_discover() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b");
        std::fs::create_dir_all(&nested).unwrap();

        let path = dir.path().join(CONFIG_FILE_NAME);
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[engine]\nobject-literal-decorators = false").unwrap();

        assert_eq!(EngineConfig::discover(&nested).unwrap(), path);
        let config = EngineConfig::load(&path).unwrap();
        assert!(!config.engine.object_literal_decorators);
    }

    #[test]
    fn test_load_missing_file() {
        let err = EngineConfig::load("/nonexistent/gilt.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
