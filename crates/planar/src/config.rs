//! Configuration types for Planar.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from
//! TOML; every section and field is optional.
//!
//! # Example
//!
//! ```
//! # use planar::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.flatten().recurse(), None);
//! assert!(config.flatten().root().is_none());
//! ```

use serde::Deserialize;

use planar_core::identifier::Id;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Flatten command settings.
    #[serde(default)]
    flatten: FlattenConfig,
}

impl AppConfig {
    pub fn new(flatten: FlattenConfig) -> Self {
        Self { flatten }
    }

    /// Returns the flatten configuration.
    pub fn flatten(&self) -> &FlattenConfig {
        &self.flatten
    }
}

/// Settings for a flatten run.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct FlattenConfig {
    /// Whether to descend into blocks and touch locked layers. When unset the
    /// front end decides (the CLI asks).
    #[serde(default)]
    recurse: Option<bool>,

    /// Container to start from instead of the document's model space.
    #[serde(default)]
    root: Option<Id>,
}

impl FlattenConfig {
    /// Creates a new [`FlattenConfig`].
    ///
    /// # Arguments
    ///
    /// * `recurse` - Fixed recursion choice, or `None` to leave it open.
    /// * `root` - Starting container, or `None` for model space.
    pub fn new(recurse: Option<bool>, root: Option<Id>) -> Self {
        Self { recurse, root }
    }

    pub fn recurse(&self) -> Option<bool> {
        self.recurse
    }

    pub fn root(&self) -> Option<Id> {
        self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full() {
        let config: AppConfig = toml::from_str(
            r#"
            [flatten]
            recurse = true
            root = "title_block"
            "#,
        )
        .expect("valid config");

        assert_eq!(config.flatten().recurse(), Some(true));
        assert_eq!(config.flatten().root(), Some(Id::new("title_block")));
    }

    #[test]
    fn test_deserialize_empty() {
        let config: AppConfig = toml::from_str("").expect("empty config is valid");

        assert_eq!(config.flatten().recurse(), None);
        assert_eq!(config.flatten().root(), None);
    }
}
