use serde::{Deserialize, Serialize};
use tabula_core::{Error, Result};

/// Mapper configuration.
///
/// Every field has a default, so a partial document deserializes:
///
/// ```
/// let config: tabula::Config = serde_json::from_str(r#"{ "merge_chunk_size": 50 }"#).unwrap();
/// assert_eq!(config.merge_chunk_size, 50);
/// assert_eq!(config.shape_cache_capacity, 1024);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Maximum number of keys bound to one `IN` list by a merge query.
    pub merge_chunk_size: usize,

    /// Maximum number of shapes each shape cache holds.
    pub shape_cache_capacity: usize,

    /// Fraction of a full shape cache evicted to make room for a new shape.
    pub shape_cache_evict_fraction: f64,

    /// Schema of records that declare none
    pub default_schema: Option<String>,

    /// Catalog of records that declare none
    pub default_catalog: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            merge_chunk_size: 100,
            shape_cache_capacity: 1024,
            shape_cache_evict_fraction: 0.1,
            default_schema: None,
            default_catalog: None,
        }
    }
}

impl Config {
    pub(crate) fn validate(&self) -> Result<()> {
        if self.merge_chunk_size == 0 {
            return Err(Error::usage("`merge_chunk_size` must be at least 1"));
        }

        if self.shape_cache_capacity == 0 {
            return Err(Error::usage("`shape_cache_capacity` must be at least 1"));
        }

        if !(self.shape_cache_evict_fraction > 0.0 && self.shape_cache_evict_fraction <= 1.0) {
            return Err(Error::usage(
                "`shape_cache_evict_fraction` must be greater than 0 and at most 1",
            ));
        }

        Ok(())
    }
}
