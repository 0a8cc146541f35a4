use super::{Config, Mapper};

use tabula_core::{driver::ColumnMetadata, Result};

use std::sync::Arc;

#[derive(Debug, Default)]
pub struct Builder {
    config: Config,
}

impl Builder {
    /// Replaces the whole configuration, e.g. with one read from a file.
    pub fn config(&mut self, config: Config) -> &mut Self {
        self.config = config;
        self
    }

    pub fn merge_chunk_size(&mut self, size: usize) -> &mut Self {
        self.config.merge_chunk_size = size;
        self
    }

    pub fn shape_cache_capacity(&mut self, capacity: usize) -> &mut Self {
        self.config.shape_cache_capacity = capacity;
        self
    }

    pub fn shape_cache_evict_fraction(&mut self, fraction: f64) -> &mut Self {
        self.config.shape_cache_evict_fraction = fraction;
        self
    }

    pub fn default_schema(&mut self, schema: impl Into<String>) -> &mut Self {
        self.config.default_schema = Some(schema.into());
        self
    }

    pub fn default_catalog(&mut self, catalog: impl Into<String>) -> &mut Self {
        self.config.default_catalog = Some(catalog.into());
        self
    }

    pub fn build(&self, columns: impl ColumnMetadata + 'static) -> Result<Mapper> {
        self.config.validate()?;
        Ok(Mapper::from_config(self.config.clone(), Arc::new(columns)))
    }
}
