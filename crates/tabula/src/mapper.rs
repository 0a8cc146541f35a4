mod builder;
pub use builder::Builder;

mod config;
pub use config::Config;

mod stats;
pub use stats::{CacheStats, ShapeCacheStats};

use crate::{
    query::{Query, QueryCount, QueryMerge},
    shape::ShapeCache,
    SelectMapper,
};

use tabula_core::{
    driver::ColumnMetadata,
    schema::{self, mapping::TableMapping},
    Record, Result,
};
use tabula_sql::Serializer;

use std::{
    any::TypeId,
    collections::HashMap,
    fmt,
    sync::{Arc, PoisonError, RwLock},
};

/// Registry of table mappings and generated SQL.
///
/// A mapping is built the first time a record type is used and kept for the
/// lifetime of the mapper. Live schema changes made afterwards are not
/// observed; build a new `Mapper` to pick them up.
pub struct Mapper {
    config: Config,

    /// Source of live table columns
    columns: Arc<dyn ColumnMetadata>,

    /// Builds table mappings
    schema: schema::Builder,

    /// Record type to table mapping
    mappings: RwLock<HashMap<TypeId, Arc<TableMapping>>>,

    /// Shape caches, one per query strategy
    pub(crate) query_shapes: ShapeCache,
    pub(crate) merge_shapes: ShapeCache,
    pub(crate) count_shapes: ShapeCache,

    pub(crate) serializer: Serializer,
}

impl Mapper {
    /// Creates a mapper with the default configuration.
    pub fn new(columns: impl ColumnMetadata + 'static) -> Mapper {
        Mapper::from_config(Config::default(), Arc::new(columns))
    }

    pub fn builder() -> Builder {
        Builder::default()
    }

    fn from_config(config: Config, columns: Arc<dyn ColumnMetadata>) -> Mapper {
        let mut schema = schema::Builder::new();

        if let Some(default_schema) = &config.default_schema {
            schema.default_schema(default_schema);
        }

        if let Some(default_catalog) = &config.default_catalog {
            schema.default_catalog(default_catalog);
        }

        Mapper {
            columns,
            schema,
            mappings: RwLock::new(HashMap::new()),
            query_shapes: ShapeCache::new("query", &config),
            merge_shapes: ShapeCache::new("merge", &config),
            count_shapes: ShapeCache::new("count", &config),
            serializer: Serializer::new(),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the table mapping of `T`, building it on first use.
    pub fn table_mapping<T: Record>(&self) -> Result<Arc<TableMapping>> {
        let key = TypeId::of::<T>();

        if let Some(mapping) = self
            .mappings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return Ok(mapping.clone());
        }

        // Built outside the lock. A racing build produces an identical
        // mapping; the first one stored is kept.
        let model = T::model();
        let mapping = Arc::new(self.schema.build(&model, &*self.columns)?);

        tracing::debug!(
            record = %model.name,
            table = %mapping.table,
            properties = mapping.properties.len(),
            "table mapping built"
        );

        let mut mappings = self
            .mappings
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        Ok(mappings.entry(key).or_insert(mapping).clone())
    }

    /// A projection of `T` under `alias`, for use in hand-written SQL.
    pub fn select_mapper<T: Record>(&self, alias: &str) -> Result<SelectMapper<T>> {
        Ok(SelectMapper::new(self.table_mapping::<T>()?, alias))
    }

    pub fn query<O: Record>(&self) -> Query<'_, O> {
        Query::new(self)
    }

    pub fn query_merge<O: Record>(&self) -> QueryMerge<'_, O> {
        QueryMerge::new(self)
    }

    pub fn query_count<O: Record>(&self) -> QueryCount<'_, O> {
        QueryCount::new(self)
    }

    pub fn cache_stats(&self) -> CacheStats {
        CacheStats {
            mappings: self
                .mappings
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .len(),
            query: self.query_shapes.stats(),
            merge: self.merge_shapes.stats(),
            count: self.count_shapes.stats(),
        }
    }
}

impl fmt::Debug for Mapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mapper")
            .field("config", &self.config)
            .field("cache_stats", &self.cache_stats())
            .finish()
    }
}
