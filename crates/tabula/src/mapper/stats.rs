/// Snapshot of a mapper's cache sizes and counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cached table mappings
    pub mappings: usize,

    /// Join strategy shapes
    pub query: ShapeCacheStats,

    /// Fetch-then-merge shapes
    pub merge: ShapeCacheStats,

    /// Count shapes
    pub count: ShapeCacheStats,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ShapeCacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}
