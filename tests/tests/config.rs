use pretty_assertions::assert_eq;
use std::sync::Arc;
use tabula::{Config, Mapper};
use tabula_driver_sqlite::Sqlite;
use tests::{fixtures::*, SCHEMA};

fn db() -> Arc<Sqlite> {
    let db = Arc::new(Sqlite::new("sqlite::memory:").unwrap());
    db.execute_batch(SCHEMA).unwrap();
    db
}

#[test]
fn config_from_json() {
    let config: Config = serde_json::from_str(
        r#"{ "merge_chunk_size": 25, "shape_cache_capacity": 8, "default_schema": "main" }"#,
    )
    .unwrap();

    assert_eq!(
        config,
        Config {
            merge_chunk_size: 25,
            shape_cache_capacity: 8,
            default_schema: Some("main".to_string()),
            ..Config::default()
        }
    );
}

#[test]
fn builder_rejects_invalid_config() {
    let err = Mapper::builder().merge_chunk_size(0).build(db()).unwrap_err();
    assert!(err.is_usage());

    let err = Mapper::builder()
        .shape_cache_evict_fraction(1.5)
        .build(db())
        .unwrap_err();
    assert!(err.is_usage());
}

#[test]
fn default_schema_qualifies_tables() {
    let mapper = Mapper::builder().default_schema("main").build(db()).unwrap();
    let mapping = mapper.table_mapping::<Customer>().unwrap();

    assert_eq!(mapping.table.schema.as_deref(), Some("main"));
    assert_eq!(mapping.table.to_string(), "main.customers");
}

#[test]
fn shape_cache_evicts_when_full() {
    let db = db();
    let mapper = Mapper::builder()
        .shape_cache_capacity(1)
        .shape_cache_evict_fraction(1.0)
        .build(db.clone())
        .unwrap();

    mapper.query::<Order>().execute(&*db).unwrap();
    mapper.query::<Customer>().execute(&*db).unwrap();

    let stats = mapper.cache_stats().query;
    assert_eq!(stats.entries, 1);
    assert_eq!(stats.evictions, 1);
    assert_eq!(stats.misses, 2);
}

#[test]
fn sqlite_url_must_use_the_sqlite_scheme() {
    assert!(Sqlite::new("postgres://localhost/db").unwrap_err().is_usage());
    assert_eq!(Sqlite::new("sqlite::memory:").unwrap().url(), "sqlite::memory:");
}
