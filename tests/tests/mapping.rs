use pretty_assertions::assert_eq;
use std::sync::Arc;
use tabula::{schema::app::Role, MappingViolation, Params, Record, Value};
use tests::{fixtures::*, DbTest};

#[test]
fn mapping_is_built_once_per_type() {
    let test = DbTest::new();

    let first = test.mapper.table_mapping::<Order>().unwrap();
    let second = test.mapper.table_mapping::<Order>().unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(test.mapper.cache_stats().mappings, 1);
}

#[test]
fn order_mapping_resolves_columns() {
    let test = DbTest::new();
    let mapping = test.mapper.table_mapping::<Order>().unwrap();

    assert_eq!(mapping.table_name(), "orders");
    assert_eq!(mapping.id().name, "id");
    assert_eq!(mapping.id().column, "order_id");

    let columns: Vec<_> = mapping
        .properties
        .iter()
        .map(|property| property.column.as_str())
        .collect();
    assert_eq!(
        columns,
        ["order_id", "customer_id", "status", "version", "placed_on"]
    );

    assert_eq!(
        mapping.property_with_role(Role::Version).map(|p| p.name.as_str()),
        Some("version")
    );
    assert!(mapping.property("note").is_none());
    assert!(mapping.property("customer").is_none());
}

#[test]
fn missing_table_is_a_mapping_error() {
    #[derive(Debug, Default, Clone, Record)]
    #[table = "ghost"]
    struct Ghost {
        #[key]
        id: i64,
    }

    let test = DbTest::new();
    let err = test.mapper.table_mapping::<Ghost>().unwrap_err();

    assert!(err.is_mapping());
    assert_eq!(
        err.mapping_violations(),
        Some(
            &[MappingViolation::TableNotFound {
                table: "ghost".to_string()
            }][..]
        )
    );
    assert_eq!(test.mapper.cache_stats().mappings, 0);
}

#[test]
fn select_mapper_projects_every_column() {
    let test = DbTest::new();
    let orders = test.mapper.select_mapper::<Order>("o").unwrap();

    assert_eq!(
        orders.columns_sql(),
        "o.order_id AS o_order_id, o.customer_id AS o_customer_id, \
         o.status AS o_status, o.version AS o_version, o.placed_on AS o_placed_on"
    );
    assert_eq!(orders.id_column_label(), "o_order_id");
}

#[test]
fn select_mapper_materializes_hand_written_sql() {
    let test = DbTest::new();
    let orders = test.mapper.select_mapper::<Order>("o").unwrap();
    let sql = format!(
        "SELECT {} FROM orders o WHERE o.order_id = :id",
        orders.columns_sql()
    );

    let mut found = vec![];
    let params: Params = [("id", Value::I64(1))].into_iter().collect();

    tabula::Executor::query(&*test.db, &sql, &params, &mut |row| {
        found.extend(orders.materialize(row)?);
        Ok(())
    })
    .unwrap();

    assert_eq!(found.len(), 1);

    let order = &found[0];
    assert_eq!(order.id, 1);
    assert_eq!(order.customer_id, Some(1));
    assert_eq!(order.status, "open");
    assert_eq!(order.version, 1);
    assert_eq!(
        order.placed_on.map(|t| t.to_string()),
        Some("2024-03-01 09:30:00".to_string())
    );
    assert_eq!(order.customer, None);
}

#[test]
fn null_id_materializes_as_no_record() {
    let test = DbTest::new();
    let customers = test.mapper.select_mapper::<Customer>("customers").unwrap();
    let mut found = vec![];

    tabula::Executor::query(
        &*test.db,
        "SELECT NULL AS customers_customer_id, 'Ada' AS customers_name",
        &Default::default(),
        &mut |row| {
            found.push(customers.materialize(row)?);
            Ok(())
        },
    )
    .unwrap();

    assert_eq!(found, vec![None]);
}
