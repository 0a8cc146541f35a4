use tests::{fixtures::*, DbTest};

#[test]
fn blank_where_clause() {
    let test = DbTest::new();

    let err = test
        .mapper
        .query::<Order>()
        .where_clause("  ")
        .execute(&test.exec)
        .unwrap_err();

    assert!(err.is_usage());
    assert!(test.log().is_empty());
}

#[test]
fn join_column_for_another_kind() {
    let test = DbTest::new();

    let err = test
        .mapper
        .query::<Order>()
        .has_one::<Customer>()
        .join_column_many_side("customer_id")
        .populate_property("customer")
        .execute(&test.exec)
        .unwrap_err();

    assert!(err.is_usage());
    assert!(err.to_string().contains("join_column_many_side"));
}

#[test]
fn join_column_before_relationship() {
    let test = DbTest::new();

    let err = test
        .mapper
        .query::<Order>()
        .join_column_owning_side("customer_id")
        .has_one::<Customer>()
        .populate_property("customer")
        .execute(&test.exec)
        .unwrap_err();

    assert!(err.is_usage());
}

#[test]
fn populate_property_is_required() {
    let test = DbTest::new();

    let err = test
        .mapper
        .query::<Order>()
        .has_one::<Customer>()
        .join_column_owning_side("customer_id")
        .execute(&test.exec)
        .unwrap_err();

    assert!(err.is_usage());
    assert!(err.to_string().contains("populate_property"));
}

#[test]
fn only_one_relationship_per_query() {
    let test = DbTest::new();

    let err = test
        .mapper
        .query::<Order>()
        .has_one::<Customer>()
        .has_many::<OrderLine>()
        .populate_property("customer")
        .execute(&test.exec)
        .unwrap_err();

    assert!(err.is_usage());
}

#[test]
fn first_misuse_is_reported() {
    let test = DbTest::new();

    let err = test
        .mapper
        .query::<Order>()
        .order_by("")
        .where_clause("")
        .execute(&test.exec)
        .unwrap_err();

    assert!(err.to_string().contains("order_by"));
}

#[test]
fn unbound_parameter_fails_in_the_driver() {
    let test = DbTest::new();

    let err = test
        .mapper
        .query::<Order>()
        .where_clause("orders.status = :status")
        .execute(&test.exec)
        .unwrap_err();

    assert!(err.to_string().contains(":status"));
}
