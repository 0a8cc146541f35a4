use tests::{fixtures::*, DbTest};

#[test]
fn count_all_orders() {
    let test = DbTest::new();

    let total = test.mapper.query_count::<Order>().execute(&test.exec).unwrap();
    assert_eq!(total, 5);
}

#[test]
fn count_with_where_clause() {
    let test = DbTest::new();

    let open = test
        .mapper
        .query_count::<Order>()
        .where_clause("orders.status = :status")
        .param("status", "open")
        .execute(&test.exec)
        .unwrap();

    assert_eq!(open, 3);
}

#[test]
fn count_through_one_to_one() {
    let test = DbTest::new();

    let count = || {
        test.mapper
            .query_count::<Order>()
            .has_one::<Customer>()
            .join_column_owning_side("customer_id")
            .populate_property("customer")
            .where_clause("customers.name = :name")
            .param("name", "Ada")
            .execute(&test.exec)
            .unwrap()
    };

    assert_eq!(count(), 2);
    assert_eq!(count(), 2);

    let stats = test.mapper.cache_stats().count;
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.hits, 1);
    assert_eq!(test.log().count_containing("count(*)"), 2);
}

#[test]
fn count_of_nothing_is_zero() {
    let test = DbTest::new();

    let total = test
        .mapper
        .query_count::<Order>()
        .where_clause("orders.status = 'lost'")
        .execute(&test.exec)
        .unwrap();

    assert_eq!(total, 0);
}

#[test]
fn count_shelves_by_featured_item() {
    let test = DbTest::new();

    let featured = test
        .mapper
        .query_count::<Shelf>()
        .has_one::<ShelfItem>()
        .join_column_owning_side("item_id")
        .populate_property("featured")
        .where_clause("shelf_item.id IS NOT NULL")
        .execute(&test.exec)
        .unwrap();

    assert_eq!(featured, 1);
}
