use pretty_assertions::assert_eq;
use tabula::Config;
use tests::{fixtures::*, DbTest};

fn all_orders(test: &DbTest) -> Vec<Order> {
    test.mapper
        .query::<Order>()
        .order_by("orders.order_id")
        .execute(&test.exec)
        .unwrap()
}

fn line_ids(orders: &[Order]) -> Vec<Vec<i64>> {
    orders
        .iter()
        .map(|order| order.lines.iter().map(|line| line.id).collect())
        .collect()
}

#[test]
fn merge_lines_into_loaded_orders() {
    let test = DbTest::new();
    let mut orders = all_orders(&test);
    test.log().clear();

    test.mapper
        .query_merge::<Order>()
        .has_many::<OrderLine>()
        .join_column_many_side("order_id")
        .populate_property("lines")
        .order_by("order_line.line_id")
        .execute(&mut orders, &test.exec)
        .unwrap();

    assert_eq!(
        line_ids(&orders),
        [vec![100, 101, 102], vec![103], vec![104], vec![], vec![]]
    );
    assert_eq!(test.log().len(), 1);
    assert_eq!(test.log().list_lens("ids"), [5]);
}

#[test]
fn merging_twice_does_not_duplicate() {
    let test = DbTest::new();
    let mut orders = all_orders(&test);

    let merge = test
        .mapper
        .query_merge::<Order>()
        .has_many::<OrderLine>()
        .join_column_many_side("order_id")
        .populate_property("lines");

    merge.execute(&mut orders, &test.exec).unwrap();
    let once = line_ids(&orders);

    merge.execute(&mut orders, &test.exec).unwrap();
    assert_eq!(line_ids(&orders), once);
}

#[test]
fn keys_are_chunked() {
    let test = DbTest::with_config(Config {
        merge_chunk_size: 2,
        ..Config::default()
    });
    let mut orders = all_orders(&test);
    test.log().clear();

    test.mapper
        .query_merge::<Order>()
        .has_many::<OrderLine>()
        .join_column_many_side("order_id")
        .populate_property("lines")
        .execute(&mut orders, &test.exec)
        .unwrap();

    // ceil(5 / 2) queries
    assert_eq!(test.log().list_lens("ids"), [2, 2, 1]);

    let unchunked = DbTest::new();
    let mut expected = all_orders(&unchunked);

    unchunked
        .mapper
        .query_merge::<Order>()
        .has_many::<OrderLine>()
        .join_column_many_side("order_id")
        .populate_property("lines")
        .execute(&mut expected, &unchunked.exec)
        .unwrap();

    assert_eq!(orders, expected);
}

#[test]
fn merge_customers_by_distinct_join_keys() {
    let test = DbTest::with_config(Config {
        merge_chunk_size: 2,
        ..Config::default()
    });
    let mut orders = all_orders(&test);
    test.log().clear();

    test.mapper
        .query_merge::<Order>()
        .has_one::<Customer>()
        .join_column_owning_side("customer_id")
        .populate_property("customer")
        .execute(&mut orders, &test.exec)
        .unwrap();

    let names: Vec<_> = orders
        .iter()
        .map(|order| order.customer.as_ref().map(|c| c.name.as_str()))
        .collect();

    assert_eq!(
        names,
        [Some("Ada"), Some("Ada"), Some("Grace"), None, Some("Linus")]
    );

    // Customer ids 1, 2 and 3; order 4 has none
    assert_eq!(test.log().list_lens("ids"), [2, 1]);
}

#[test]
fn merge_products_through_join_table() {
    let test = DbTest::new();
    let mut orders = all_orders(&test);

    test.mapper
        .query_merge::<Order>()
        .many_to_many::<Product>()
        .through_join_table("order_product")
        .through_join_columns("order_id", "product_id")
        .populate_property("products")
        .order_by("product.product_id")
        .execute(&mut orders, &test.exec)
        .unwrap();

    let products: Vec<Vec<i64>> = orders
        .iter()
        .map(|order| order.products.iter().map(|p| p.id).collect())
        .collect();

    assert_eq!(
        products,
        [vec![10, 11], vec![10], vec![12], vec![], vec![]]
    );
}

#[test]
fn stale_collection_is_replaced() {
    let test = DbTest::new();
    let mut orders = all_orders(&test);
    orders[0].lines.push(OrderLine {
        id: 999,
        ..OrderLine::default()
    });

    test.mapper
        .query_merge::<Order>()
        .has_many::<OrderLine>()
        .join_column_many_side("order_id")
        .populate_property("lines")
        .execute(&mut orders, &test.exec)
        .unwrap();

    let ids: Vec<_> = orders[0].lines.iter().map(|line| line.id).collect();
    assert_eq!(ids, [100, 101, 102]);
}

#[test]
fn empty_owners_run_no_query() {
    let test = DbTest::new();
    let mut orders: Vec<Order> = vec![];

    test.mapper
        .query_merge::<Order>()
        .has_many::<OrderLine>()
        .join_column_many_side("order_id")
        .populate_property("lines")
        .execute(&mut orders, &test.exec)
        .unwrap();

    assert!(test.log().is_empty());
}

#[test]
fn order_by_is_rejected_for_one_to_one() {
    let test = DbTest::new();
    let mut orders = all_orders(&test);

    let err = test
        .mapper
        .query_merge::<Order>()
        .has_one::<Customer>()
        .join_column_owning_side("customer_id")
        .populate_property("customer")
        .order_by("customers.name")
        .execute(&mut orders, &test.exec)
        .unwrap_err();

    assert!(err.is_usage());
}

#[test]
fn merge_requires_a_relationship() {
    let test = DbTest::new();
    let mut orders = all_orders(&test);

    let err = test
        .mapper
        .query_merge::<Order>()
        .execute(&mut orders, &test.exec)
        .unwrap_err();

    assert!(err.is_usage());
}

#[test]
fn merge_labels_keeps_join_key_apart_from_label_columns() {
    let test = DbTest::new();
    let mut shelves = test
        .mapper
        .query::<Shelf>()
        .order_by("shelf.id")
        .execute(&test.exec)
        .unwrap();

    test.mapper
        .query_merge::<Shelf>()
        .many_to_many::<Label>()
        .through_join_table("label_shelf")
        .through_join_columns("id", "label_id")
        .populate_property("labels")
        .order_by("label.id")
        .execute(&mut shelves, &test.exec)
        .unwrap();

    // `label_shelf.id` is the join key; `label.shelf_id` is label data
    assert_eq!(
        shelves[0].labels,
        [
            Label {
                id: 60,
                shelf_id: Some(2),
            },
            Label {
                id: 61,
                shelf_id: Some(1),
            },
        ]
    );
    assert!(shelves[1].labels.is_empty());
}

#[test]
fn one_to_one_merge_clears_unmatched_owners() {
    let test = DbTest::new();
    let mut orders = all_orders(&test);

    let stale = Customer {
        id: 99,
        name: "Stale".to_string(),
    };

    // Order 4 has no customer; order 5 points at one that does not exist
    orders[3].customer = Some(stale.clone());
    orders[4].customer_id = Some(42);
    orders[4].customer = Some(stale);

    test.mapper
        .query_merge::<Order>()
        .has_one::<Customer>()
        .join_column_owning_side("customer_id")
        .populate_property("customer")
        .execute(&mut orders, &test.exec)
        .unwrap();

    let names: Vec<_> = orders
        .iter()
        .map(|order| order.customer.as_ref().map(|c| c.name.as_str()))
        .collect();

    assert_eq!(names, [Some("Ada"), Some("Ada"), Some("Grace"), None, None]);
}
