use pretty_assertions::assert_eq;
use tabula::Query;
use tests::{fixtures::*, DbTest};

fn orders_with_customer(test: &DbTest) -> Query<'_, Order> {
    test.mapper
        .query::<Order>()
        .has_one::<Customer>()
        .join_column_owning_side("customer_id")
        .populate_property("customer")
        .order_by("orders.order_id")
}

#[test]
fn orders_with_their_customer() {
    let test = DbTest::new();
    let orders = orders_with_customer(&test).execute(&test.exec).unwrap();

    let summary: Vec<_> = orders
        .iter()
        .map(|order| (order.id, order.customer.as_ref().map(|c| c.name.as_str())))
        .collect();

    assert_eq!(
        summary,
        [
            (1, Some("Ada")),
            (2, Some("Ada")),
            (3, Some("Grace")),
            (4, None),
            (5, Some("Linus")),
        ]
    );
    assert_eq!(test.log().len(), 1);
}

#[test]
fn shape_is_generated_once() {
    let test = DbTest::new();

    let first = orders_with_customer(&test).execute(&test.exec).unwrap();
    let second = orders_with_customer(&test).execute(&test.exec).unwrap();

    assert_eq!(first, second);

    let stats = test.mapper.cache_stats().query;
    assert_eq!(stats.entries, 1);
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.hits, 1);

    let sql = test.log().sql();
    assert_eq!(sql[0], sql[1]);
}

#[test]
fn where_clause_references_the_related_table() {
    let test = DbTest::new();

    let orders = orders_with_customer(&test)
        .where_clause("customers.name = :name")
        .param("name", "Ada")
        .execute(&test.exec)
        .unwrap();

    let ids: Vec<_> = orders.iter().map(|order| order.id).collect();
    assert_eq!(ids, [1, 2]);
    assert!(orders.iter().all(|order| order.customer_id == Some(1)));
}

#[test]
fn limit_applies_to_one_to_one() {
    let test = DbTest::new();

    let orders = orders_with_customer(&test)
        .limit_offset_clause("LIMIT 2 OFFSET 1")
        .execute(&test.exec)
        .unwrap();

    let ids: Vec<_> = orders.iter().map(|order| order.id).collect();
    assert_eq!(ids, [2, 3]);
}

#[test]
fn plain_query_without_relationship() {
    let test = DbTest::new();

    let orders = test
        .mapper
        .query::<Order>()
        .where_clause("orders.status = :status")
        .param("status", "open")
        .order_by("orders.order_id DESC")
        .execute(&test.exec)
        .unwrap();

    let ids: Vec<_> = orders.iter().map(|order| order.id).collect();
    assert_eq!(ids, [4, 3, 1]);
    assert!(orders.iter().all(|order| order.customer.is_none()));
}

#[test]
fn shelves_with_their_featured_item() {
    let test = DbTest::new();

    let shelves = test
        .mapper
        .query::<Shelf>()
        .has_one::<ShelfItem>()
        .join_column_owning_side("item_id")
        .populate_property("featured")
        .order_by("shelf.id")
        .execute(&test.exec)
        .unwrap();

    let summary: Vec<_> = shelves
        .iter()
        .map(|shelf| (shelf.id, shelf.item_id, shelf.featured.clone()))
        .collect();

    assert_eq!(
        summary,
        [
            (
                1,
                Some(7),
                Some(ShelfItem {
                    id: 7,
                    shelf_id: None,
                })
            ),
            (2, None, None),
        ]
    );
}
