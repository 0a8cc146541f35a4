use pretty_assertions::assert_eq;
use tests::{fixtures::*, DbTest};

#[test]
fn orders_with_their_products() {
    let test = DbTest::new();

    let orders = test
        .mapper
        .query::<Order>()
        .many_to_many::<Product>()
        .through_join_table("order_product")
        .through_join_columns("order_id", "product_id")
        .populate_property("products")
        .order_by("orders.order_id, product.product_id")
        .execute(&test.exec)
        .unwrap();

    let summary: Vec<_> = orders
        .iter()
        .map(|order| {
            let products: Vec<_> = order.products.iter().map(|p| p.name.as_str()).collect();
            (order.id, products)
        })
        .collect();

    assert_eq!(
        summary,
        [
            (1, vec!["Widget", "Gadget"]),
            (2, vec!["Widget"]),
            (3, vec!["Gizmo"]),
            (4, vec![]),
            (5, vec![]),
        ]
    );
}

#[test]
fn shared_related_records_are_equal() {
    let test = DbTest::new();

    let orders = test
        .mapper
        .query::<Order>()
        .many_to_many::<Product>()
        .through_join_table("order_product")
        .through_join_columns("order_id", "product_id")
        .populate_property("products")
        .where_clause("product.product_id = :product")
        .param("product", 10i64)
        .order_by("orders.order_id")
        .execute(&test.exec)
        .unwrap();

    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].products, orders[1].products);
}
