use pretty_assertions::assert_eq;
use tabula::RelationshipViolation;
use tests::{fixtures::*, DbTest};

#[test]
fn orders_with_their_lines() {
    let test = DbTest::new();

    let orders = test
        .mapper
        .query::<Order>()
        .has_many::<OrderLine>()
        .join_column_many_side("order_id")
        .populate_property("lines")
        .order_by("orders.order_id, order_line.line_id")
        .execute(&test.exec)
        .unwrap();

    let summary: Vec<_> = orders
        .iter()
        .map(|order| {
            let lines: Vec<_> = order.lines.iter().map(|line| line.id).collect();
            (order.id, lines)
        })
        .collect();

    assert_eq!(
        summary,
        [
            (1, vec![100, 101, 102]),
            (2, vec![103]),
            (3, vec![104]),
            (4, vec![]),
            (5, vec![]),
        ]
    );

    let first = &orders[0].lines[0];
    assert_eq!(first.order_id, 1);
    assert_eq!(first.product_id, Some(10));
    assert_eq!(first.quantity, 2);
    assert_eq!(orders[2].lines[0].product_id, None);
}

#[test]
fn repeated_owner_rows_are_merged() {
    let test = DbTest::new();

    let orders = test
        .mapper
        .query::<Order>()
        .has_many::<OrderLine>()
        .join_column_many_side("order_id")
        .populate_property("lines")
        .where_clause("orders.order_id = :id")
        .param("id", 1i64)
        .execute(&test.exec)
        .unwrap();

    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].lines.len(), 3);
    assert_eq!(test.log().pop().unwrap().rows, 3);
}

#[test]
fn limit_is_rejected_for_to_many() {
    let test = DbTest::new();

    let err = test
        .mapper
        .query::<Order>()
        .has_many::<OrderLine>()
        .join_column_many_side("order_id")
        .populate_property("lines")
        .limit_offset_clause("LIMIT 2")
        .execute(&test.exec)
        .unwrap_err();

    assert!(err.is_relationship());
    assert_eq!(
        err.relationship_violations(),
        Some(&[RelationshipViolation::LimitOnPlural][..])
    );
    assert!(test.log().is_empty());
}

#[test]
fn self_join_aliases_the_related_table() {
    let test = DbTest::new();

    let employees = test
        .mapper
        .query::<Employee>()
        .has_many::<Employee>()
        .join_column_many_side("manager_id")
        .populate_property("reports")
        .order_by("employee.employee_id, employee_2.employee_id")
        .execute(&test.exec)
        .unwrap();

    let summary: Vec<_> = employees
        .iter()
        .map(|employee| {
            let reports: Vec<_> = employee.reports.iter().map(|e| e.name.as_str()).collect();
            (employee.name.as_str(), reports)
        })
        .collect();

    assert_eq!(
        summary,
        [
            ("Root", vec!["Left", "Right"]),
            ("Left", vec!["Leaf"]),
            ("Right", vec![]),
            ("Leaf", vec![]),
        ]
    );

    // Related records are loaded one level deep
    assert!(employees[0].reports[0].reports.is_empty());
    assert_eq!(test.log().count_containing("employee_2"), 1);
}

#[test]
fn shelves_with_their_items() {
    let test = DbTest::new();

    let shelves = test
        .mapper
        .query::<Shelf>()
        .has_many::<ShelfItem>()
        .join_column_many_side("shelf_id")
        .populate_property("items")
        .order_by("shelf.id, shelf_item.id")
        .execute(&test.exec)
        .unwrap();

    // `shelf.item_id` and `shelf_item.id` are read from their own columns
    assert_eq!(shelves.len(), 2);
    assert_eq!(shelves[0].item_id, Some(7));
    assert_eq!(
        shelves[0].items,
        [
            ShelfItem {
                id: 50,
                shelf_id: Some(1),
            },
            ShelfItem {
                id: 51,
                shelf_id: Some(1),
            },
        ]
    );

    // The placeholder from `Shelf::default()` is cleared
    assert_eq!(shelves[1].item_id, None);
    assert!(shelves[1].items.is_empty());
}
