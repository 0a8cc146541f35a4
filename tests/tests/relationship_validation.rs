use pretty_assertions::assert_eq;
use tabula::RelationshipViolation;
use tests::{fixtures::*, DbTest};

#[test]
fn unknown_populate_property() {
    let test = DbTest::new();

    let err = test
        .mapper
        .query::<Order>()
        .has_many::<OrderLine>()
        .join_column_many_side("order_id")
        .populate_property("items")
        .execute(&test.exec)
        .unwrap_err();

    assert_eq!(
        err.relationship_violations(),
        Some(
            &[RelationshipViolation::PropertyNotFound {
                property: "items".to_string()
            }][..]
        )
    );
    assert!(test.log().is_empty());
}

#[test]
fn mapped_property_is_not_a_relationship() {
    let test = DbTest::new();

    let err = test
        .mapper
        .query::<Order>()
        .has_one::<Customer>()
        .join_column_owning_side("customer_id")
        .populate_property("status")
        .execute(&test.exec)
        .unwrap_err();

    assert_eq!(
        err.relationship_violations(),
        Some(
            &[RelationshipViolation::NotARelationship {
                property: "status".to_string()
            }][..]
        )
    );
}

#[test]
fn property_of_the_wrong_type() {
    let test = DbTest::new();

    let err = test
        .mapper
        .query::<Order>()
        .has_one::<Customer>()
        .join_column_owning_side("customer_id")
        .populate_property("lines")
        .execute(&test.exec)
        .unwrap_err();

    let violations = err.relationship_violations().unwrap();
    assert_eq!(violations.len(), 1);
    assert!(matches!(
        &violations[0],
        RelationshipViolation::PropertyTypeMismatch { property, .. } if property == "lines"
    ));
}

#[test]
fn join_column_must_exist() {
    let test = DbTest::new();

    let err = test
        .mapper
        .query::<Order>()
        .has_many::<OrderLine>()
        .join_column_many_side("purchase_id")
        .populate_property("lines")
        .execute(&test.exec)
        .unwrap_err();

    let violations = err.relationship_violations().unwrap();
    assert!(matches!(
        &violations[0],
        RelationshipViolation::JoinColumnNotFound { column, .. } if column == "purchase_id"
    ));
}

#[test]
fn missing_join_column_and_wrong_property_are_reported_together() {
    let test = DbTest::new();

    let err = test
        .mapper
        .query::<Order>()
        .has_many::<OrderLine>()
        .populate_property("customer")
        .execute(&test.exec)
        .unwrap_err();

    let violations = err.relationship_violations().unwrap();
    assert_eq!(violations.len(), 2);
    assert!(violations.contains(&RelationshipViolation::MissingJoinColumn));
}

#[test]
fn many_to_many_requires_a_join_table() {
    let test = DbTest::new();

    let err = test
        .mapper
        .query::<Order>()
        .many_to_many::<Product>()
        .populate_property("products")
        .execute(&test.exec)
        .unwrap_err();

    let violations = err.relationship_violations().unwrap();
    assert!(violations.contains(&RelationshipViolation::MissingThroughTable));
}

#[test]
fn failed_verification_is_not_cached() {
    let test = DbTest::new();

    let query = || {
        test.mapper
            .query::<Order>()
            .has_many::<OrderLine>()
            .join_column_many_side("purchase_id")
            .populate_property("lines")
            .execute(&test.exec)
    };

    assert!(query().is_err());
    assert!(query().is_err());
    assert_eq!(test.mapper.cache_stats().query.entries, 0);
}
