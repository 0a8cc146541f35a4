use chrono::NaiveDateTime;
use tabula::Record;

#[derive(Debug, Default, Clone, PartialEq, Record)]
#[table = "customers"]
pub struct Customer {
    #[key]
    #[column("customer_id")]
    pub id: i64,

    pub name: String,
}

#[derive(Debug, Default, Clone, PartialEq, Record)]
#[table = "orders"]
pub struct Order {
    #[key]
    #[column("order_id")]
    pub id: i64,

    pub customer_id: Option<i64>,

    pub status: String,

    #[version]
    pub version: i64,

    pub placed_on: Option<NaiveDateTime>,

    #[relation]
    pub customer: Option<Customer>,

    #[relation]
    pub lines: Vec<OrderLine>,

    #[relation]
    pub products: Vec<Product>,

    #[skip]
    pub note: String,
}

#[derive(Debug, Default, Clone, PartialEq, Record)]
#[table = "order_line"]
pub struct OrderLine {
    #[key]
    #[column("line_id")]
    pub id: i64,

    pub order_id: i64,

    pub product_id: Option<i64>,

    pub quantity: i32,

    #[relation]
    pub product: Option<Product>,
}

#[derive(Debug, Default, Clone, PartialEq, Record)]
#[table = "product"]
pub struct Product {
    #[key]
    #[column("product_id")]
    pub id: i64,

    pub name: String,
}

/// Self-referencing record; `reports` are employees whose manager is this
/// one.
#[derive(Debug, Default, Clone, PartialEq, Record)]
#[table = "employee"]
pub struct Employee {
    #[key]
    #[column("employee_id")]
    pub id: i64,

    pub name: String,

    pub manager_id: Option<i64>,

    #[relation]
    pub reports: Vec<Employee>,
}

#[derive(Debug, Clone, PartialEq, Record)]
#[table = "shelf"]
pub struct Shelf {
    #[key]
    pub id: i64,

    /// The featured item
    pub item_id: Option<i64>,

    #[relation]
    pub featured: Option<ShelfItem>,

    #[relation]
    pub items: Vec<ShelfItem>,

    #[relation]
    pub labels: Vec<Label>,
}

/// A new shelf starts out holding a placeholder item.
impl Default for Shelf {
    fn default() -> Self {
        Shelf {
            id: 0,
            item_id: None,
            featured: None,
            items: vec![ShelfItem::placeholder()],
            labels: vec![],
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Record)]
#[table = "shelf_item"]
pub struct ShelfItem {
    #[key]
    pub id: i64,

    pub shelf_id: Option<i64>,
}

impl ShelfItem {
    pub fn placeholder() -> ShelfItem {
        ShelfItem {
            id: 999,
            shelf_id: None,
        }
    }
}

/// A label printed for one shelf and attached to others through
/// `label_shelf`.
#[derive(Debug, Default, Clone, PartialEq, Record)]
#[table = "label"]
pub struct Label {
    #[key]
    pub id: i64,

    pub shelf_id: Option<i64>,
}
