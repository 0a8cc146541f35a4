mod exec_log;
pub use exec_log::{ExecLog, ExecOp};

pub mod fixtures;

mod logging_executor;
pub use logging_executor::LoggingExecutor;

use std::sync::Arc;
use tabula::{Config, Mapper};
use tabula_driver_sqlite::Sqlite;

/// Tables shared by the integration tests.
pub const SCHEMA: &str = "
    CREATE TABLE customers (
        customer_id INTEGER PRIMARY KEY,
        name        TEXT NOT NULL
    );

    CREATE TABLE orders (
        order_id    INTEGER PRIMARY KEY,
        customer_id INTEGER,
        status      VARCHAR(20) NOT NULL,
        version     INTEGER NOT NULL DEFAULT 1,
        placed_on   TIMESTAMP
    );

    CREATE TABLE order_line (
        line_id    INTEGER PRIMARY KEY,
        order_id   INTEGER NOT NULL,
        product_id INTEGER,
        quantity   INTEGER NOT NULL
    );

    CREATE TABLE product (
        product_id INTEGER PRIMARY KEY,
        name       TEXT NOT NULL
    );

    CREATE TABLE order_product (
        order_id   INTEGER NOT NULL,
        product_id INTEGER NOT NULL
    );

    CREATE TABLE employee (
        employee_id INTEGER PRIMARY KEY,
        name        TEXT NOT NULL,
        manager_id  INTEGER
    );

    CREATE TABLE shelf (
        id      INTEGER PRIMARY KEY,
        item_id INTEGER
    );

    CREATE TABLE shelf_item (
        id       INTEGER PRIMARY KEY,
        shelf_id INTEGER
    );

    CREATE TABLE label (
        id       INTEGER PRIMARY KEY,
        shelf_id INTEGER
    );

    CREATE TABLE label_shelf (
        id       INTEGER NOT NULL,
        label_id INTEGER NOT NULL
    );
";

/// Three customers; order 4 has no customer and order 5 has no lines.
///
/// The shelf tables have names whose `<table>_<column>` forms overlap:
/// `shelf.item_id` and `shelf_item.id` both read `shelf_item_id`, and
/// `label_shelf.id` and `label.shelf_id` both read `label_shelf_id`.
pub const SEED: &str = "
    INSERT INTO customers VALUES (1, 'Ada'), (2, 'Grace'), (3, 'Linus');

    INSERT INTO orders (order_id, customer_id, status, version, placed_on) VALUES
        (1, 1, 'open',    1, '2024-03-01 09:30:00'),
        (2, 1, 'shipped', 2, '2024-03-02 10:00:00'),
        (3, 2, 'open',    1, NULL),
        (4, NULL, 'open', 1, NULL),
        (5, 3, 'void',    3, NULL);

    INSERT INTO product VALUES (10, 'Widget'), (11, 'Gadget'), (12, 'Gizmo');

    INSERT INTO order_line VALUES
        (100, 1, 10, 2),
        (101, 1, 11, 1),
        (102, 1, 12, 5),
        (103, 2, 10, 1),
        (104, 3, NULL, 4);

    INSERT INTO order_product VALUES (1, 10), (1, 11), (2, 10), (3, 12);

    INSERT INTO employee VALUES
        (1, 'Root', NULL),
        (2, 'Left', 1),
        (3, 'Right', 1),
        (4, 'Leaf', 2);

    INSERT INTO shelf VALUES (1, 7), (2, NULL);
    INSERT INTO shelf_item VALUES (7, NULL), (50, 1), (51, 1);
    INSERT INTO label VALUES (60, 2), (61, 1);
    INSERT INTO label_shelf VALUES (1, 60), (1, 61);
";

/// An in-memory database with the test schema and seed data, a mapper over
/// it and a logging executor.
pub struct DbTest {
    pub db: Arc<Sqlite>,
    pub mapper: Mapper,
    pub exec: LoggingExecutor,
}

impl DbTest {
    pub fn new() -> DbTest {
        DbTest::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> DbTest {
        let db = Arc::new(Sqlite::in_memory().unwrap());
        db.execute_batch(SCHEMA).unwrap();
        db.execute_batch(SEED).unwrap();

        let mapper = Mapper::builder().config(config).build(db.clone()).unwrap();
        let exec = LoggingExecutor::new(db.clone());

        DbTest { db, mapper, exec }
    }

    /// Queries executed so far
    pub fn log(&self) -> ExecLog {
        self.exec.log()
    }
}

impl Default for DbTest {
    fn default() -> Self {
        DbTest::new()
    }
}
