mod property;
pub use property::PropertyMapping;

mod table;
pub use table::TableMapping;
