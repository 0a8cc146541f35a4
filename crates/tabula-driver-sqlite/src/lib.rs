mod params;
use params::expand;

mod row;
use row::SqliteRow;

mod value;

use rusqlite::{params_from_iter, Connection};
use std::{
    path::{Path, PathBuf},
    sync::{Mutex, PoisonError},
};
use tabula_core::{
    driver::{ColumnMetadata, Executor, Row},
    schema::db::{self, Column, TableRef},
    stmt::Params,
    Error, Result,
};
use url::Url;

/// A SQLite database serving as both the column metadata provider and the
/// executor of generated SQL.
#[derive(Debug)]
pub struct Sqlite {
    location: Location,
    connection: Mutex<Connection>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Location {
    File(PathBuf),
    InMemory,
}

impl Sqlite {
    /// Opens a database from a connection URL: `sqlite::memory:` or
    /// `sqlite:<path>`.
    pub fn new(url: impl Into<String>) -> Result<Sqlite> {
        let url_str = url.into();
        let url = Url::parse(&url_str).map_err(Error::driver)?;

        if url.scheme() != "sqlite" {
            return Err(Error::usage(format!(
                "connection URL does not have a `sqlite` scheme; url={url_str}"
            )));
        }

        if url.path() == ":memory:" {
            Sqlite::in_memory()
        } else {
            Sqlite::open(url.path())
        }
    }

    /// Opens a fresh in-memory database
    pub fn in_memory() -> Result<Sqlite> {
        let connection = Connection::open_in_memory().map_err(Error::driver)?;
        Ok(Sqlite::from_connection(Location::InMemory, connection))
    }

    /// Opens the database file at `path`, creating it if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Sqlite> {
        let path = path.as_ref().to_path_buf();
        let connection = Connection::open(&path).map_err(Error::driver)?;
        Ok(Sqlite::from_connection(Location::File(path), connection))
    }

    fn from_connection(location: Location, connection: Connection) -> Sqlite {
        Sqlite {
            location,
            connection: Mutex::new(connection),
        }
    }

    /// The connection URL of this database.
    pub fn url(&self) -> String {
        match &self.location {
            Location::InMemory => "sqlite::memory:".to_string(),
            Location::File(path) => format!("sqlite:{}", path.display()),
        }
    }

    /// Runs one or more statements without parameters, such as schema
    /// setup and seed data.
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        self.connection().execute_batch(sql).map_err(Error::driver)
    }

    fn connection(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.connection.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ColumnMetadata for Sqlite {
    fn columns(&self, table: &TableRef) -> Result<Vec<Column>> {
        let connection = self.connection();

        let mut stmt = connection
            .prepare_cached("SELECT name, type FROM pragma_table_info(?1, ?2) ORDER BY cid")
            .map_err(Error::driver)?;

        let schema = table.schema.as_deref().unwrap_or("main");

        let columns = stmt
            .query_map((&table.name, schema), |row| {
                let name: String = row.get(0)?;
                let ty: String = row.get(1)?;
                Ok(Column::new(name, db::Type::from_sql(&ty)))
            })
            .map_err(Error::driver)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(Error::driver)?;

        tracing::trace!(table = %table, columns = columns.len(), "read table columns");

        Ok(columns)
    }
}

impl Executor for Sqlite {
    fn query(
        &self,
        sql: &str,
        params: &Params,
        each: &mut dyn FnMut(&dyn Row) -> Result<()>,
    ) -> Result<()> {
        let (sql, values) = expand(sql, params)?;

        tracing::trace!(sql = %sql, params = values.len(), "sqlite query");

        let connection = self.connection();
        let mut stmt = connection.prepare(&sql).map_err(Error::driver)?;

        let labels: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect();

        let mut rows = stmt
            .query(params_from_iter(values.iter()))
            .map_err(Error::driver)?;

        while let Some(row) = rows.next().map_err(Error::driver)? {
            let row = SqliteRow::read(&labels, row)?;
            each(&row)?;
        }

        Ok(())
    }
}
