//! In-memory SQLite view of a COVID-19 observation table.
//!
//! The cleaned [`ObservationTable`] is loaded once into an in-memory
//! SQLite database; the aggregate views (top-N ranking, global daily
//! series, latest snapshot) and the location/date filter are typed SQL
//! queries against it.
//!
//! # Usage
//!
//! ```rust
//! use cvd_db::Database;
//!
//! let db = Database::from_csv(
//!     "location,date,total_cases\nA,2021-01-01,10\nA,2021-01-02,20\nB,2021-01-01,5\n",
//! )
//! .unwrap();
//!
//! let top = db.top_n_by_total_cases(1).unwrap();
//! assert_eq!(top[0].location, "A");
//! assert_eq!(top[0].value, 20.0);
//! ```
//!
//! Queries never modify the stored rows. Filtering returns a fresh
//! [`ObservationTable`]; build another `Database` from it to aggregate
//! the filtered subset.

mod loader;
pub mod models;
mod queries;
pub mod schema;

use cvd_owid::column::ColumnSet;
use cvd_owid::table::ObservationTable;
use rusqlite::Connection;
use std::cell::RefCell;
use std::rc::Rc;

/// In-memory SQLite database holding one observation table.
///
/// This struct is cheaply cloneable (via `Rc`); clones share the same
/// connection. `columns` records which metric columns carry data.
#[derive(Clone)]
pub struct Database {
    conn: Rc<RefCell<Connection>>,
    columns: ColumnSet,
}

impl Database {
    /// Create a new in-memory database with the schema applied and no rows.
    pub fn new() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(schema::create_schema())?;
        Ok(Self {
            conn: Rc::new(RefCell::new(conn)),
            columns: ColumnSet::empty(),
        })
    }

    /// Create a database holding every row of `table`.
    pub fn from_table(table: &ObservationTable) -> anyhow::Result<Self> {
        let mut db = Self::new()?;
        db.load_table(table)?;
        Ok(db)
    }

    /// Parse CSV text and load it; see [`ObservationTable::from_csv_str`].
    pub fn from_csv(csv_data: &str) -> anyhow::Result<Self> {
        let table = ObservationTable::from_csv_str(csv_data)?;
        Self::from_table(&table)
    }

    /// Metric columns present in the loaded data.
    pub fn columns(&self) -> ColumnSet {
        self.columns
    }
}
