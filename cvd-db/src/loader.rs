//! Loading observation tables into the in-memory database.

use crate::Database;
use cvd_owid::column::{ColumnSet, Metric};
use cvd_owid::table::ObservationTable;
use rusqlite::params;

const INSERT_OBSERVATION: &str = "INSERT INTO observations
    (location, date, total_cases, new_cases, total_deaths, new_deaths,
     total_vaccinations, people_vaccinated, population)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)";

impl Database {
    /// Append every row of `table`, keeping its order.
    ///
    /// Metric columns absent from `table` are stored as NULL. The column
    /// set of the database becomes the union of what has been loaded.
    pub fn load_table(&mut self, table: &ObservationTable) -> anyhow::Result<()> {
        {
            let mut conn = self.conn.borrow_mut();
            let tx = conn.transaction()?;
            {
                let mut stmt = tx.prepare(INSERT_OBSERVATION)?;
                for row in &table.rows {
                    let v = |m: Metric| row.value(m);
                    stmt.execute(params![
                        row.location(),
                        row.date,
                        v(Metric::TotalCases),
                        v(Metric::NewCases),
                        v(Metric::TotalDeaths),
                        v(Metric::NewDeaths),
                        v(Metric::TotalVaccinations),
                        v(Metric::PeopleVaccinated),
                        v(Metric::Population),
                    ])?;
                }
            }
            tx.commit()?;
        }

        self.columns = self.columns.iter().chain(table.columns.iter()).collect::<ColumnSet>();
        log::info!(
            "[CVD] loader: Loaded {} observations ({} metric columns)",
            table.len(),
            self.columns.len()
        );
        Ok(())
    }
}
