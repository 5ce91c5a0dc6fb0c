//! SQL schema for the in-memory observation store.
//!
//! One table holds every row of a loaded dataset. `row_order` is the
//! rowid alias and preserves source order; metric columns absent from the
//! source stay NULL for every row.

/// Returns the full SQL schema as a single batch string.
pub fn create_schema() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS observations (
        row_order INTEGER PRIMARY KEY,
        location TEXT,
        date TEXT NOT NULL,
        total_cases REAL,
        new_cases REAL,
        total_deaths REAL,
        new_deaths REAL,
        total_vaccinations REAL,
        people_vaccinated REAL,
        population REAL
    );
    CREATE INDEX IF NOT EXISTS idx_obs_location ON observations(location);
    CREATE INDEX IF NOT EXISTS idx_obs_date ON observations(date);
    "#
}
