//! The active selection driving the interactive part of the dashboard.

use chrono::NaiveDate;
use cvd_owid::date_range::DateRange;
use cvd_owid::table::ObservationTable;

/// Locations preselected when the user picks none.
pub const DEFAULT_LOCATIONS: [&str; 3] = ["India", "United States", "Brazil"];

/// Selected locations and date range.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub locations: Vec<String>,
    pub date_range: DateRange,
}

impl Selection {
    /// Resolve user input against the loaded table.
    ///
    /// With no requested locations, the defaults present in the data are
    /// used. Missing `start`/`end` default to the table's date bounds.
    /// Requested values are kept as given, so a selection can match
    /// nothing.
    pub fn resolve(
        table: &ObservationTable,
        requested: &[String],
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Self {
        let locations = if requested.is_empty() {
            let available = table.locations();
            DEFAULT_LOCATIONS
                .iter()
                .filter(|loc| available.iter().any(|a| a == *loc))
                .map(|loc| loc.to_string())
                .collect()
        } else {
            requested.to_vec()
        };

        let bounds = table.date_bounds();
        let fallback_day = NaiveDate::default();
        let date_range = DateRange(
            start.or(bounds.map(|b| b.start())).unwrap_or(fallback_day),
            end.or(bounds.map(|b| b.end())).unwrap_or(fallback_day),
        );

        log::info!(
            "[CVD] state: selected {} locations, {}",
            locations.len(),
            date_range
        );
        Self {
            locations,
            date_range,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
location,date,total_cases
India,2021-01-01,1
Chile,2021-01-02,2
Brazil,2021-01-05,3
";

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn defaults_use_known_locations_and_full_range() {
        let table = ObservationTable::from_csv_str(CSV).unwrap();
        let selection = Selection::resolve(&table, &[], None, None);
        assert_eq!(selection.locations, vec!["India", "Brazil"]);
        assert_eq!(
            selection.date_range,
            DateRange(date("2021-01-01"), date("2021-01-05"))
        );
    }

    #[test]
    fn explicit_values_are_kept() {
        let table = ObservationTable::from_csv_str(CSV).unwrap();
        let requested = vec!["Chile".to_string(), "Narnia".to_string()];
        let selection =
            Selection::resolve(&table, &requested, Some(date("2021-01-02")), None);
        assert_eq!(selection.locations, requested);
        assert_eq!(selection.date_range.start(), date("2021-01-02"));
        assert_eq!(selection.date_range.end(), date("2021-01-05"));
    }
}
