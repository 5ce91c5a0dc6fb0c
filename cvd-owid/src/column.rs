use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of the required location column.
pub const LOCATION_COLUMN: &str = "location";

/// Name of the required date column.
pub const DATE_COLUMN: &str = "date";

/// A numeric column of the dataset allow-list.
///
/// Variants are declared in allow-list order, which is also the column
/// order used when exporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    TotalCases,
    NewCases,
    TotalDeaths,
    NewDeaths,
    TotalVaccinations,
    PeopleVaccinated,
    Population,
}

impl Metric {
    /// Every metric, in allow-list order.
    pub const ALL: [Metric; 7] = [
        Metric::TotalCases,
        Metric::NewCases,
        Metric::TotalDeaths,
        Metric::NewDeaths,
        Metric::TotalVaccinations,
        Metric::PeopleVaccinated,
        Metric::Population,
    ];

    /// Metrics shown in the latest-statistics table.
    pub const SNAPSHOT: [Metric; 6] = [
        Metric::TotalCases,
        Metric::NewCases,
        Metric::TotalDeaths,
        Metric::NewDeaths,
        Metric::TotalVaccinations,
        Metric::PeopleVaccinated,
    ];

    /// Column name in the CSV header.
    pub fn column_name(self) -> &'static str {
        match self {
            Metric::TotalCases => "total_cases",
            Metric::NewCases => "new_cases",
            Metric::TotalDeaths => "total_deaths",
            Metric::NewDeaths => "new_deaths",
            Metric::TotalVaccinations => "total_vaccinations",
            Metric::PeopleVaccinated => "people_vaccinated",
            Metric::Population => "population",
        }
    }

    /// Human readable label for axes and table headers.
    pub fn label(self) -> &'static str {
        match self {
            Metric::TotalCases => "Total Cases",
            Metric::NewCases => "Daily New Cases",
            Metric::TotalDeaths => "Total Deaths",
            Metric::NewDeaths => "New Deaths",
            Metric::TotalVaccinations => "Total Vaccinations",
            Metric::PeopleVaccinated => "People Vaccinated",
            Metric::Population => "Population",
        }
    }

    /// Look up a metric by its CSV column name.
    pub fn from_column_name(name: &str) -> Option<Metric> {
        Metric::ALL.into_iter().find(|m| m.column_name() == name)
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// The metrics a table actually carries.
///
/// Decided once from the source header; a metric outside the set has no
/// values anywhere in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct ColumnSet {
    present: [bool; Metric::ALL.len()],
}

impl ColumnSet {
    /// A set with no metrics.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a set from the header names of a source, ignoring anything
    /// outside the allow-list.
    pub fn from_header<'a, I>(names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut set = Self::empty();
        for name in names {
            if let Some(metric) = Metric::from_column_name(name.trim()) {
                set.insert(metric);
            }
        }
        set
    }

    pub fn insert(&mut self, metric: Metric) {
        self.present[metric.index()] = true;
    }

    pub fn contains(&self, metric: Metric) -> bool {
        self.present[metric.index()]
    }

    /// Present metrics, in allow-list order.
    pub fn iter(&self) -> impl Iterator<Item = Metric> + '_ {
        Metric::ALL.into_iter().filter(|m| self.contains(*m))
    }

    pub fn len(&self) -> usize {
        self.present.iter().filter(|p| **p).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromIterator<Metric> for ColumnSet {
    fn from_iter<T: IntoIterator<Item = Metric>>(iter: T) -> Self {
        let mut set = Self::empty();
        for metric in iter {
            set.insert(metric);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_column_names_round_trip() {
        for metric in Metric::ALL {
            assert_eq!(Metric::from_column_name(metric.column_name()), Some(metric));
        }
        assert_eq!(Metric::from_column_name("iso_code"), None);
    }

    #[test]
    fn column_set_from_header_keeps_allow_list_only() {
        let header = ["iso_code", "location", "date", "new_cases", " total_cases ", "gdp"];
        let set = ColumnSet::from_header(header);
        assert_eq!(set.len(), 2);
        assert!(set.contains(Metric::TotalCases));
        assert!(set.contains(Metric::NewCases));
        assert!(!set.contains(Metric::PeopleVaccinated));
        // Iteration follows allow-list order, not header order.
        let ordered: Vec<Metric> = set.iter().collect();
        assert_eq!(ordered, vec![Metric::TotalCases, Metric::NewCases]);
    }

    #[test]
    fn column_set_empty() {
        assert!(ColumnSet::empty().is_empty());
        assert_eq!(ColumnSet::empty().len(), 0);
    }
}
