use std::collections::BTreeSet;

use super::model::{CleanedRecord, RecordField};

/// Distinct values of `field`, in ascending lexicographic order.
pub fn distinct_sorted(records: &[CleanedRecord], field: RecordField) -> Vec<String> {
    records
        .iter()
        .map(|r| r.field(field))
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Option lists for the three selection controls, built once per dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCatalog {
    pub groups: Vec<String>,
    pub time_periods: Vec<String>,
    pub indicators: Vec<String>,
}

impl FilterCatalog {
    pub fn from_records(records: &[CleanedRecord]) -> Self {
        Self {
            groups: distinct_sorted(records, RecordField::Group),
            time_periods: distinct_sorted(records, RecordField::TimePeriod),
            indicators: distinct_sorted(records, RecordField::Indicator),
        }
    }

    pub fn options(&self, field: RecordField) -> &[String] {
        match field {
            RecordField::Group => &self.groups,
            RecordField::TimePeriod => &self.time_periods,
            RecordField::Indicator => &self.indicators,
        }
    }
}
