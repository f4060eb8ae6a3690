use std::fmt;
use std::path::PathBuf;

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Column names of the survey CSV
// ---------------------------------------------------------------------------

pub const COL_INDICATOR: &str = "Indicator";
pub const COL_GROUP: &str = "Group";
pub const COL_SUBGROUP: &str = "Subgroup";
pub const COL_TIME_PERIOD: &str = "Time Period";
pub const COL_VALUE: &str = "Value";
pub const COL_CI_LOW: &str = "Confidence Interval (Low Bound)";
pub const COL_CI_HIGH: &str = "Confidence Interval (High Bound)";

/// Columns a file must carry for any row to survive cleaning.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    COL_INDICATOR,
    COL_GROUP,
    COL_SUBGROUP,
    COL_TIME_PERIOD,
    COL_VALUE,
];

// ---------------------------------------------------------------------------
// RawRow – one untyped CSV row
// ---------------------------------------------------------------------------

/// One CSV row as read from disk. Empty or missing cells are `None`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawRow {
    #[serde(rename = "Indicator")]
    pub indicator: Option<String>,
    #[serde(rename = "Group")]
    pub group: Option<String>,
    #[serde(rename = "Subgroup")]
    pub subgroup: Option<String>,
    #[serde(rename = "Time Period")]
    pub time_period: Option<String>,
    #[serde(rename = "Value")]
    pub value: Option<String>,
    #[serde(rename = "Confidence Interval (Low Bound)")]
    pub ci_low: Option<String>,
    #[serde(rename = "Confidence Interval (High Bound)")]
    pub ci_high: Option<String>,
}

// ---------------------------------------------------------------------------
// RecordCandidate – normalizer output, not yet validated
// ---------------------------------------------------------------------------

/// A normalized row whose fields may still be missing or non-finite.
#[derive(Debug, Clone, Default)]
pub struct RecordCandidate {
    pub indicator: Option<String>,
    pub group: Option<String>,
    pub subgroup: Option<String>,
    pub time_period: Option<String>,
    pub value: Option<f64>,
    pub ci_lower: Option<f64>,
    pub ci_upper: Option<f64>,
}

impl RecordCandidate {
    /// Apply the retention predicate: all four labels non-empty and a finite
    /// `value`. CI bounds pass through untouched.
    pub fn into_record(self) -> Option<CleanedRecord> {
        let value = self.value.filter(|v| v.is_finite())?;
        Some(CleanedRecord {
            indicator: non_empty(self.indicator)?,
            group: non_empty(self.group)?,
            subgroup: non_empty(self.subgroup)?,
            time_period: non_empty(self.time_period)?,
            value,
            ci_lower: self.ci_lower,
            ci_upper: self.ci_upper,
        })
    }
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.is_empty())
}

// ---------------------------------------------------------------------------
// CleanedRecord – one retained survey estimate
// ---------------------------------------------------------------------------

/// A single cleaned survey estimate.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanedRecord {
    pub indicator: String,
    pub group: String,
    pub subgroup: String,
    pub time_period: String,
    /// Percentage, always finite.
    pub value: f64,
    /// `Some(NaN)` when the cell was present but unparseable.
    pub ci_lower: Option<f64>,
    pub ci_upper: Option<f64>,
}

impl CleanedRecord {
    /// String value of one of the filterable dimensions.
    pub fn field(&self, field: RecordField) -> &str {
        match field {
            RecordField::Group => &self.group,
            RecordField::TimePeriod => &self.time_period,
            RecordField::Indicator => &self.indicator,
        }
    }

    /// Both CI bounds, if both are present and finite.
    pub fn ci(&self) -> Option<(f64, f64)> {
        match (self.ci_lower, self.ci_upper) {
            (Some(lo), Some(hi)) if lo.is_finite() && hi.is_finite() => Some((lo, hi)),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// RecordField – the three filterable dimensions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordField {
    Group,
    TimePeriod,
    Indicator,
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordField::Group => write!(f, "{COL_GROUP}"),
            RecordField::TimePeriod => write!(f, "{COL_TIME_PERIOD}"),
            RecordField::Indicator => write!(f, "{COL_INDICATOR}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// All retained records of one file, in source order.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub records: Vec<CleanedRecord>,
    /// Data rows read from the file (header excluded).
    pub rows_read: usize,
    /// Source file, when loaded from disk.
    pub source: Option<PathBuf>,
}

impl Dataset {
    /// Number of retained records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no record survived cleaning.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rows excluded by the retention predicate.
    pub fn rows_dropped(&self) -> usize {
        self.rows_read.saturating_sub(self.records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate() -> RecordCandidate {
        RecordCandidate {
            indicator: Some("Anxiety".into()),
            group: Some("By Age".into()),
            subgroup: Some("18 - 29 Years".into()),
            time_period: Some("Aug 19 - Aug 31, 2020".into()),
            value: Some(12.5),
            ci_lower: None,
            ci_upper: None,
        }
    }

    #[test]
    fn test_complete_candidate_is_retained() {
        let rec = candidate().into_record().expect("retained");
        assert_eq!(rec.group, "By Age");
        assert_eq!(rec.value, 12.5);
        assert!(rec.ci_lower.is_none());
    }

    #[test]
    fn test_missing_label_is_dropped() {
        let mut c = candidate();
        c.subgroup = None;
        assert!(c.into_record().is_none());

        let mut c = candidate();
        c.group = Some(String::new());
        assert!(c.into_record().is_none());
    }

    #[test]
    fn test_non_finite_value_is_dropped() {
        for v in [None, Some(f64::NAN), Some(f64::INFINITY)] {
            let mut c = candidate();
            c.value = v;
            assert!(c.into_record().is_none());
        }
    }

    #[test]
    fn test_nan_ci_is_kept_but_not_drawable() {
        let mut c = candidate();
        c.ci_lower = Some(f64::NAN);
        c.ci_upper = Some(14.0);
        let rec = c.into_record().expect("retained");
        assert!(rec.ci_lower.is_some_and(f64::is_nan));
        assert_eq!(rec.ci(), None);
    }

    #[test]
    fn test_field_accessor() {
        let rec = candidate().into_record().unwrap();
        assert_eq!(rec.field(RecordField::Group), "By Age");
        assert_eq!(rec.field(RecordField::TimePeriod), "Aug 19 - Aug 31, 2020");
        assert_eq!(rec.field(RecordField::Indicator), "Anxiety");
    }
}
