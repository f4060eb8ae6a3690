use super::model::{RawRow, RecordCandidate};

/// Characters stripped from numeric cells before parsing.
const NUMERIC_NOISE: [char; 3] = ['%', ',', '$'];

/// Title-case a label: trim, lowercase, then uppercase the first character of
/// each whitespace-separated token. Runs of whitespace collapse to one space.
///
/// Absent, empty, or all-whitespace input yields `None`. Casing is naive:
/// acronyms such as "LGBT" come out as "Lgbt".
pub fn clean_string(raw: Option<&str>) -> Option<String> {
    let raw = raw.filter(|s| !s.is_empty())?;
    let lowered = raw.trim().to_lowercase();
    let cleaned = lowered
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ");
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Parse a numeric cell such as `"12.5%"` or `"$1,200"`.
///
/// Absent or empty input yields `None`. Anything that is present but does not
/// parse after stripping yields `Some(NaN)`, so callers can tell "missing"
/// from "garbage".
pub fn parse_number(raw: Option<&str>) -> Option<f64> {
    let raw = raw.filter(|s| !s.is_empty())?;
    let stripped: String = raw.chars().filter(|c| !NUMERIC_NOISE.contains(c)).collect();
    Some(stripped.trim().parse::<f64>().unwrap_or(f64::NAN))
}

/// Normalize every field of a raw row. Pure.
pub fn normalize(row: &RawRow) -> RecordCandidate {
    RecordCandidate {
        indicator: clean_string(row.indicator.as_deref()),
        group: clean_string(row.group.as_deref()),
        subgroup: clean_string(row.subgroup.as_deref()),
        time_period: clean_string(row.time_period.as_deref()),
        value: parse_number(row.value.as_deref()),
        ci_lower: parse_number(row.ci_low.as_deref()),
        ci_upper: parse_number(row.ci_high.as_deref()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(group: &str, value: &str) -> RawRow {
        RawRow {
            indicator: Some("took prescription medication for mental health".into()),
            group: Some(group.into()),
            subgroup: Some("18 - 29 years".into()),
            time_period: Some("aug 19 - aug 31, 2020".into()),
            value: Some(value.into()),
            ci_low: Some("17.5".into()),
            ci_high: None,
        }
    }

    #[test]
    fn test_clean_string_absent_and_empty() {
        assert_eq!(clean_string(None), None);
        assert_eq!(clean_string(Some("")), None);
        assert_eq!(clean_string(Some("   ")), None);
    }

    #[test]
    fn test_clean_string_title_case() {
        assert_eq!(
            clean_string(Some("  mOOD   disorder ")),
            Some("Mood Disorder".to_string())
        );
        assert_eq!(clean_string(Some("BY AGE")), Some("By Age".to_string()));
        assert_eq!(
            clean_string(Some("18 - 29 years")),
            Some("18 - 29 Years".to_string())
        );
    }

    #[test]
    fn test_clean_string_is_naive_about_acronyms() {
        assert_eq!(clean_string(Some("LGBT adults")), Some("Lgbt Adults".to_string()));
        assert_eq!(clean_string(Some("(severe)")), Some("(severe)".to_string()));
    }

    #[test]
    fn test_parse_number_strips_noise() {
        assert_eq!(parse_number(Some("12.5%")), Some(12.5));
        assert_eq!(parse_number(Some("$1,200")), Some(1200.0));
        assert_eq!(parse_number(Some("  7 ")), Some(7.0));
        assert_eq!(parse_number(Some("-0.5")), Some(-0.5));
    }

    #[test]
    fn test_parse_number_absent_and_empty() {
        assert_eq!(parse_number(None), None);
        assert_eq!(parse_number(Some("")), None);
    }

    #[test]
    fn test_parse_number_garbage_is_nan() {
        assert!(parse_number(Some("n/a")).unwrap().is_nan());
        assert!(parse_number(Some("%")).unwrap().is_nan());
        assert!(parse_number(Some("   ")).unwrap().is_nan());
    }

    #[test]
    fn test_normalize_fields() {
        let c = normalize(&raw("by age", "22.4"));
        assert_eq!(
            c.indicator.as_deref(),
            Some("Took Prescription Medication For Mental Health")
        );
        assert_eq!(c.group.as_deref(), Some("By Age"));
        assert_eq!(c.time_period.as_deref(), Some("Aug 19 - Aug 31, 2020"));
        assert_eq!(c.value, Some(22.4));
        assert_eq!(c.ci_lower, Some(17.5));
        assert_eq!(c.ci_upper, None);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let row = raw("By Sex", "not a number");
        let a = normalize(&row);
        let b = normalize(&row);
        assert_eq!(a.indicator, b.indicator);
        assert_eq!(a.group, b.group);
        assert_eq!(a.subgroup, b.subgroup);
        assert_eq!(a.time_period, b.time_period);
        let bits = |v: Option<f64>| v.map(f64::to_bits);
        assert_eq!(bits(a.value), bits(b.value));
        assert_eq!(bits(a.ci_lower), bits(b.ci_lower));
        assert_eq!(bits(a.ci_upper), bits(b.ci_upper));
    }
}
