use super::model::CleanedRecord;

// ---------------------------------------------------------------------------
// Selection: the three currently chosen control values
// ---------------------------------------------------------------------------

/// Current choice of each control. `None` means the control still shows its
/// placeholder. Rebuilt on every change instead of being mutated in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub group: Option<String>,
    pub time_period: Option<String>,
    pub indicator: Option<String>,
}

impl Selection {
    pub fn with_group(&self, group: impl Into<String>) -> Self {
        Self {
            group: Some(group.into()),
            ..self.clone()
        }
    }

    pub fn with_time_period(&self, time_period: impl Into<String>) -> Self {
        Self {
            time_period: Some(time_period.into()),
            ..self.clone()
        }
    }

    pub fn with_indicator(&self, indicator: impl Into<String>) -> Self {
        Self {
            indicator: Some(indicator.into()),
            ..self.clone()
        }
    }

    /// All three controls have a value.
    pub fn is_complete(&self) -> bool {
        self.group.is_some() && self.time_period.is_some() && self.indicator.is_some()
    }
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

/// Dataset positions feeding each chart, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewIndices {
    /// Fixed group + indicator, varying time period.
    pub line: Vec<usize>,
    /// Fixed time period + indicator, varying subgroup.
    pub bar: Vec<usize>,
}

impl ViewIndices {
    /// Resolve the indices against the dataset they were computed from.
    pub fn resolve<'a>(&self, records: &'a [CleanedRecord]) -> ChartViews<'a> {
        let pick = |idx: &[usize]| -> Vec<&'a CleanedRecord> {
            idx.iter().filter_map(|&i| records.get(i)).collect()
        };
        ChartViews {
            line: pick(&self.line),
            bar: pick(&self.bar),
        }
    }
}

/// The records behind each chart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartViews<'a> {
    pub line: Vec<&'a CleanedRecord>,
    pub bar: Vec<&'a CleanedRecord>,
}

/// Compute both chart views as dataset indices.
///
/// An incomplete selection yields two empty views. Indicator matching is exact
/// string equality against the title-cased label.
pub fn view_indices(records: &[CleanedRecord], selection: &Selection) -> ViewIndices {
    let (Some(group), Some(time_period), Some(indicator)) = (
        selection.group.as_deref(),
        selection.time_period.as_deref(),
        selection.indicator.as_deref(),
    ) else {
        return ViewIndices::default();
    };

    let mut views = ViewIndices::default();
    for (i, rec) in records.iter().enumerate() {
        if rec.indicator != indicator {
            continue;
        }
        if rec.group == group {
            views.line.push(i);
        }
        if rec.time_period == time_period {
            views.bar.push(i);
        }
    }
    views
}

/// Compute both chart views as record references.
pub fn derive_views<'a>(records: &'a [CleanedRecord], selection: &Selection) -> ChartViews<'a> {
    view_indices(records, selection).resolve(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(group: &str, subgroup: &str, indicator: &str, time_period: &str, value: f64) -> CleanedRecord {
        CleanedRecord {
            indicator: indicator.into(),
            group: group.into(),
            subgroup: subgroup.into(),
            time_period: time_period.into(),
            value,
            ci_lower: None,
            ci_upper: None,
        }
    }

    fn scenario() -> Vec<CleanedRecord> {
        vec![
            rec("Adult", "Total", "Anxiety", "Aug 2020", 10.0),
            rec("Adult", "Total", "Anxiety", "Sep 2020", 15.0),
            rec("Youth", "Total", "Anxiety", "Aug 2020", 5.0),
        ]
    }

    fn full(group: &str, time_period: &str, indicator: &str) -> Selection {
        Selection::default()
            .with_group(group)
            .with_time_period(time_period)
            .with_indicator(indicator)
    }

    #[test]
    fn test_line_view_keeps_group_in_source_order() {
        let records = scenario();
        let views = derive_views(&records, &full("Adult", "Aug 2020", "Anxiety"));
        assert_eq!(views.line, vec![&records[0], &records[1]]);
    }

    #[test]
    fn test_bar_view_keeps_time_period() {
        let records = scenario();
        let views = view_indices(&records, &full("Adult", "Aug 2020", "Anxiety"));
        assert_eq!(views.bar, vec![0, 2]);
    }

    #[test]
    fn test_unknown_group_gives_empty_line_view() {
        let records = scenario();
        let views = derive_views(&records, &full("Senior", "Aug 2020", "Anxiety"));
        assert!(views.line.is_empty());
        assert_eq!(views.bar.len(), 2);
    }

    #[test]
    fn test_incomplete_selection_gives_empty_views() {
        let records = scenario();
        let partial = Selection::default().with_group("Adult").with_indicator("Anxiety");
        assert!(!partial.is_complete());
        assert_eq!(view_indices(&records, &partial), ViewIndices::default());
        assert_eq!(view_indices(&records, &Selection::default()), ViewIndices::default());
    }

    #[test]
    fn test_indicator_match_is_exact() {
        let mut records = scenario();
        records.push(rec("Adult", "Total", "Anxiety Disorder, Severe", "Aug 2020", 3.0));
        let views = view_indices(&records, &full("Adult", "Aug 2020", "Anxiety"));
        assert_eq!(views.line, vec![0, 1]);
        assert_eq!(views.bar, vec![0, 2]);
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let records = scenario();
        let sel = full("Adult", "Aug 2020", "Anxiety");
        assert_eq!(view_indices(&records, &sel), view_indices(&records, &sel));
        assert_eq!(derive_views(&records, &sel), derive_views(&records, &sel));
    }

    #[test]
    fn test_with_replaces_only_one_field() {
        let sel = full("Adult", "Aug 2020", "Anxiety").with_group("Youth");
        assert_eq!(sel.group.as_deref(), Some("Youth"));
        assert_eq!(sel.time_period.as_deref(), Some("Aug 2020"));
        assert_eq!(sel.indicator.as_deref(), Some("Anxiety"));
    }
}
