use eframe::egui::{self, Color32, RichText, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};

use crate::color::ColorMap;
use crate::config::ChartConfig;
use crate::data::filter::Selection;
use crate::data::model::CleanedRecord;

const NO_DATA: &str = "No data available for this selection.";
const CHOOSE_FILTERS: &str = "Choose a group, time period, and indicator to draw this chart.";

// ---------------------------------------------------------------------------
// Chart data: categorical axis + one point per record
// ---------------------------------------------------------------------------

/// Distinct keys in order of first appearance. Each key's index is its x
/// position on a categorical axis.
pub fn category_domain<'a>(keys: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut domain: Vec<String> = Vec::new();
    for key in keys {
        if !domain.iter().any(|d| d == key) {
            domain.push(key.to_string());
        }
    }
    domain
}

/// One drawable record.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub x: f64,
    pub category: String,
    pub subgroup: String,
    pub value: f64,
    pub ci: Option<(f64, f64)>,
    pub tooltip: String,
}

/// Records of one view laid out on a categorical x axis.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySeries {
    pub domain: Vec<String>,
    pub points: Vec<ChartPoint>,
}

impl CategorySeries {
    /// Line chart layout: x is the time period. `None` for an empty view.
    pub fn for_line(view: &[&CleanedRecord]) -> Option<Self> {
        Self::build(view, |r| r.time_period.as_str())
    }

    /// Bar chart layout: x is the subgroup. `None` for an empty view.
    pub fn for_bar(view: &[&CleanedRecord]) -> Option<Self> {
        Self::build(view, |r| r.subgroup.as_str())
    }

    fn build(view: &[&CleanedRecord], key: fn(&CleanedRecord) -> &str) -> Option<Self> {
        if view.is_empty() {
            return None;
        }
        let domain = category_domain(view.iter().map(|r| key(r)));
        let points = view
            .iter()
            .map(|r| {
                let category = key(r);
                let x = domain.iter().position(|d| d == category).unwrap_or(0) as f64;
                ChartPoint {
                    x,
                    category: category.to_string(),
                    subgroup: r.subgroup.clone(),
                    value: r.value,
                    ci: r.ci(),
                    tooltip: tooltip_text(r),
                }
            })
            .collect();
        Some(Self { domain, points })
    }

    /// Subgroups in order of first appearance; one line each.
    pub fn subgroups(&self) -> Vec<String> {
        category_domain(self.points.iter().map(|p| p.subgroup.as_str()))
    }

    /// Vertical CI segments `(x, lower, upper)` for points with both bounds.
    pub fn whiskers(&self) -> Vec<(f64, f64, f64)> {
        self.points
            .iter()
            .filter_map(|p| p.ci.map(|(lo, hi)| (p.x, lo, hi)))
            .collect()
    }

    /// Highest value or upper CI bound, for sizing the y axis.
    pub fn y_max(&self) -> f64 {
        self.points
            .iter()
            .map(|p| p.ci.map_or(p.value, |(_, hi)| hi.max(p.value)))
            .fold(0.0, f64::max)
    }
}

pub fn format_percent(v: f64) -> String {
    format!("{v:.1}%")
}

/// Hover text for one record.
pub fn tooltip_text(rec: &CleanedRecord) -> String {
    let ci = match (rec.ci_lower, rec.ci_upper) {
        (None, None) => None,
        _ => Some(match rec.ci() {
            Some((lo, hi)) => format!("{} to {}", format_percent(lo), format_percent(hi)),
            None => "n/a".to_string(),
        }),
    };
    let mut text = format!(
        "{}\n{}\nValue: {}",
        rec.time_period,
        rec.subgroup,
        format_percent(rec.value)
    );
    if let Some(ci) = ci {
        text.push_str(&format!("\n95% CI: {ci}"));
    }
    text
}

/// Tooltip for the point nearest to `x`. A non-empty `name` narrows the
/// match to that subgroup's series.
pub fn hover_text(points: &[ChartPoint], name: &str, x: f64) -> String {
    let slot = x.round();
    points
        .iter()
        .filter(|p| p.x == slot && (name.is_empty() || p.subgroup == name))
        .map(|p| p.tooltip.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Label for a grid mark on a categorical axis; blank between categories.
fn category_label(domain: &[String], value: f64) -> String {
    if value.fract() != 0.0 || value < 0.0 {
        return String::new();
    }
    domain.get(value as usize).cloned().unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Line chart: selected group + indicator across time periods.
pub fn line_chart(ui: &mut Ui, view: &[&CleanedRecord], selection: &Selection, config: &ChartConfig) {
    ui.heading(chart_title(selection.indicator.as_deref(), selection.group.as_deref()));

    with_margins(ui, config, |ui, width, height| {
        let Some(series) = CategorySeries::for_line(view) else {
            placeholder(ui, width, height, selection);
            return;
        };

        let subgroups = series.subgroups();
        let colors = ColorMap::new(&subgroups);
        let domain = series.domain.clone();
        let hover_points = series.points.clone();

        Plot::new("line_chart")
            .width(width)
            .height(height)
            .legend(Legend::default())
            .x_axis_label("Time Period")
            .y_axis_label("Percent")
            .x_axis_formatter(move |mark, _range| category_label(&domain, mark.value))
            .label_formatter(move |name, value| hover_text(&hover_points, name, value.x))
            .include_x(-0.5)
            .include_x(series.domain.len() as f64 - 0.5)
            .include_y(0.0)
            .include_y(series.y_max() * 1.1)
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .show(ui, |plot_ui| {
                for subgroup in &subgroups {
                    let color = if subgroups.len() == 1 {
                        Color32::from_rgb(70, 130, 180)
                    } else {
                        colors.color_for(subgroup)
                    };
                    let coords: Vec<[f64; 2]> = series
                        .points
                        .iter()
                        .filter(|p| &p.subgroup == subgroup)
                        .map(|p| [p.x, p.value])
                        .collect();

                    let line_points: PlotPoints = coords.iter().copied().collect();
                    plot_ui.line(Line::new(line_points).name(subgroup).color(color).width(2.0));

                    let marker_points: PlotPoints = coords.iter().copied().collect();
                    plot_ui.points(
                        Points::new(marker_points)
                            .name(subgroup)
                            .color(color)
                            .radius(4.0),
                    );
                }
                for (x, lo, hi) in series.whiskers() {
                    let segment: PlotPoints = vec![[x, lo], [x, hi]].into();
                    plot_ui.line(Line::new(segment).color(Color32::DARK_GRAY).width(1.0));
                }
            });
    });
}

/// Bar chart: selected time period + indicator across subgroups.
pub fn bar_chart(ui: &mut Ui, view: &[&CleanedRecord], selection: &Selection, config: &ChartConfig) {
    ui.heading(chart_title(selection.indicator.as_deref(), selection.time_period.as_deref()));

    with_margins(ui, config, |ui, width, height| {
        let Some(series) = CategorySeries::for_bar(view) else {
            placeholder(ui, width, height, selection);
            return;
        };

        let colors = ColorMap::new(&series.domain);
        let domain = series.domain.clone();
        let hover_points = series.points.clone();

        let bars: Vec<Bar> = series
            .points
            .iter()
            .map(|p| {
                Bar::new(p.x, p.value)
                    .name(&p.category)
                    .fill(colors.color_for(&p.category))
                    .width(0.7)
            })
            .collect();
        let chart = BarChart::new(bars)
            .element_formatter(Box::new(move |bar: &Bar, _chart: &BarChart| {
                hover_text(&hover_points, "", bar.argument)
            }));

        Plot::new("bar_chart")
            .width(width)
            .height(height)
            .x_axis_label("Subgroup")
            .y_axis_label("Percent")
            .x_axis_formatter(move |mark, _range| category_label(&domain, mark.value))
            .include_x(-0.5)
            .include_x(series.domain.len() as f64 - 0.5)
            .include_y(0.0)
            .include_y(series.y_max() * 1.1)
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(chart);
                for (x, lo, hi) in series.whiskers() {
                    let segment: PlotPoints = vec![[x, lo], [x, hi]].into();
                    plot_ui.line(Line::new(segment).color(Color32::DARK_GRAY).width(1.0));
                }
            });
    });
}

fn chart_title(indicator: Option<&str>, scope: Option<&str>) -> String {
    match (indicator, scope) {
        (Some(indicator), Some(scope)) => format!("{indicator}: {scope}"),
        _ => "No selection".to_string(),
    }
}

/// Reserve the configured margins around a fixed-size chart area.
fn with_margins(ui: &mut Ui, config: &ChartConfig, add_contents: impl FnOnce(&mut Ui, f32, f32)) {
    let (width, height) = config.inner_size();
    ui.horizontal(|ui: &mut Ui| {
        ui.add_space(config.margin.left);
        ui.vertical(|ui: &mut Ui| {
            ui.add_space(config.margin.top);
            add_contents(ui, width, height);
            ui.add_space(config.margin.bottom);
        });
        ui.add_space(config.margin.right);
    });
}

fn placeholder(ui: &mut Ui, width: f32, height: f32, selection: &Selection) {
    let text = if selection.is_complete() { NO_DATA } else { CHOOSE_FILTERS };
    ui.allocate_ui(egui::vec2(width, height), |ui: &mut Ui| {
        ui.set_min_size(egui::vec2(width, height));
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label(RichText::new(text).italics().color(Color32::GRAY));
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(subgroup: &str, time_period: &str, value: f64, ci: Option<(f64, f64)>) -> CleanedRecord {
        CleanedRecord {
            indicator: "Anxiety".into(),
            group: "Adult".into(),
            subgroup: subgroup.into(),
            time_period: time_period.into(),
            value,
            ci_lower: ci.map(|c| c.0),
            ci_upper: ci.map(|c| c.1),
        }
    }

    #[test]
    fn test_category_domain_first_occurrence() {
        let domain = category_domain(["Sep", "Aug", "Sep", "Oct"]);
        assert_eq!(domain, vec!["Sep", "Aug", "Oct"]);
    }

    #[test]
    fn test_empty_view_has_no_series() {
        assert_eq!(CategorySeries::for_line(&[]), None);
        assert_eq!(CategorySeries::for_bar(&[]), None);
    }

    #[test]
    fn test_line_series_positions() {
        let a = rec("Total", "Aug 2020", 10.0, Some((8.0, 12.0)));
        let b = rec("Total", "Sep 2020", 15.0, None);
        let c = rec("Female", "Aug 2020", 11.0, None);
        let series = CategorySeries::for_line(&[&a, &b, &c]).unwrap();
        assert_eq!(series.domain, vec!["Aug 2020", "Sep 2020"]);
        let xs: Vec<f64> = series.points.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 1.0, 0.0]);
        assert_eq!(series.points[0].ci, Some((8.0, 12.0)));
        assert_eq!(series.subgroups(), vec!["Total", "Female"]);
        assert_eq!(series.y_max(), 15.0);
    }

    #[test]
    fn test_bar_series_keys_on_subgroup() {
        let a = rec("Male", "Aug 2020", 4.0, Some((3.0, 6.5)));
        let b = rec("Female", "Aug 2020", 5.0, None);
        let series = CategorySeries::for_bar(&[&a, &b]).unwrap();
        assert_eq!(series.domain, vec!["Male", "Female"]);
        assert_eq!(series.points[1].x, 1.0);
        assert_eq!(series.y_max(), 6.5);
        assert_eq!(series.whiskers(), vec![(0.0, 3.0, 6.5)]);
    }

    #[test]
    fn test_tooltip_text() {
        let with_ci = rec("Total", "Aug 2020", 10.0, Some((8.0, 12.3)));
        assert_eq!(
            tooltip_text(&with_ci),
            "Aug 2020\nTotal\nValue: 10.0%\n95% CI: 8.0% to 12.3%"
        );

        let without = rec("Total", "Aug 2020", 10.0, None);
        assert_eq!(tooltip_text(&without), "Aug 2020\nTotal\nValue: 10.0%");

        let mut half = without.clone();
        half.ci_upper = Some(f64::NAN);
        assert!(tooltip_text(&half).ends_with("95% CI: n/a"));
    }

    #[test]
    fn test_hover_text_picks_nearest_slot_and_series() {
        let a = rec("Total", "Aug 2020", 10.0, None);
        let b = rec("Female", "Aug 2020", 11.0, None);
        let c = rec("Total", "Sep 2020", 15.0, None);
        let series = CategorySeries::for_line(&[&a, &b, &c]).unwrap();

        assert_eq!(hover_text(&series.points, "Total", 0.2), tooltip_text(&a));
        assert_eq!(hover_text(&series.points, "Total", 0.8), tooltip_text(&c));
        assert_eq!(
            hover_text(&series.points, "", 0.0),
            format!("{}\n\n{}", tooltip_text(&a), tooltip_text(&b))
        );
        assert_eq!(hover_text(&series.points, "Total", 7.0), "");
    }

    #[test]
    fn test_category_label() {
        let domain = vec!["Aug".to_string(), "Sep".to_string()];
        assert_eq!(category_label(&domain, 1.0), "Sep");
        assert_eq!(category_label(&domain, 0.5), "");
        assert_eq!(category_label(&domain, -1.0), "");
        assert_eq!(category_label(&domain, 2.0), "");
    }

    #[test]
    fn test_chart_title() {
        assert_eq!(chart_title(Some("Anxiety"), Some("Adult")), "Anxiety: Adult");
        assert_eq!(chart_title(None, Some("Adult")), "No selection");
    }
}
