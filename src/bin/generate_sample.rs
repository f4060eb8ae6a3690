use anyhow::{Context, Result};

use mh_dashboard::data::model::{
    COL_CI_HIGH, COL_CI_LOW, COL_GROUP, COL_INDICATOR, COL_SUBGROUP, COL_TIME_PERIOD, COL_VALUE,
};

/// Seed for `sample_data.csv`. It is fixed so every run writes the same file
/// and screenshots or fixtures built from it stay valid.
const SEED: u64 = 2020;

/// Deterministic noise for synthetic survey estimates (splitmix64).
struct SurveyRng(u64);

impl SurveyRng {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }

    /// Uniform in `[0, 1)`.
    fn unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Wave-to-wave sampling error in percentage points, normally distributed
    /// around zero.
    fn sampling_error(&mut self, sd: f64) -> f64 {
        let u1 = self.unit().max(f64::MIN_POSITIVE);
        let u2 = self.unit();
        sd * (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
    }

    /// Half-width of a 95% interval; subgroups with fewer respondents get
    /// wider intervals.
    fn ci_half_width(&mut self, subgroup_count: usize) -> f64 {
        0.6 + 0.25 * subgroup_count as f64 + self.unit()
    }
}

fn main() -> Result<()> {
    let mut rng = SurveyRng(SEED);

    // Indicator → baseline share of adults (percent).
    let indicators = [
        ("Took Prescription Medication for Mental Health, Last 4 Weeks", 22.0),
        ("Received Counseling or Therapy, Last 4 Weeks", 9.5),
        ("Needed Counseling or Therapy But Did Not Get It, Last 4 Weeks", 10.5),
    ];
    let groups: [(&str, &[(&str, f64)]); 3] = [
        ("National Estimate", &[("United States", 0.0)]),
        (
            "By Age",
            &[
                ("18 - 29 years", 3.0),
                ("30 - 39 years", 1.5),
                ("40 - 49 years", 0.5),
                ("50 - 59 years", -1.0),
                ("60 - 69 years", -2.0),
                ("70 - 79 years", -3.5),
            ],
        ),
        ("By Sex", &[("Male", -4.0), ("Female", 4.0)]),
    ];
    let periods = [
        "Aug 19 - Aug 31, 2020",
        "Sep 2 - Sep 14, 2020",
        "Sep 16 - Sep 28, 2020",
        "Sep 30 - Oct 12, 2020",
        "Oct 14 - Oct 26, 2020",
    ];

    let output_path = "sample_data.csv";
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;
    writer.write_record([
        COL_INDICATOR,
        COL_GROUP,
        COL_SUBGROUP,
        COL_TIME_PERIOD,
        COL_VALUE,
        COL_CI_LOW,
        COL_CI_HIGH,
    ])?;

    let mut rows = 0usize;
    for &(indicator, base) in &indicators {
        for &(group, subgroups) in &groups {
            for &(subgroup, offset) in subgroups {
                for (wave, period) in periods.iter().enumerate() {
                    let trend = 0.3 * wave as f64;
                    let value = (base + offset + trend + rng.sampling_error(0.6)).max(0.1);
                    let half_width = rng.ci_half_width(subgroups.len());

                    // Every tenth row leaves the CI blank, as the real releases do
                    // for suppressed estimates.
                    let (lo, hi) = if rows % 10 == 9 {
                        (String::new(), String::new())
                    } else {
                        (
                            format!("{:.1}", (value - half_width).max(0.0)),
                            format!("{:.1}", value + half_width),
                        )
                    };

                    writer.write_record([
                        indicator.to_string(),
                        group.to_string(),
                        subgroup.to_string(),
                        period.to_string(),
                        format!("{value:.1}%"),
                        lo,
                        hi,
                    ])?;
                    rows += 1;
                }
            }
        }
    }
    writer.flush().context("flushing CSV")?;

    println!(
        "Wrote {rows} rows ({} indicators x {} waves) to {output_path}",
        indicators.len(),
        periods.len()
    );
    Ok(())
}
