//! Observations report composition.
//!
//! This module turns [`ReportMetrics`] into the two-section text report.
//! Every number in the output is read straight from the metrics; the only
//! work done here is formatting.

use super::write_atomic;
use crate::analysis::{
    BaselineComparison, Placement, ReportMetrics, SweepSummaries, SweepSummary,
};
use crate::error::Result;
use crate::models::TableFamily;
use std::path::{Path, PathBuf};
use tracing::info;

const RULE_WIDTH: usize = 80;
const STATS_RULE_WIDTH: usize = 60;

/// Writes the observations report to a fixed path.
#[derive(Debug, Clone)]
pub struct ReportComposer {
    report_path: PathBuf,
}

impl ReportComposer {
    pub fn new(report_path: impl Into<PathBuf>) -> Self {
        Self {
            report_path: report_path.into(),
        }
    }

    pub fn report_path(&self) -> &Path {
        &self.report_path
    }

    /// Compose the report, replace the file on disk and return the text.
    pub fn compose(&self, metrics: &ReportMetrics) -> Result<String> {
        let text = compose_report(metrics);
        write_atomic(&self.report_path, text.as_bytes())?;
        info!("Observations saved to {}", self.report_path.display());
        Ok(text)
    }
}

/// Generate the complete report text.
pub fn compose_report(metrics: &ReportMetrics) -> String {
    let mut lines = Vec::new();

    lines.extend(section_header("PART 1: FIFO vs OPTIMAL - OBSERVATIONS"));
    lines.push(String::new());
    lines.push(baseline_paragraph(&metrics.baseline));
    lines.push(String::new());

    lines.extend(section_header("PART 2: SECOND CHANCE - OBSERVATIONS"));
    lines.push(String::new());
    lines.push(sweep_paragraph(
        &metrics.sweeps.register,
        metrics.register_placement,
        metrics.more_sensitive,
        &metrics.baseline,
    ));
    lines.push(String::new());
    lines.push(sweep_paragraph(
        &metrics.sweeps.shift,
        metrics.shift_placement,
        metrics.more_sensitive,
        &metrics.baseline,
    ));
    lines.push(String::new());

    lines.join("\n")
}

fn section_header(title: &str) -> [String; 3] {
    let rule = "=".repeat(RULE_WIDTH);
    [rule.clone(), title.to_string(), rule]
}

fn baseline_paragraph(baseline: &BaselineComparison) -> String {
    let trend = if baseline.monotonic_decrease {
        "The results show a clear downward trend in page faults for both FIFO and Optimal \
         as the number of available frames increases, which matches theoretical \
         expectations: more frames mean less contention for memory."
    } else {
        "Page faults generally fall for both FIFO and Optimal as frames are added, \
         although the curves are not strictly monotonic."
    };

    let write_backs = match baseline.write_back_improvement {
        Some(pct) => format!(
            "Write-backs follow the same pattern, with Optimal producing {:.1}% fewer \
             ({} vs {}) thanks to better page selection.",
            pct, baseline.optimal_write_backs, baseline.fifo_write_backs
        ),
        None => format!(
            "FIFO performs no write-backs at {} frames (Optimal: {}), so there is no \
             write-back improvement to report.",
            baseline.pivot_frames, baseline.optimal_write_backs
        ),
    };

    format!(
        "{trend} The Optimal algorithm outperforms FIFO, achieving approximately {pct:.1}% \
         fewer page faults at {pivot} frames ({opt} vs {fifo}), because it uses knowledge of \
         future references to choose its victims. {write_backs} The gap between the two \
         policies narrows at low frame counts, where nearly every reference forces a \
         replacement regardless of policy.",
        trend = trend,
        pct = baseline.page_fault_improvement,
        pivot = baseline.pivot_frames,
        opt = baseline.optimal_page_faults,
        fifo = baseline.fifo_page_faults,
        write_backs = write_backs,
    )
}

/// Fixed wording for each sweep: graph heading and parameter description.
fn sweep_wording(family: TableFamily) -> (&'static str, &'static str) {
    match family {
        TableFamily::ClockVaryM => (
            "Graph 2 (varying m with n=8, 50 frames)",
            "the shift interval",
        ),
        _ => (
            "Graph 1 (varying n with m=10, 50 frames)",
            "the reference register size",
        ),
    }
}

fn placement_phrase(placement: Placement) -> &'static str {
    match placement {
        Placement::AtOrBelowOptimal => {
            "matches or beats Optimal at its best setting, which suggests the sweep \
             workload differs from the baseline run"
        }
        Placement::CloserToOptimal => "performs between the two, closer to Optimal",
        Placement::CloserToFifo => {
            "performs between the two, closer to FIFO, which is expected since it \
             approximates LRU behavior but cannot match Optimal's future knowledge"
        }
        Placement::AtOrAboveFifo => "does no better than FIFO even at its best setting",
    }
}

fn sweep_paragraph(
    summary: &SweepSummary,
    placement: Placement,
    more_sensitive: TableFamily,
    baseline: &BaselineComparison,
) -> String {
    let (heading, subject) = sweep_wording(summary.family);

    let sensitivity = if summary.family == more_sensitive {
        format!(
            "Of the two swept parameters, {} has the larger effect on performance, with a \
             spread of {} page faults between the best and worst settings.",
            subject, summary.spread
        )
    } else {
        format!(
            "The algorithm is comparatively insensitive to {}, with a spread of only {} \
             page faults between the best and worst settings.",
            subject, summary.spread
        )
    };

    format!(
        "{heading}: Across {p}={first} to {p}={last}, page faults range from {min} to {max}, \
         averaging {mean:.2}. {sensitivity} The best performance occurs at {p}={best} with \
         {min} page faults. Compared to FIFO at {pivot} frames ({fifo} faults) and Optimal \
         ({opt} faults), Second Chance {placement}.",
        heading = heading,
        p = summary.parameter,
        first = summary.first_parameter,
        last = summary.last_parameter,
        min = summary.min_page_faults,
        max = summary.max_page_faults,
        mean = summary.mean_page_faults,
        sensitivity = sensitivity,
        best = summary.best_parameter,
        pivot = baseline.pivot_frames,
        fifo = baseline.fifo_page_faults,
        opt = baseline.optimal_page_faults,
        placement = placement_phrase(placement),
    )
}

/// Console statistics block for the Second Chance sweeps.
pub fn format_sweep_statistics(sweeps: &SweepSummaries) -> String {
    let rule = "=".repeat(STATS_RULE_WIDTH);
    let mut lines = vec![
        rule.clone(),
        "Second Chance Algorithm Statistics".to_string(),
        rule,
    ];

    for (index, summary) in [&sweeps.register, &sweeps.shift].into_iter().enumerate() {
        let fixed = match summary.family {
            TableFamily::ClockVaryM => "n=8, frames=50",
            _ => "m=10, frames=50",
        };
        let p = &summary.parameter;

        lines.push(String::new());
        lines.push(format!("Experiment {}: Varying {} ({})", index + 1, p, fixed));
        lines.push(format!(
            "  {} range: {} to {}",
            p, summary.first_parameter, summary.last_parameter
        ));
        lines.push(format!(
            "  Page faults range: {} to {}",
            summary.min_page_faults, summary.max_page_faults
        ));
        lines.push(format!("  Average page faults: {:.2}", summary.mean_page_faults));
        lines.push(format!("  Best {} value: {}", p, summary.best_parameter));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sweep(family: TableFamily, parameter: &str, min: u64, max: u64, best: u32) -> SweepSummary {
        SweepSummary {
            family,
            parameter: parameter.to_string(),
            first_parameter: 1,
            last_parameter: 32,
            min_page_faults: min,
            max_page_faults: max,
            best_parameter: best,
            worst_parameter: 1,
            mean_page_faults: 873.333,
            spread: max - min,
        }
    }

    fn create_test_metrics() -> ReportMetrics {
        ReportMetrics {
            baseline: BaselineComparison {
                pivot_frames: 50,
                fifo_page_faults: 150,
                optimal_page_faults: 120,
                fifo_write_backs: 40,
                optimal_write_backs: 30,
                page_fault_improvement: 20.0,
                write_back_improvement: Some(25.0),
                monotonic_decrease: true,
            },
            sweeps: SweepSummaries {
                register: sweep(TableFamily::ClockVaryN, "n", 850, 900, 8),
                shift: sweep(TableFamily::ClockVaryM, "m", 800, 990, 12),
            },
            register_placement: Placement::AtOrAboveFifo,
            shift_placement: Placement::AtOrAboveFifo,
            more_sensitive: TableFamily::ClockVaryM,
        }
    }

    #[test]
    fn test_report_sections_in_order() {
        let text = compose_report(&create_test_metrics());

        let part1 = text.find("FIFO vs OPTIMAL").unwrap();
        let part2 = text.find("SECOND CHANCE").unwrap();
        assert!(part1 < part2);
        assert!(text.starts_with(&"=".repeat(80)));
        assert_eq!(text.matches(&"=".repeat(80)).count(), 4);
    }

    #[test]
    fn test_baseline_paragraph_quotes_metrics() {
        let text = compose_report(&create_test_metrics());

        assert!(text.contains("approximately 20.0% fewer page faults at 50 frames (120 vs 150)"));
        assert!(text.contains("25.0% fewer (30 vs 40)"));
        assert!(text.contains("clear downward trend"));
        assert!(text.contains("narrows at low frame counts"));
    }

    #[test]
    fn test_sweep_paragraphs_quote_ranges() {
        let text = compose_report(&create_test_metrics());

        assert!(text.contains("page faults range from 850 to 900"));
        assert!(text.contains("best performance occurs at n=8 with 850 page faults"));
        assert!(text.contains("page faults range from 800 to 990"));
        assert!(text.contains("best performance occurs at m=12"));
        assert!(text.contains("comparatively insensitive to the reference register size"));
        assert!(text.contains("the shift interval has the larger effect"));
        assert!(text.contains("does no better than FIFO"));
    }

    #[test]
    fn test_baseline_without_write_backs() {
        let mut metrics = create_test_metrics();
        metrics.baseline.fifo_write_backs = 0;
        metrics.baseline.optimal_write_backs = 0;
        metrics.baseline.write_back_improvement = None;

        let text = compose_report(&metrics);
        assert!(text.contains("approximately 20.0% fewer page faults"));
        assert!(text.contains("FIFO performs no write-backs at 50 frames (Optimal: 0)"));
        assert!(!text.contains("Write-backs follow the same pattern"));
    }

    #[test]
    fn test_non_monotonic_wording() {
        let mut metrics = create_test_metrics();
        metrics.baseline.monotonic_decrease = false;

        let text = compose_report(&metrics);
        assert!(text.contains("not strictly monotonic"));
    }

    #[test]
    fn test_compose_is_deterministic() {
        let metrics = create_test_metrics();
        assert_eq!(compose_report(&metrics), compose_report(&metrics));
    }

    #[test]
    fn test_compose_writes_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("observations.txt");
        std::fs::write(&path, "stale content").unwrap();

        let composer = ReportComposer::new(&path);
        let text = composer.compose(&create_test_metrics()).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), text);
    }

    #[test]
    fn test_sweep_statistics() {
        let stats = format_sweep_statistics(&create_test_metrics().sweeps);

        assert!(stats.contains("Experiment 1: Varying n (m=10, frames=50)"));
        assert!(stats.contains("Experiment 2: Varying m (n=8, frames=50)"));
        assert!(stats.contains("  n range: 1 to 32"));
        assert!(stats.contains("  Average page faults: 873.33"));
        assert!(stats.contains("  Best m value: 12"));
    }
}
