//! Plain-text rendering of decomposition and bootstrap output.

use crate::bootstrap::BootstrapRun;
use crate::domain::Decomposition;
use crate::report::summary::ComponentSummary;

/// Format a single decomposition for terminal output.
pub fn format_decomposition(result: &Decomposition) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== Oaxaca-Blinder decomposition ({}) ===\n", result.method));
    out.push_str(&format!(
        "Groups: a = ({} = {}) n={} | b = ({} = {}) n={}\n",
        result.a_role.column,
        result.a_role.value,
        result.a_fit.n_obs,
        result.b_role.column,
        result.b_role.value,
        result.b_fit.n_obs,
    ));
    out.push_str(&format!("Outcome gap: {:.6}\n", result.outcome_gap));
    out.push_str(&format!(
        "Totals: explained={:.6} a_unexplained={:.6} b_unexplained={:.6}\n",
        result.explained.iter().sum::<f64>(),
        result.a_unexplained.iter().sum::<f64>(),
        result.b_unexplained.iter().sum::<f64>(),
    ));

    out.push_str("\nPer covariate:\n");
    out.push_str(&format!(
        "{:<16} {:>14} {:>14} {:>14}\n",
        "covariate", "explained", "a_unexplained", "b_unexplained"
    ));
    for (c, name) in result.covariates.iter().enumerate() {
        out.push_str(&format!(
            "{:<16} {:>14.6} {:>14.6} {:>14.6}\n",
            name, result.explained[c], result.a_unexplained[c], result.b_unexplained[c]
        ));
    }

    out
}

/// Format an aggregated component report (means + percentile intervals).
pub fn format_summary(summary: &ComponentSummary, run: Option<&BootstrapRun>) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "=== Bootstrap summary: {} (CI {:.1}%) ===\n",
        summary.component.label(),
        summary.confidence_level
    ));
    if let Some(run) = run {
        out.push_str(&format!(
            "Replicates: {} succeeded, {} skipped\n",
            run.n_succeeded(),
            run.n_skipped()
        ));
    } else {
        out.push_str(&format!("Replicates: {}\n", summary.n_replicates));
    }

    out.push_str(&format!(
        "{:<16} {:>14} {:>14} {:>14}\n",
        "covariate", "mean", "ci_lower", "ci_upper"
    ));
    for row in &summary.rows {
        out.push_str(&format!(
            "{:<16} {:>14.6} {:>14.6} {:>14.6}\n",
            row.covariate, row.mean, row.ci_lower, row.ci_upper
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::{run, BootstrapOptions};
    use crate::data::synthetic::{two_group_sample, SyntheticSpec};
    use crate::decompose::decompose_once;
    use crate::domain::{Component, Convention};
    use crate::report::summary::summarize;

    #[test]
    fn decomposition_report_names_every_covariate() {
        let table = two_group_sample(&SyntheticSpec::default(), 2).unwrap();
        let result = decompose_once(&table, 0.0, Convention::Benchmark).unwrap();
        let text = format_decomposition(&result);
        assert!(text.contains("two_fold_benchmark"));
        assert!(text.contains("Outcome gap"));
        for name in result.covariates.iter() {
            assert!(text.contains(name.as_str()));
        }
    }

    #[test]
    fn summary_report_counts_replicates() {
        let table = two_group_sample(&SyntheticSpec::default(), 2).unwrap();
        let options = BootstrapOptions {
            replicates: 20,
            seed: 4,
        };
        let out = run(&table, 0.0, Convention::Benchmark, &options).unwrap();
        let summary = summarize(&out.results, Component::Explained, 95.0).unwrap();
        let text = format_summary(&summary, Some(&out));
        assert!(text.contains("explained"));
        assert!(text.contains("20 succeeded, 0 skipped"));
    }
}
