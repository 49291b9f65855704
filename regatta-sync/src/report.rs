//! Outcome aggregation — the pure fold from outcomes to a run report.

use regatta_core::{ApplyOutcome, RunStatus, SyncReport};

/// Fold outcomes into a [`SyncReport`].
///
/// Outcomes arrive in manifest (discovery) order from the dispatcher's
/// index slots; this fold preserves that order and only counts. Overall
/// status is success iff no outcome carries a non-zero exit status.
pub fn summarize(outcomes: &[ApplyOutcome]) -> SyncReport {
    let total = outcomes.len();
    let failed = outcomes.iter().filter(|o| !o.succeeded()).count();
    SyncReport {
        total,
        succeeded: total - failed,
        failed,
        status: if failed == 0 {
            RunStatus::Success
        } else {
            RunStatus::Failure
        },
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use regatta_core::ManifestRef;

    use super::*;

    fn outcome(rel: &str, exit_code: i32) -> ApplyOutcome {
        ApplyOutcome {
            manifest: ManifestRef {
                rel: rel.to_string(),
                path: PathBuf::from(rel),
            },
            command: String::new(),
            exit_code,
            stdout: String::new(),
            stderr: String::new(),
        }
    }

    #[test]
    fn empty_run_is_a_success() {
        let report = summarize(&[]);
        assert_eq!(report.total, 0);
        assert_eq!(report.failed, 0);
        assert_eq!(report.status, RunStatus::Success);
    }

    #[test]
    fn counts_always_sum_to_total() {
        let outcomes = vec![
            outcome("a.yaml", 0),
            outcome("b.yaml", 1),
            outcome("c.yaml", 0),
            outcome("d.yaml", 127),
        ];
        let report = summarize(&outcomes);
        assert_eq!(report.total, 4);
        assert_eq!(report.succeeded, 2);
        assert_eq!(report.failed, 2);
        assert_eq!(report.succeeded + report.failed, report.total);
        assert_eq!(report.status, RunStatus::Failure);
    }

    #[test]
    fn single_failure_flips_overall_status() {
        let all_ok = summarize(&[outcome("a.yaml", 0), outcome("b.yaml", 0)]);
        assert_eq!(all_ok.status, RunStatus::Success);

        let one_bad = summarize(&[outcome("a.yaml", 0), outcome("b.yaml", 2)]);
        assert_eq!(one_bad.status, RunStatus::Failure);
    }
}
