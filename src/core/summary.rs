use serde::Serialize;

use crate::core::models::report::{CloudProvider, CostReport};
use crate::core::models::timestamp::Timestamp;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderTotal {
    pub name: String,
    pub total: f64,
    /// Zero for providers that only report a flat cost.
    pub accounts: usize,
}

/// Aggregate view of a report, used for text rendering and `show --json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    pub generated: Timestamp,
    pub begin: Timestamp,
    pub end: Timestamp,
    pub cloud_total: f64,
    pub providers: Vec<ProviderTotal>,
    pub projects: usize,
    pub tasks: usize,
    pub task_seconds: f64,
    pub distros: usize,
    pub instance_seconds: f64,
}

impl ReportSummary {
    pub fn from_report(report: &CostReport) -> Self {
        let providers: Vec<ProviderTotal> = report
            .providers
            .iter()
            .map(|p: &CloudProvider| ProviderTotal {
                name: p.name.clone(),
                total: p.total(),
                accounts: p.accounts.len(),
            })
            .collect();

        let evergreen = &report.evergreen;
        Self {
            generated: report.metadata.generated,
            begin: report.metadata.begin,
            end: report.metadata.end,
            cloud_total: providers.iter().map(|p| p.total).sum(),
            providers,
            projects: evergreen.projects.len(),
            tasks: evergreen.projects.iter().map(|p| p.tasks.len()).sum(),
            task_seconds: evergreen.task_seconds(),
            distros: evergreen.distros.len(),
            instance_seconds: evergreen.instance_seconds(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::report::tests::fixture;

    #[test]
    fn summary_of_fixture() {
        let summary = ReportSummary::from_report(&fixture());
        assert_eq!(summary.providers.len(), 2);
        assert_eq!(summary.providers[0].name, "aws");
        assert_eq!(summary.providers[0].accounts, 1);
        assert!((summary.providers[0].total - (0.704 * 23.0 + 10_000.0)).abs() < 1e-9);
        assert_eq!(summary.providers[1].name, "macstadium");
        assert_eq!(summary.providers[1].accounts, 0);
        assert_eq!(summary.providers[1].total, 27.12);
        assert_eq!(summary.projects, 1);
        assert_eq!(summary.tasks, 1);
        assert_eq!(summary.task_seconds, 1242.0);
        assert_eq!(summary.distros, 1);
        assert_eq!(summary.instance_seconds, 12.0);
        assert_eq!(summary.begin.to_string(), "2017-05-23T17:00:00.000");
    }

    #[test]
    fn summary_of_empty_report() {
        let summary = ReportSummary::from_report(&CostReport::default());
        assert!(summary.providers.is_empty());
        assert_eq!(summary.cloud_total, 0.0);
        assert_eq!(summary.tasks, 0);
    }

    #[test]
    fn summary_serializes_timestamps_in_layout() {
        let json = serde_json::to_value(ReportSummary::from_report(&fixture())).unwrap();
        assert_eq!(json["generated"], "2017-05-23T12:11:10.123");
        assert_eq!(json["providers"][1]["name"], "macstadium");
    }
}
