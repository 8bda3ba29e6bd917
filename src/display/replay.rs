//! Replay report formatting

use tabled::{Table, Tabled};
use tabled::settings::Style;

use crate::plan::{ReplayReport, StepOutcome, StepStatus};

#[derive(Tabled)]
struct OutcomeRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Step")]
    description: String,
    #[tabled(rename = "Result")]
    result: &'static str,
    #[tabled(rename = "Detail")]
    detail: String,
}

impl From<&StepOutcome> for OutcomeRow {
    fn from(outcome: &StepOutcome) -> Self {
        let (result, detail) = match &outcome.status {
            StepStatus::Applied { detail } => ("ok", detail.clone()),
            StepStatus::Rejected { error } => ("REJECTED", error.to_string()),
        };

        Self {
            index: outcome.index,
            description: outcome.description.clone(),
            result,
            detail,
        }
    }
}

/// Format the per-step outcome table and a one-line tally
pub fn format_replay_outcomes(report: &ReplayReport) -> String {
    if report.outcomes.is_empty() {
        return "Plan has no steps.\n".to_string();
    }

    let mut output = Table::new(report.outcomes.iter().map(OutcomeRow::from))
        .with(Style::psql())
        .to_string();

    output.push_str(&format!(
        "\n{} applied, {} rejected",
        report.applied_count(),
        report.rejected_count()
    ));
    if report.halted {
        output.push_str(" (stopped at first rejection)");
    }
    output.push('\n');
    output
}
