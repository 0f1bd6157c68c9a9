//! Headless request runner: CSV batches and the process exit status.

use crate::application::ml::inference_service::InferenceService;
use crate::application::prediction_form::{PredictionOutcome, evaluate};
use crate::domain::ml::feature_registry::FeatureVector;
use std::io;
use tracing::info;

/// Exit status when the model could not be loaded.
pub const EXIT_STARTUP_FAILURE: u8 = 2;
/// Exit status when at least one request failed.
pub const EXIT_REQUEST_FAILURE: u8 = 1;

/// Outcome of one CSV row
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Evaluated(PredictionOutcome),
    Malformed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchRow {
    /// 1-based, header excluded
    pub row: usize,
    pub outcome: RowOutcome,
}

impl BatchRow {
    pub fn is_success(&self) -> bool {
        matches!(&self.outcome, RowOutcome::Evaluated(outcome) if outcome.is_success())
    }

    /// Lines to print for this row: the headline, then the hint if any.
    pub fn lines(&self) -> Vec<String> {
        match &self.outcome {
            RowOutcome::Evaluated(outcome) => {
                let mut lines = vec![format!("row {}: {}", self.row, outcome.headline())];
                if let Some(hint) = outcome.hint() {
                    lines.push(format!("row {}: {}", self.row, hint));
                }
                lines
            }
            RowOutcome::Malformed(reason) => {
                vec![format!("row {}: Invalid record: {}", self.row, reason)]
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    pub rows: Vec<BatchRow>,
}

impl BatchReport {
    pub fn failures(&self) -> usize {
        self.rows.iter().filter(|row| !row.is_success()).count()
    }

    pub fn exit_status(&self) -> u8 {
        exit_status(self.failures())
    }
}

/// Maps the number of failed requests to the process exit status.
pub fn exit_status(failures: usize) -> u8 {
    if failures == 0 {
        0
    } else {
        EXIT_REQUEST_FAILURE
    }
}

/// Runs one independent prediction per CSV row.
///
/// Columns are matched by header name, so `SPX,GLD,USO,SLV` may come in any
/// order. A row that can't be read as four numbers is counted as a failure and
/// the batch carries on.
pub fn run_batch<R: io::Read>(
    service: &InferenceService,
    input: R,
    enforce_ranges: bool,
) -> BatchReport {
    let mut reader = csv::Reader::from_reader(input);
    let mut report = BatchReport::default();

    for (idx, record) in reader.deserialize::<FeatureVector>().enumerate() {
        let outcome = match record {
            Ok(features) => RowOutcome::Evaluated(evaluate(service, &features, enforce_ranges)),
            Err(e) => RowOutcome::Malformed(e.to_string()),
        };
        report.rows.push(BatchRow {
            row: idx + 1,
            outcome,
        });
    }

    info!(
        rows = report.rows.len(),
        failures = report.failures(),
        "Batch finished"
    );
    report
}
