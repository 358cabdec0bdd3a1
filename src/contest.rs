use crate::aggregate::{self, ContestResults};
use crate::cabrillo::{parse_log, LogRecord};
use crate::config::{ContestConfig, RuleSet};
use crate::error::{QpResult, QsoPartyError};
use crate::normalizer::{NormalizedLog, Normalizer};
use crate::reference::ReferenceData;
use crate::scorer::{ScoreBreakdown, Scorer};
use crate::validator::{ValidationResult, Validator};
use rayon::prelude::*;
use serde::Serialize;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Raw text of one submitted log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub id: String,
    pub text: String,
}

impl Submission {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AcceptedLog {
    pub id: String,
    pub validation: ValidationResult,
    pub normalized: NormalizedLog,
    pub score: ScoreBreakdown,
}

#[derive(Debug, Clone, Serialize)]
pub enum LogOutcome {
    Accepted(Box<AcceptedLog>),
    Rejected {
        id: String,
        validation: ValidationResult,
    },
    /// The pipeline itself broke on this log.
    Failed { id: String, error: String },
}

impl LogOutcome {
    pub fn id(&self) -> &str {
        match self {
            Self::Accepted(a) => &a.id,
            Self::Rejected { id, .. } | Self::Failed { id, .. } => id,
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    pub fn score(&self) -> Option<&ScoreBreakdown> {
        match self {
            Self::Accepted(a) => Some(&a.score),
            _ => None,
        }
    }

    pub fn validation(&self) -> Option<&ValidationResult> {
        match self {
            Self::Accepted(a) => Some(&a.validation),
            Self::Rejected { validation, .. } => Some(validation),
            Self::Failed { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    /// In submission order.
    pub outcomes: Vec<LogOutcome>,
    pub results: ContestResults,
}

impl BatchReport {
    pub fn total_logs(&self) -> usize {
        self.outcomes.len()
    }

    pub fn valid_logs(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_accepted()).count()
    }

    pub fn invalid_logs(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, LogOutcome::Rejected { .. }))
            .count()
    }

    pub fn failed_logs(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, LogOutcome::Failed { .. }))
            .count()
    }

    pub fn total_contacts(&self) -> usize {
        self.outcomes
            .iter()
            .filter_map(LogOutcome::validation)
            .map(|v| v.total_contacts)
            .sum()
    }

    pub fn invalid_contacts(&self) -> usize {
        self.outcomes
            .iter()
            .filter_map(LogOutcome::validation)
            .map(|v| v.invalid_contacts)
            .sum()
    }
}

/// One contest's rules and reference data, shared read-only by every worker.
#[derive(Debug, Clone)]
pub struct Contest {
    rules: Arc<RuleSet>,
    refs: Arc<ReferenceData>,
    workers: usize,
}

impl Contest {
    pub fn new(config: &ContestConfig, refs: ReferenceData) -> QpResult<Self> {
        let rules = RuleSet::compile(config)?;
        info!(
            "Contest window {} -> {}, {} bands",
            rules.window_start,
            rules.window_end,
            rules.bands.len()
        );
        Ok(Self {
            rules: Arc::new(rules),
            refs: Arc::new(refs),
            workers: config.batch.workers,
        })
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn refs(&self) -> &ReferenceData {
        &self.refs
    }

    pub fn validate(&self, text: &str) -> ValidationResult {
        Validator::new(&self.rules, &self.refs).validate(&parse_log(text))
    }

    /// Runs one log through the whole pipeline. Never panics: a panic or an
    /// internal error inside the pipeline becomes `LogOutcome::Failed`.
    pub fn process(&self, submission: &Submission) -> LogOutcome {
        isolate(&submission.id, || self.run(submission))
    }

    fn run(&self, submission: &Submission) -> QpResult<LogOutcome> {
        let parsed = parse_log(&submission.text);
        let validation = Validator::new(&self.rules, &self.refs).validate(&parsed);

        if !validation.is_valid() {
            warn!(
                "Rejected {} ({}): {} errors",
                submission.id,
                validation.callsign,
                validation.errors().count()
            );
            return Ok(LogOutcome::Rejected {
                id: submission.id.clone(),
                validation,
            });
        }

        let record = LogRecord::from_parsed(&parsed, &self.rules)?;
        let normalized = Normalizer::new(&self.rules, &self.refs)
            .normalize(&record)?
            .with_id(submission.id.clone());
        let score = Scorer::new(&self.rules, &self.refs).score(&normalized);

        Ok(LogOutcome::Accepted(Box::new(AcceptedLog {
            id: submission.id.clone(),
            validation,
            normalized,
            score,
        })))
    }

    /// Processes every submission on a bounded worker pool, then aggregates
    /// the accepted logs once all of them are scored.
    pub fn process_batch(&self, submissions: &[Submission]) -> QpResult<BatchReport> {
        self.run_batch(submissions, |s| self.process(s))
    }

    fn run_batch<F>(&self, submissions: &[Submission], step: F) -> QpResult<BatchReport>
    where
        F: Fn(&Submission) -> LogOutcome + Sync,
    {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .build()
            .map_err(|e| QsoPartyError::Config(format!("Worker pool: {}", e)))?;

        info!(
            "Processing {} logs on {} workers",
            submissions.len(),
            pool.current_num_threads()
        );
        let start = Instant::now();

        let outcomes: Vec<LogOutcome> =
            pool.install(|| submissions.par_iter().map(&step).collect());

        let scores: Vec<ScoreBreakdown> = outcomes
            .iter()
            .filter_map(LogOutcome::score)
            .cloned()
            .collect();
        let results = aggregate::aggregate(&scores);

        let report = BatchReport { outcomes, results };
        info!(
            "Batch done in {:.2?}: {} accepted, {} rejected, {} failed",
            start.elapsed(),
            report.valid_logs(),
            report.invalid_logs(),
            report.failed_logs()
        );
        Ok(report)
    }
}

fn isolate<F>(id: &str, f: F) -> LogOutcome
where
    F: FnOnce() -> QpResult<LogOutcome>,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(outcome)) => outcome,
        Ok(Err(e)) => {
            warn!("Log {} failed: {}", id, e);
            LogOutcome::Failed {
                id: id.to_string(),
                error: e.to_string(),
            }
        }
        Err(payload) => {
            let error = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            warn!("Log {} panicked: {}", id, error);
            LogOutcome::Failed {
                id: id.to_string(),
                error: format!("panic: {}", error),
            }
        }
    }
}
