use crate::reports;
use clap::Args;
use qsoparty::config::ContestConfig;
use qsoparty::contest::{Contest, LogOutcome};
use qsoparty::error::QpResult;
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    #[command(flatten)]
    pub config: ContestConfig,

    /// Directory holding the submitted logs
    pub logs: PathBuf,

    /// Write the full batch report (outcomes + results) as JSON
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Write each accepted log's prepared form to `<DIR>/<id>.prepared.log`
    #[arg(long)]
    pub prepared_dir: Option<PathBuf>,
}

pub fn run(args: &ScoreArgs, contest: &Contest) -> QpResult<()> {
    let logs = super::collect_logs(&args.logs)?;
    let report = contest.process_batch(&logs)?;

    if let Some(dir) = &args.prepared_dir {
        fs::create_dir_all(dir)?;
        for outcome in &report.outcomes {
            if let LogOutcome::Accepted(a) = outcome {
                fs::write(dir.join(format!("{}.prepared.log", a.id)), a.normalized.render())?;
            }
        }
        info!("Prepared logs written to {}", dir.display());
    }

    reports::batch_summary(&report);
    reports::overall(&report.results);
    reports::groups(&report.results);
    reports::statistics(&report.results.statistics, contest.refs());

    if let Some(path) = &args.json {
        fs::write(path, serde_json::to_string_pretty(&report)?)?;
        info!("JSON report written to {}", path.display());
    }
    Ok(())
}
