use crate::reports;
use clap::Args;
use qsoparty::config::ContestConfig;
use qsoparty::contest::Contest;
use qsoparty::error::QpResult;
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub config: ContestConfig,

    /// Directory holding the submitted logs
    pub logs: PathBuf,

    /// Also write each report to `<DIR>/<id>-validation.txt`
    #[arg(long)]
    pub report_dir: Option<PathBuf>,
}

pub fn run(args: &ValidateArgs, contest: &Contest) -> QpResult<()> {
    let logs = super::collect_logs(&args.logs)?;
    info!("Validating {} logs from {}", logs.len(), args.logs.display());

    if let Some(dir) = &args.report_dir {
        fs::create_dir_all(dir)?;
    }

    let mut results = Vec::with_capacity(logs.len());
    for log in &logs {
        let result = contest.validate(&log.text);
        println!("{}", result.to_report());

        if let Some(dir) = &args.report_dir {
            fs::write(dir.join(format!("{}-validation.txt", log.id)), result.to_report())?;
        }
        results.push((log.id.clone(), result));
    }

    if results.is_empty() {
        println!("No logs found in {}", args.logs.display());
        return Ok(());
    }

    reports::validation_summary(&results);
    Ok(())
}
