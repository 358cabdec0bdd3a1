pub mod score;
pub mod validate;

use qsoparty::contest::Submission;
use qsoparty::error::QpResult;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

const LOG_EXTENSIONS: [&str; 3] = ["log", "txt", "cbr"];

/// Every log file directly inside `dir`, sorted by file name. The id is the file stem.
pub fn collect_logs(dir: &Path) -> QpResult<Vec<Submission>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_log = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| LOG_EXTENSIONS.iter().any(|x| x.eq_ignore_ascii_case(e)));
        if path.is_file() && is_log {
            paths.push(path);
        }
    }
    paths.sort();

    let mut logs = Vec::with_capacity(paths.len());
    for path in paths {
        let bytes = match fs::read(&path) {
            Ok(b) => b,
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                continue;
            }
        };
        let id = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        debug!("Read {} ({} bytes)", path.display(), bytes.len());
        logs.push(Submission::new(id, String::from_utf8_lossy(&bytes)));
    }
    Ok(logs)
}
