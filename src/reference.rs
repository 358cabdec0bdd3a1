use crate::error::{QpResult, QsoPartyError};
use crate::types::LocationKind;
use std::collections::BTreeSet;
use std::fs::File;
use std::path::Path;
use tracing::{info, warn};

/// The Local and Regional location code sets. Anything in neither is Foreign.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    local: BTreeSet<String>,
    regional: BTreeSet<String>,
}

impl ReferenceData {
    pub fn new<L, R, S, T>(local: L, regional: R) -> QpResult<Self>
    where
        L: IntoIterator<Item = S>,
        R: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        let local: BTreeSet<String> = local.into_iter().filter_map(clean_code).collect();
        let regional: BTreeSet<String> = regional.into_iter().filter_map(clean_code).collect();

        if local.is_empty() {
            return Err(QsoPartyError::Reference(
                "Local location set is empty".to_string(),
            ));
        }

        let both: Vec<&String> = local.intersection(&regional).collect();
        if !both.is_empty() {
            warn!(
                "Codes present in both Local and Regional sets resolve as Local: {:?}",
                both
            );
        }

        Ok(Self { local, regional })
    }

    pub fn load<P: AsRef<Path>, Q: AsRef<Path>>(local_path: P, regional_path: Q) -> QpResult<Self> {
        let local = read_codes(local_path.as_ref())?;
        let regional = read_codes(regional_path.as_ref())?;
        info!(
            "Loaded reference data: {} local codes, {} regional codes",
            local.len(),
            regional.len()
        );
        Self::new(local, regional)
    }

    pub fn classify(&self, code: &str) -> LocationKind {
        if self.local.contains(code) {
            LocationKind::Local
        } else if self.regional.contains(code) {
            LocationKind::Regional
        } else {
            LocationKind::Foreign
        }
    }

    pub fn is_local(&self, code: &str) -> bool {
        self.local.contains(code)
    }

    pub fn is_regional(&self, code: &str) -> bool {
        self.regional.contains(code)
    }

    /// Local codes in sorted order.
    pub fn local_codes(&self) -> impl Iterator<Item = &str> {
        self.local.iter().map(String::as_str)
    }

    pub fn regional_codes(&self) -> impl Iterator<Item = &str> {
        self.regional.iter().map(String::as_str)
    }
}

fn clean_code<S: AsRef<str>>(s: S) -> Option<String> {
    let code = s.as_ref().trim().to_uppercase();
    (!code.is_empty()).then_some(code)
}

/// One code per line; extra columns are ignored and `#` starts a comment line.
fn read_codes(path: &Path) -> QpResult<Vec<String>> {
    let file = File::open(path).map_err(|e| {
        QsoPartyError::Reference(format!("Could not open '{}': {}", path.display(), e))
    })?;

    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .comment(Some(b'#'))
        .from_reader(file);

    let mut codes = Vec::new();
    for result in rdr.records() {
        let rec = result?;
        if let Some(code) = rec.get(0) {
            codes.push(code.to_string());
        }
    }
    Ok(codes)
}
