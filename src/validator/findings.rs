use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
pub enum Severity {
    Warning,
    Error,
}

/// Which half of the exchange a finding is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum Side {
    #[strum(serialize = "sent")]
    Sent,
    #[strum(serialize = "received")]
    Received,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FindingKind {
    Malformed,
    BadFrequency,
    BadMode,
    BadDate,
    BadTime,
    BadCallsign(Side),
    BadLocation(Side),
    MultiLocation(Side),
    MissingHeader,
    MissingOptionalHeader,
    EmptyLog,
}

impl FindingKind {
    pub fn severity(self) -> Severity {
        match self {
            Self::MultiLocation(_) | Self::MissingOptionalHeader => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Source line, for per-contact findings.
    pub line: Option<usize>,
    pub kind: FindingKind,
    pub message: String,
}

impl Finding {
    pub fn contact(line: usize, kind: FindingKind, message: impl Into<String>) -> Self {
        Self {
            line: Some(line),
            kind,
            message: message.into(),
        }
    }

    pub fn log(kind: FindingKind, message: impl Into<String>) -> Self {
        Self {
            line: None,
            kind,
            message: message.into(),
        }
    }

    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "Line {}: {}", line, self.message),
            None => f.write_str(&self.message),
        }
    }
}
