pub mod log;
pub mod parser;

pub use self::log::{ContactRecord, Exchange, LogRecord, StationHeader};
pub use self::parser::{parse_line, parse_log, LineKind, ParsedLine, ParsedLog, Tag};

/// Number of whitespace tokens in a contact line, `QSO:` included.
pub const CONTACT_FIELDS: usize = 11;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H%M";
