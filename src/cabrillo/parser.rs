use std::fmt;
use std::str::FromStr;
use strum_macros::EnumString;

#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumString)]
#[strum(serialize_all = "SCREAMING-KEBAB-CASE")]
pub enum Tag {
    StartOfLog,
    EndOfLog,
    Contest,
    Callsign,
    Email,
    CategoryPower,
    CategoryStation,
    CategoryOverlay,
    CategoryOperator,
    Certificate,
    /// Synthetic directive written at the head of a prepared log.
    QsopartyCategory,
    #[strum(default)]
    Other(String),
}

impl Tag {
    pub fn name(&self) -> &str {
        match self {
            Self::StartOfLog => "START-OF-LOG",
            Self::EndOfLog => "END-OF-LOG",
            Self::Contest => "CONTEST",
            Self::Callsign => "CALLSIGN",
            Self::Email => "EMAIL",
            Self::CategoryPower => "CATEGORY-POWER",
            Self::CategoryStation => "CATEGORY-STATION",
            Self::CategoryOverlay => "CATEGORY-OVERLAY",
            Self::CategoryOperator => "CATEGORY-OPERATOR",
            Self::Certificate => "CERTIFICATE",
            Self::QsopartyCategory => "QSOPARTY-CATEGORY",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    Header { tag: Tag, values: Vec<String> },
    /// All tokens of a `QSO:` line, the tag included. Length is not checked here.
    Contact(Vec<String>),
    Unrecognized(String),
}

/// Classifies one line. Input is uppercased before tokenizing.
pub fn parse_line(line: &str) -> LineKind {
    let upper = line.trim().to_uppercase();
    if upper.is_empty() {
        return LineKind::Blank;
    }

    let Some((tag, rest)) = upper.split_once(':') else {
        return LineKind::Unrecognized(line.to_string());
    };

    let tag = tag.trim_end();
    let well_formed = !tag.is_empty()
        && tag
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !well_formed {
        return LineKind::Unrecognized(line.to_string());
    }

    let values: Vec<String> = rest.split_whitespace().map(str::to_string).collect();
    if tag == "QSO" {
        let mut tokens = Vec::with_capacity(values.len() + 1);
        tokens.push("QSO:".to_string());
        tokens.extend(values);
        return LineKind::Contact(tokens);
    }

    let tag = Tag::from_str(tag).unwrap_or_else(|_| Tag::Other(tag.to_string()));
    LineKind::Header { tag, values }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    /// 1-based line number in the source text.
    pub number: usize,
    pub kind: LineKind,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedLog {
    pub lines: Vec<ParsedLine>,
}

impl ParsedLog {
    pub fn headers(&self) -> impl Iterator<Item = (usize, &Tag, &[String])> {
        self.lines.iter().filter_map(|l| match &l.kind {
            LineKind::Header { tag, values } => Some((l.number, tag, values.as_slice())),
            _ => None,
        })
    }

    /// Values of the first occurrence of `tag`.
    pub fn header(&self, tag: &Tag) -> Option<&[String]> {
        self.headers()
            .find(|(_, t, _)| *t == tag)
            .map(|(_, _, values)| values)
    }

    pub fn has_tag(&self, tag: &Tag) -> bool {
        self.header(tag).is_some()
    }

    pub fn contacts(&self) -> impl Iterator<Item = (usize, &[String])> {
        self.lines.iter().filter_map(|l| match &l.kind {
            LineKind::Contact(tokens) => Some((l.number, tokens.as_slice())),
            _ => None,
        })
    }

    pub fn contact_count(&self) -> usize {
        self.contacts().count()
    }
}

pub fn parse_log(text: &str) -> ParsedLog {
    let lines = text
        .lines()
        .enumerate()
        .map(|(i, line)| ParsedLine {
            number: i + 1,
            kind: parse_line(line),
        })
        .collect();
    ParsedLog { lines }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_names_round_trip() {
        for tag in [
            Tag::StartOfLog,
            Tag::CategoryOverlay,
            Tag::QsopartyCategory,
            Tag::Certificate,
        ] {
            assert_eq!(Tag::from_str(tag.name()).unwrap(), tag);
        }
        assert_eq!(
            Tag::from_str("X-CUSTOM").unwrap(),
            Tag::Other("X-CUSTOM".to_string())
        );
    }

    #[test]
    fn test_header_without_space() {
        let kind = parse_line("callsign:w5abc");
        assert_eq!(
            kind,
            LineKind::Header {
                tag: Tag::Callsign,
                values: vec!["W5ABC".to_string()]
            }
        );
    }
}
