//! Parser for `/proc/net/dev`.
//!
//! These are pure functions that turn the content of `/proc/net/dev` into
//! structured data. They are designed to be easily testable with string inputs.
//!
//! Format:
//! ```text
//! Inter-|   Receive                                                |  Transmit
//!  face |bytes    packets errs drop fifo frame compressed multicast|bytes    packets errs drop fifo colls carrier compressed
//!     lo: 1234567     1234    0    0    0     0          0         0  1234567     1234    0    0    0     0       0          0
//! ```
//!
//! Only the receive field list of the header is read. It is used twice, once
//! suffixed `_recv` and once suffixed `_sent`, and the two lists are matched
//! positionally against the value columns of each data line. The transmit
//! columns therefore carry receive-side names (`frame_sent`, `multicast_sent`)
//! rather than the kernel's own transmit names (`colls`, `carrier`).

use std::collections::BTreeMap;
use std::fmt;

/// Minimum number of field names in the header's receive section.
pub const MIN_HEADER_FIELDS: usize = 8;

/// Number of value columns stored per data line.
pub const STORED_FIELDS: usize = 16;

/// Value recorded for a counter that failed to parse.
pub const SENTINEL_VALUE: i64 = -1;

/// Error type for parsing failures.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
}

impl ParseError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Parse error: {}", self.message)
    }
}

impl std::error::Error for ParseError {}

/// Statistic names derived from the `/proc/net/dev` header line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetDevHeader {
    /// Field names suffixed `_recv`, matched against the first value group.
    recv: Vec<String>,
    /// Field names suffixed `_sent`, matched against the second value group.
    sent: Vec<String>,
}

impl NetDevHeader {
    /// Builds the header from raw field names.
    pub fn from_fields<S: AsRef<str>>(fields: &[S]) -> Self {
        Self {
            recv: fields
                .iter()
                .map(|f| format!("{}_recv", f.as_ref()))
                .collect(),
            sent: fields
                .iter()
                .map(|f| format!("{}_sent", f.as_ref()))
                .collect(),
        }
    }

    pub fn recv(&self) -> &[String] {
        &self.recv
    }

    pub fn sent(&self) -> &[String] {
        &self.sent
    }

    /// Total number of statistic names, receive and send side together.
    ///
    /// Every data line must carry exactly this many values.
    pub fn len(&self) -> usize {
        self.recv.len() + self.sent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All statistic names, receive side first.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.recv.iter().chain(self.sent.iter()).map(String::as_str)
    }
}

/// A counter that could not be parsed and was replaced by [`SENTINEL_VALUE`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueParseWarning {
    pub interface: String,
    pub field: String,
    /// The offending token as it appeared in the file.
    pub raw: String,
    /// The value stored in its place.
    pub value: i64,
    /// Why the token was rejected.
    pub reason: String,
}

impl fmt::Display for ValueParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cannot parse {}/{} value {:?} ({}), saved as {}",
            self.interface, self.field, self.raw, self.reason, self.value
        )
    }
}

/// One parsed data line of `/proc/net/dev`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetDevRow {
    /// Interface name (eth0, lo, etc.)
    pub interface: String,
    /// Statistic name to counter value.
    pub stats: BTreeMap<String, i64>,
    /// Counters in this line that were replaced by the sentinel.
    pub warnings: Vec<ValueParseWarning>,
}

/// `/proc/net/dev` content with a validated header.
///
/// Data lines are parsed lazily through [`NetDevTable::rows`] so that callers
/// can apply the lines that precede a malformed one.
#[derive(Debug, Clone)]
pub struct NetDevTable<'a> {
    header: NetDevHeader,
    lines: Vec<&'a str>,
}

impl<'a> NetDevTable<'a> {
    pub fn header(&self) -> &NetDevHeader {
        &self.header
    }

    /// Parses the data lines in order, skipping empty ones. Lines holding
    /// only whitespace are not empty and fail to parse.
    pub fn rows(&self) -> impl Iterator<Item = Result<NetDevRow, ParseError>> + '_ {
        self.lines
            .iter()
            .filter(|line| !line.is_empty())
            .map(|line| parse_net_dev_row(&self.header, line))
    }
}

/// Splits `/proc/net/dev` content into its header and data lines.
///
/// The first line is a title and is ignored. The header line must be valid;
/// data lines are left for [`NetDevTable::rows`].
pub fn parse_net_dev(content: &str) -> Result<NetDevTable<'_>, ParseError> {
    let mut lines = content.lines();

    if lines.next().is_none() {
        return Err(ParseError::new("empty net/dev content"));
    }
    let header_line = lines
        .next()
        .ok_or_else(|| ParseError::new("missing net/dev header line"))?;

    Ok(NetDevTable {
        header: parse_net_dev_header(header_line)?,
        lines: lines.collect(),
    })
}

/// Parses the `/proc/net/dev` header line.
///
/// Format: ` face |<receive field names>|<transmit field names>`
pub fn parse_net_dev_header(line: &str) -> Result<NetDevHeader, ParseError> {
    let sections: Vec<&str> = line.split('|').collect();
    if sections.len() < 3 {
        return Err(ParseError::new(format!("wrong header format {{{}}}", line)));
    }

    let fields: Vec<&str> = sections[1].split_whitespace().collect();
    if fields.len() < MIN_HEADER_FIELDS {
        return Err(ParseError::new(format!(
            "wrong header length, expected at least {} fields, got {}",
            MIN_HEADER_FIELDS,
            fields.len()
        )));
    }

    Ok(NetDevHeader::from_fields(&fields))
}

/// Parses one `/proc/net/dev` data line against the header.
///
/// Format: `<interface>: <value> <value> ...`
///
/// Counters that are not valid `i64` values are stored as [`SENTINEL_VALUE`]
/// and reported in [`NetDevRow::warnings`].
pub fn parse_net_dev_row(header: &NetDevHeader, line: &str) -> Result<NetDevRow, ParseError> {
    let parts: Vec<&str> = line.split(':').collect();
    if parts.len() != 2 {
        return Err(ParseError::new(format!(
            "wrong interface line format, expected 2 parts, got {}",
            parts.len()
        )));
    }

    let interface = parts[0].trim().to_string();
    let values: Vec<&str> = parts[1].split_whitespace().collect();
    if values.len() != header.len() {
        return Err(ParseError::new(format!(
            "wrong data length for {}, expected {}, got {}",
            interface,
            header.len(),
            values.len()
        )));
    }

    let mut stats = BTreeMap::new();
    let mut warnings = Vec::new();

    for (field, raw) in header.names().zip(values).take(STORED_FIELDS) {
        let value = match raw.parse::<i64>() {
            Ok(v) => v,
            Err(e) => {
                warnings.push(ValueParseWarning {
                    interface: interface.clone(),
                    field: field.to_string(),
                    raw: raw.to_string(),
                    value: SENTINEL_VALUE,
                    reason: e.to_string(),
                });
                SENTINEL_VALUE
            }
        };
        stats.insert(field.to_string(), value);
    }

    Ok(NetDevRow {
        interface,
        stats,
        warnings,
    })
}
