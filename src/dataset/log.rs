// Line-oriented measurement logs (grammar version 1)
//
//   [<any prefix>Data: ]<timestamp>,<protocol>,<message_id>,<total_size>,<payload_size>,
//                       <transport>,<session>,<presentation>,<application>
//
// All fields except <protocol> are unsigned decimal integers. The optional
// prefix covers serial-console framing such as "[12:00:01] Data: ".
//
// Skip policy: a line that does not match the grammar, or that matches but
// carries a different protocol tag, is skipped and counted. A matching line
// whose <total_size> disagrees with payload + overheads is an error.

use crate::error::{AnalysisError, Result};
use crate::record::{Dataset, LayerOverheads, MessageRecord, Protocol};
use regex::{Captures, Regex};
use std::sync::LazyLock;
use tracing::{debug, info};

/// Grammar version understood by [`parse_log`]
pub const LOG_GRAMMAR_VERSION: u32 = 1;

/// Label given to records whose source carries no message type
pub const UNSPECIFIED_MESSAGE_TYPE: &str = "UNSPECIFIED";

static LOG_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:.*Data:\s*)?(\d+),([A-Za-z][A-Za-z0-9]*),(\d+),(\d+),(\d+),(\d+),(\d+),(\d+),(\d+)\s*$",
    )
    .expect("log grammar pattern is valid")
});

/// Outcome of scanning a log: the dataset plus the number of skipped lines
#[derive(Debug, Clone)]
pub struct LogScan {
    pub dataset: Dataset,
    pub skipped_lines: usize,
}

fn field(caps: &Captures<'_>, index: usize, name: &str, line_no: usize) -> Result<u64> {
    let text = caps.get(index).map(|m| m.as_str()).unwrap_or_default();
    text.parse::<u64>().map_err(|e| {
        AnalysisError::Parse(format!(
            "line {}: field '{}' value '{}' is not a valid integer: {}",
            line_no, name, text, e
        ))
    })
}

fn parse_line(caps: &Captures<'_>, protocol: Protocol, line_no: usize) -> Result<MessageRecord> {
    let timestamp = field(caps, 1, "timestamp", line_no)?;
    let message_id = field(caps, 3, "message_id", line_no)?;
    let declared_total = field(caps, 4, "total_size", line_no)?;
    let payload_size = field(caps, 5, "payload_size", line_no)?;
    let overheads = LayerOverheads::new(
        field(caps, 6, "transport", line_no)?,
        field(caps, 7, "session", line_no)?,
        field(caps, 8, "presentation", line_no)?,
        field(caps, 9, "application", line_no)?,
    );

    let record = MessageRecord::new(
        protocol,
        message_id,
        UNSPECIFIED_MESSAGE_TYPE,
        payload_size,
        overheads,
    )
    .map_err(|e| AnalysisError::Parse(format!("line {}: {}", line_no, e)))?
    .with_timestamp(timestamp);

    if record.total_size() != declared_total {
        return Err(AnalysisError::Parse(format!(
            "line {}: declared total size {} does not match payload + overheads = {}",
            line_no,
            declared_total,
            record.total_size()
        )));
    }

    Ok(record)
}

/// Scan log text for records of `protocol`
///
/// # Errors
/// `Parse` if no line matches, or if a matching line is inconsistent.
pub fn parse_log(text: &str, protocol: Protocol) -> Result<LogScan> {
    let mut records = Vec::new();
    let mut skipped_lines = 0usize;

    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;
        let Some(caps) = LOG_LINE.captures(line) else {
            skipped_lines += 1;
            continue;
        };

        let tag = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
        match tag.parse::<Protocol>() {
            Ok(found) if found == protocol => {}
            _ => {
                debug!(line = line_no, tag, "skipping record for another protocol");
                skipped_lines += 1;
                continue;
            }
        }

        records.push(parse_line(&caps, protocol, line_no)?);
    }

    if records.is_empty() {
        return Err(AnalysisError::Parse(format!(
            "no records found for {} ({} lines skipped)",
            protocol, skipped_lines
        )));
    }

    info!(
        protocol = %protocol,
        records = records.len(),
        skipped = skipped_lines,
        "parsed measurement log"
    );

    Ok(LogScan {
        dataset: Dataset::new(protocol.tag(), protocol, records)?,
        skipped_lines,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_bare_line() {
        let scan = parse_log("150611,LwM2M,6,45,2,8,12,15,8\n", Protocol::LwM2M).unwrap();
        assert_eq!(scan.skipped_lines, 0);
        let record = &scan.dataset.records()[0];
        assert_eq!(record.message_id(), 6);
        assert_eq!(record.total_size(), 45);
        assert_eq!(record.payload_size(), 2);
        assert_eq!(record.timestamp(), Some(150611));
        assert_eq!(record.message_type(), UNSPECIFIED_MESSAGE_TYPE);
    }

    #[test]
    fn test_parses_serial_prefix_and_skips_noise() {
        let text = "\
Booting...
[00:02:30] Data: 150611,LwM2M,6,45,2,8,12,15,8
WiFi connected
Data: 180611,LwM2M,7,46,3,8,12,15,8
";
        let scan = parse_log(text, Protocol::LwM2M).unwrap();
        assert_eq!(scan.dataset.len(), 2);
        assert_eq!(scan.skipped_lines, 2);
    }

    #[test]
    fn test_skips_other_protocol() {
        let text = "1,Matter,1,113,5,40,35,8,25\n2,LwM2M,2,45,2,8,12,15,8\n";
        let scan = parse_log(text, Protocol::LwM2M).unwrap();
        assert_eq!(scan.dataset.len(), 1);
        assert_eq!(scan.skipped_lines, 1);
    }

    #[test]
    fn test_no_matching_lines_is_parse_error() {
        let err = parse_log("hello\nworld\n", Protocol::LwM2M).unwrap_err();
        assert!(matches!(err, AnalysisError::Parse(ref m) if m.contains("no records found")));
    }

    #[test]
    fn test_empty_text_is_parse_error() {
        assert!(matches!(
            parse_log("", Protocol::Matter),
            Err(AnalysisError::Parse(_))
        ));
    }

    #[test]
    fn test_inconsistent_total_is_parse_error() {
        let err = parse_log("1,LwM2M,1,99,2,8,12,15,8\n", Protocol::LwM2M).unwrap_err();
        assert!(matches!(err, AnalysisError::Parse(ref m) if m.contains("line 1")));
    }

    #[test]
    fn test_trailing_garbage_does_not_match() {
        let err = parse_log("1,LwM2M,1,45,2,8,12,15,8,extra\n", Protocol::LwM2M).unwrap_err();
        assert!(matches!(err, AnalysisError::Parse(ref m) if m.contains("no records found")));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let text = "1,LwM2M,1,45,2,8,12,15,8\n2,LwM2M,1,45,2,8,12,15,8\n";
        assert!(matches!(
            parse_log(text, Protocol::LwM2M),
            Err(AnalysisError::Parse(_))
        ));
    }
}
