// Tabular (CSV) measurement files
//
// The header row must name every required column exactly; extra columns are
// ignored. `timestamp` and `total_size` are optional. A `total_size` column is
// informational only: the record recomputes its own total and a mismatch is
// logged, never stored.

use crate::error::{AnalysisError, Result};
use crate::record::{Dataset, Layer, LayerOverheads, MessageRecord, Protocol};
use std::io::Read;
use tracing::{info, warn};

/// Columns every tabular file must provide
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "protocol",
    "message_id",
    "message_type",
    "payload_size",
    "transport_overhead",
    "session_overhead",
    "presentation_overhead",
    "application_overhead",
];

struct ColumnMap {
    protocol: usize,
    message_id: usize,
    message_type: usize,
    payload_size: usize,
    layers: [usize; 4],
    timestamp: Option<usize>,
    total_size: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h == name);
        let require = |name: &str| {
            find(name).ok_or_else(|| AnalysisError::Schema {
                column: name.to_string(),
            })
        };

        // Report the first missing column in declaration order
        for column in REQUIRED_COLUMNS {
            require(column)?;
        }

        Ok(Self {
            protocol: require("protocol")?,
            message_id: require("message_id")?,
            message_type: require("message_type")?,
            payload_size: require("payload_size")?,
            layers: [
                require(Layer::Transport.column())?,
                require(Layer::Session.column())?,
                require(Layer::Presentation.column())?,
                require(Layer::Application.column())?,
            ],
            timestamp: find("timestamp"),
            total_size: find("total_size"),
        })
    }
}

fn cell<'r>(row: &'r csv::StringRecord, index: usize, row_no: usize, name: &str) -> Result<&'r str> {
    row.get(index).ok_or_else(|| {
        AnalysisError::Parse(format!("row {}: missing value for '{}'", row_no, name))
    })
}

fn integer(row: &csv::StringRecord, index: usize, row_no: usize, name: &str) -> Result<u64> {
    let text = cell(row, index, row_no, name)?;
    text.parse::<u64>().map_err(|e| {
        AnalysisError::Parse(format!(
            "row {}: '{}' value '{}' is not a valid integer: {}",
            row_no, name, text, e
        ))
    })
}

fn parse_row(
    row: &csv::StringRecord,
    columns: &ColumnMap,
    protocol: Protocol,
    row_no: usize,
) -> Result<MessageRecord> {
    let tag: Protocol = cell(row, columns.protocol, row_no, "protocol")?
        .parse()
        .map_err(|e| AnalysisError::Parse(format!("row {}: {}", row_no, e)))?;
    if tag != protocol {
        return Err(AnalysisError::Parse(format!(
            "row {}: {} record in a {} file",
            row_no, tag, protocol
        )));
    }

    let layer_bytes = |layer: Layer| integer(row, columns.layers[layer as usize], row_no, layer.column());
    let overheads = LayerOverheads::new(
        layer_bytes(Layer::Transport)?,
        layer_bytes(Layer::Session)?,
        layer_bytes(Layer::Presentation)?,
        layer_bytes(Layer::Application)?,
    );

    let mut record = MessageRecord::new(
        protocol,
        integer(row, columns.message_id, row_no, "message_id")?,
        cell(row, columns.message_type, row_no, "message_type")?,
        integer(row, columns.payload_size, row_no, "payload_size")?,
        overheads,
    )
    .map_err(|e| AnalysisError::Parse(format!("row {}: {}", row_no, e)))?;

    if let Some(index) = columns.timestamp {
        record = record.with_timestamp(integer(row, index, row_no, "timestamp")?);
    }

    if let Some(index) = columns.total_size {
        let declared = integer(row, index, row_no, "total_size")?;
        if declared != record.total_size() {
            warn!(
                row = row_no,
                declared,
                computed = record.total_size(),
                "ignoring total_size column that disagrees with payload + overheads"
            );
        }
    }

    Ok(record)
}

/// Read a CSV dataset of `protocol` records
///
/// # Errors
/// `Schema` if a required column is absent, `Parse` for malformed rows or an
/// empty body.
pub fn parse_tabular<R: Read>(reader: R, protocol: Protocol) -> Result<Dataset> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| AnalysisError::Parse(format!("unreadable header row: {}", e)))?
        .clone();
    let columns = ColumnMap::from_headers(&headers)?;

    let mut records = Vec::new();
    for (index, row) in csv_reader.records().enumerate() {
        // Header is row 1
        let row_no = index + 2;
        let row = row.map_err(|e| AnalysisError::Parse(format!("row {}: {}", row_no, e)))?;
        records.push(parse_row(&row, &columns, protocol, row_no)?);
    }

    if records.is_empty() {
        return Err(AnalysisError::Parse(format!(
            "no records found for {} in tabular input",
            protocol
        )));
    }

    info!(protocol = %protocol, records = records.len(), "parsed tabular dataset");
    Dataset::new(protocol.tag(), protocol, records)
}
