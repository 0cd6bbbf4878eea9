//! Message records and datasets
//!
//! A [`MessageRecord`] is one observed or synthesized protocol message,
//! decomposed into its payload and the bytes added by each of the four
//! upper protocol layers. Records are immutable once built; `total_size` is
//! computed at construction and can never be set independently.

use crate::error::{AnalysisError, Result};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Messaging protocols the engine knows how to model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Protocol {
    /// OMA Lightweight M2M over CoAP/UDP
    #[serde(rename = "LwM2M")]
    LwM2M,
    /// Matter over UDP/IPv6
    Matter,
}

impl Protocol {
    pub const ALL: [Protocol; 2] = [Protocol::LwM2M, Protocol::Matter];

    /// Canonical tag as it appears in logs and tabular files
    pub fn tag(self) -> &'static str {
        match self {
            Protocol::LwM2M => "LwM2M",
            Protocol::Matter => "Matter",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Protocol {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self> {
        Protocol::ALL
            .into_iter()
            .find(|p| p.tag().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AnalysisError::Parse(format!("unknown protocol tag '{}'", s)))
    }
}

/// The four protocol layers wrapping a payload, outermost first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Layer {
    Transport,
    Session,
    Presentation,
    Application,
}

impl Layer {
    pub const ALL: [Layer; 4] = [
        Layer::Transport,
        Layer::Session,
        Layer::Presentation,
        Layer::Application,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Layer::Transport => "Transport",
            Layer::Session => "Session",
            Layer::Presentation => "Presentation",
            Layer::Application => "Application",
        }
    }

    /// OSI reference model level (L4-L7)
    pub fn osi_level(self) -> u8 {
        match self {
            Layer::Transport => 4,
            Layer::Session => 5,
            Layer::Presentation => 6,
            Layer::Application => 7,
        }
    }

    /// Column name used by the tabular input format
    pub fn column(self) -> &'static str {
        match self {
            Layer::Transport => "transport_overhead",
            Layer::Session => "session_overhead",
            Layer::Presentation => "presentation_overhead",
            Layer::Application => "application_overhead",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (L{})", self.name(), self.osi_level())
    }
}

/// Byte overhead attributed to each layer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct LayerOverheads {
    pub transport: u64,
    pub session: u64,
    pub presentation: u64,
    pub application: u64,
}

impl LayerOverheads {
    pub fn new(transport: u64, session: u64, presentation: u64, application: u64) -> Self {
        Self {
            transport,
            session,
            presentation,
            application,
        }
    }

    pub fn get(&self, layer: Layer) -> u64 {
        match layer {
            Layer::Transport => self.transport,
            Layer::Session => self.session,
            Layer::Presentation => self.presentation,
            Layer::Application => self.application,
        }
    }

    /// Layers paired with their byte counts in [`Layer::ALL`] order
    pub fn iter(&self) -> impl Iterator<Item = (Layer, u64)> + '_ {
        Layer::ALL.into_iter().map(move |layer| (layer, self.get(layer)))
    }

    fn checked_total(&self) -> Option<u64> {
        self.iter()
            .try_fold(0u64, |acc, (_, bytes)| acc.checked_add(bytes))
    }
}

/// One protocol message with its layer-overhead decomposition
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MessageRecord {
    protocol: Protocol,
    message_id: u64,
    message_type: String,
    payload_size: u64,
    layer_overheads: LayerOverheads,
    total_size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<u64>,
}

impl MessageRecord {
    /// Build a record, deriving `total_size` from payload and overheads
    ///
    /// # Errors
    /// `Parse` if `message_id` is zero, `Domain` if the byte sum overflows.
    pub fn new(
        protocol: Protocol,
        message_id: u64,
        message_type: impl Into<String>,
        payload_size: u64,
        layer_overheads: LayerOverheads,
    ) -> Result<Self> {
        if message_id == 0 {
            return Err(AnalysisError::Parse(
                "message id must be a positive integer".to_string(),
            ));
        }

        let total_size = layer_overheads
            .checked_total()
            .and_then(|overhead| overhead.checked_add(payload_size))
            .ok_or_else(|| {
                AnalysisError::Domain(format!("total size of message {} overflows", message_id))
            })?;

        Ok(Self {
            protocol,
            message_id,
            message_type: message_type.into(),
            payload_size,
            layer_overheads,
            total_size,
            timestamp: None,
        })
    }

    /// Attach a capture timestamp (milliseconds)
    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    pub fn message_id(&self) -> u64 {
        self.message_id
    }

    pub fn message_type(&self) -> &str {
        &self.message_type
    }

    pub fn payload_size(&self) -> u64 {
        self.payload_size
    }

    pub fn layer_overheads(&self) -> &LayerOverheads {
        &self.layer_overheads
    }

    pub fn timestamp(&self) -> Option<u64> {
        self.timestamp
    }

    /// `payload_size + Σ layer_overheads`
    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    /// Bytes that are not payload
    pub fn overhead_bytes(&self) -> u64 {
        self.total_size - self.payload_size
    }

    /// Payload share of the message, in percent
    ///
    /// # Errors
    /// `Domain` when `total_size == 0`.
    pub fn efficiency_percent(&self) -> Result<f64> {
        if self.total_size == 0 {
            return Err(AnalysisError::Domain(format!(
                "efficiency undefined for {} message {}: total size is 0",
                self.protocol, self.message_id
            )));
        }
        Ok(self.payload_size as f64 / self.total_size as f64 * 100.0)
    }

    /// `100 - efficiency_percent`
    pub fn overhead_percent(&self) -> Result<f64> {
        self.efficiency_percent().map(|eff| 100.0 - eff)
    }
}

/// An ordered, single-protocol collection of message records
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dataset {
    name: String,
    protocol: Protocol,
    records: Vec<MessageRecord>,
}

impl Dataset {
    /// Build a dataset, checking protocol homogeneity and id uniqueness
    ///
    /// # Errors
    /// `Parse` if a record belongs to another protocol or repeats a message id.
    pub fn new(
        name: impl Into<String>,
        protocol: Protocol,
        records: Vec<MessageRecord>,
    ) -> Result<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if record.protocol() != protocol {
                return Err(AnalysisError::Parse(format!(
                    "message {} is tagged {}, dataset holds {}",
                    record.message_id(),
                    record.protocol(),
                    protocol
                )));
            }
            if !seen.insert(record.message_id()) {
                return Err(AnalysisError::Parse(format!(
                    "duplicate message id {} in {} dataset",
                    record.message_id(),
                    protocol
                )));
            }
        }

        Ok(Self {
            name: name.into(),
            protocol,
            records,
        })
    }

    /// Rename the dataset; records are untouched
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    pub fn records(&self) -> &[MessageRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// `total_size` of every record, in order
    pub fn total_sizes(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.total_size() as f64).collect()
    }

    /// Fail with `InsufficientData` unless the dataset has `min` records
    pub fn require(&self, min: usize, context: &str) -> Result<()> {
        if self.records.len() < min {
            return Err(AnalysisError::insufficient(
                format!("{} ({})", context, self.name),
                min,
                self.records.len(),
            ));
        }
        Ok(())
    }
}
