// Deterministic synthetic datasets
//
// Each protocol has a profile: a cyclic list of message kinds with a payload
// range, plus an overhead model that is either constant or a function of the
// payload size. Only payload sizes are random. The generator is a seeded
// ChaCha8 stream, so (seed, protocol, message_count) fully determines the
// output on every platform.

use crate::error::{AnalysisError, Result};
use crate::record::{Dataset, LayerOverheads, MessageRecord, Protocol};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::ops::Range;
use tracing::debug;

/// A message category with its half-open payload size range
#[derive(Debug, Clone)]
pub struct MessageKind {
    pub name: &'static str,
    pub payload: Range<u64>,
}

/// Generation parameters for one protocol
#[derive(Debug)]
pub struct SyntheticProfile {
    pub protocol: Protocol,
    pub default_seed: u64,
    pub start_ms: u64,
    pub interval_ms: u64,
    pub kinds: &'static [MessageKind],
    overheads: fn(u64) -> LayerOverheads,
}

impl SyntheticProfile {
    pub fn for_protocol(protocol: Protocol) -> &'static SyntheticProfile {
        match protocol {
            Protocol::LwM2M => &LWM2M_PROFILE,
            Protocol::Matter => &MATTER_PROFILE,
        }
    }

    /// Layer overheads this profile assigns to a payload of `payload` bytes
    pub fn overheads(&self, payload: u64) -> LayerOverheads {
        (self.overheads)(payload)
    }
}

// UDP header, CoAP header, CoAP options, LwM2M object metadata
fn lwm2m_overheads(_payload: u64) -> LayerOverheads {
    LayerOverheads::new(8, 12, 15, 8)
}

// UDP + IPv6, Matter session (PASE/CASE), TLV encoding, cluster metadata
fn matter_overheads(payload: u64) -> LayerOverheads {
    LayerOverheads::new(40, 35, (payload / 10 + 3).max(8), 25)
}

static LWM2M_KINDS: [MessageKind; 4] = [
    MessageKind { name: "REGISTRATION", payload: 80..150 },
    MessageKind { name: "TEMPERATURE", payload: 1..8 },
    MessageKind { name: "BATTERY", payload: 1..4 },
    MessageKind { name: "DEVICE", payload: 20..50 },
];

static MATTER_KINDS: [MessageKind; 6] = [
    MessageKind { name: "COMMISSIONING", payload: 40..80 },
    MessageKind { name: "ON_COMMAND", payload: 3..8 },
    MessageKind { name: "OFF_COMMAND", payload: 3..8 },
    MessageKind { name: "TEMPERATURE_READ", payload: 4..12 },
    MessageKind { name: "LEVEL_CONTROL", payload: 6..15 },
    MessageKind { name: "DEVICE_INFO", payload: 25..60 },
];

static LWM2M_PROFILE: SyntheticProfile = SyntheticProfile {
    protocol: Protocol::LwM2M,
    default_seed: 42,
    start_ms: 30_000,
    interval_ms: 30_000,
    kinds: &LWM2M_KINDS,
    overheads: lwm2m_overheads,
};

static MATTER_PROFILE: SyntheticProfile = SyntheticProfile {
    protocol: Protocol::Matter,
    default_seed: 43,
    start_ms: 30_000,
    interval_ms: 15_000,
    kinds: &MATTER_KINDS,
    overheads: matter_overheads,
};

/// Generate `message_count` records for `protocol` from `seed`
///
/// # Errors
/// `InsufficientData` when `message_count == 0`.
pub fn generate(seed: u64, protocol: Protocol, message_count: usize) -> Result<Dataset> {
    if message_count == 0 {
        return Err(AnalysisError::insufficient(
            format!("synthetic {} dataset", protocol),
            1,
            0,
        ));
    }

    let profile = SyntheticProfile::for_protocol(protocol);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut records = Vec::with_capacity(message_count);

    for i in 0..message_count {
        let kind = &profile.kinds[i % profile.kinds.len()];
        let payload_size = rng.gen_range(kind.payload.clone());
        let record = MessageRecord::new(
            protocol,
            i as u64 + 1,
            kind.name,
            payload_size,
            profile.overheads(payload_size),
        )?
        .with_timestamp(profile.start_ms + i as u64 * profile.interval_ms);
        records.push(record);
    }

    debug!(protocol = %protocol, seed, count = message_count, "generated synthetic dataset");
    Dataset::new(protocol.tag(), protocol, records)
}
