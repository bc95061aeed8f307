use bincode::Options;

use crate::store::{FormatError, Schema};
use crate::AggregateState;

/// Magic (4 bytes) followed by the little endian format version (2 bytes).
pub const FORMAT_HEADER_LEN: usize = 6;

/// Upper bound for the encoded schema record.
pub const MAX_SNAPSHOT_BYTES: u64 = 1024 * 1024;

fn options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .with_little_endian()
        .with_limit(MAX_SNAPSHOT_BYTES)
        .reject_trailing_bytes()
}

pub(crate) fn encode<S, Sc>(aggregate_state: &AggregateState<S>) -> Result<Vec<u8>, FormatError>
where
    Sc: Schema<S>,
{
    let record: Sc = Sc::from_state(aggregate_state);

    let mut bytes: Vec<u8> = Vec::with_capacity(FORMAT_HEADER_LEN + 64);
    bytes.extend_from_slice(&Sc::MAGIC);
    bytes.extend_from_slice(&Sc::VERSION.to_le_bytes());
    options().serialize_into(&mut bytes, &record)?;

    Ok(bytes)
}

pub(crate) fn decode<S, Sc>(bytes: &[u8]) -> Result<AggregateState<S>, FormatError>
where
    Sc: Schema<S>,
{
    if bytes.len() < FORMAT_HEADER_LEN {
        return Err(FormatError::Truncated(bytes.len()));
    }

    let (header, body) = bytes.split_at(FORMAT_HEADER_LEN);
    let magic: [u8; 4] = [header[0], header[1], header[2], header[3]];
    if magic != Sc::MAGIC {
        return Err(FormatError::Magic {
            expected: Sc::MAGIC,
            found: magic,
        });
    }

    let version: u16 = u16::from_le_bytes([header[4], header[5]]);
    if version != Sc::VERSION {
        return Err(FormatError::Version {
            expected: Sc::VERSION,
            found: version,
        });
    }

    let record: Sc = options().deserialize(body)?;
    record.to_state()
}
