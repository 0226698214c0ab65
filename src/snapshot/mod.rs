//! Snapshot persistence: codec + adapter trait.
//!
//! The store owns the serialization format; adapters move opaque blobs.
//! Blob layout (LE):
//! [MAGIC8 = "CNPYCFG1"][version u32 = 1][flags u32][payload_len u32][crc32 u32]
//! followed by `payload_len` bytes of JSON-encoded tree. The CRC covers
//! the payload only, so a torn or bit-rotted snapshot is detected at
//! load and the store falls back to defaults instead of crashing.

pub mod file;
pub mod mem;

pub use file::FileSnapshot;
pub use mem::MemSnapshot;

use byteorder::{ByteOrder, LittleEndian};

use crate::consts::{FLAG_PRETTY_JSON, SNAP_HDR_SIZE, SNAP_MAGIC, SNAP_VERSION};
use crate::errors::PersistError;
use crate::tree::Tree;

/// Adapter contract: load the last saved blob (None on first run),
/// overwrite it on save. The blob is opaque to the adapter.
pub trait Persistence {
    fn load(&mut self) -> Result<Option<Vec<u8>>, PersistError>;
    fn save(&mut self, blob: &[u8]) -> Result<(), PersistError>;
}

/// Encode a tree into a snapshot blob (header + JSON payload).
pub fn encode_snapshot(tree: &Tree, pretty: bool) -> Result<Vec<u8>, PersistError> {
    let payload = if pretty {
        serde_json::to_vec_pretty(tree)
    } else {
        serde_json::to_vec(tree)
    }
    .map_err(|e| PersistError::Codec(e.to_string()))?;

    let mut blob = Vec::with_capacity(SNAP_HDR_SIZE + payload.len());
    blob.extend_from_slice(SNAP_MAGIC);
    let mut word = [0u8; 4];
    LittleEndian::write_u32(&mut word, SNAP_VERSION);
    blob.extend_from_slice(&word);
    LittleEndian::write_u32(&mut word, if pretty { FLAG_PRETTY_JSON } else { 0 });
    blob.extend_from_slice(&word);
    LittleEndian::write_u32(&mut word, payload.len() as u32);
    blob.extend_from_slice(&word);
    LittleEndian::write_u32(&mut word, crc32fast::hash(&payload));
    blob.extend_from_slice(&word);
    blob.extend_from_slice(&payload);
    Ok(blob)
}

/// Decode and verify a snapshot blob.
pub fn decode_snapshot(blob: &[u8]) -> Result<Tree, PersistError> {
    if blob.len() < SNAP_HDR_SIZE {
        return Err(PersistError::Corrupt(format!(
            "short header: {} B < {} B",
            blob.len(),
            SNAP_HDR_SIZE
        )));
    }
    if &blob[..8] != SNAP_MAGIC {
        return Err(PersistError::Corrupt("bad magic".to_string()));
    }
    let version = LittleEndian::read_u32(&blob[8..12]);
    if version != SNAP_VERSION {
        return Err(PersistError::Corrupt(format!(
            "unsupported version {} (expected {})",
            version, SNAP_VERSION
        )));
    }
    // flags at [12..16] are informational for now
    let payload_len = LittleEndian::read_u32(&blob[16..20]) as usize;
    let crc = LittleEndian::read_u32(&blob[20..24]);

    let payload = &blob[SNAP_HDR_SIZE..];
    if payload.len() != payload_len {
        return Err(PersistError::Corrupt(format!(
            "payload length mismatch: header says {}, got {}",
            payload_len,
            payload.len()
        )));
    }
    let actual = crc32fast::hash(payload);
    if actual != crc {
        return Err(PersistError::Corrupt(format!(
            "crc mismatch: header {:08x}, payload {:08x}",
            crc, actual
        )));
    }

    serde_json::from_slice(payload).map_err(|e| PersistError::Codec(e.to_string()))
}

/// Header fields of a snapshot blob, without decoding the payload.
/// Used by the CLI status command.
#[derive(Debug, Clone)]
pub struct SnapshotInfo {
    pub version: u32,
    pub flags: u32,
    pub payload_len: u32,
    pub crc: u32,
    pub crc_ok: bool,
}

pub fn inspect_snapshot(blob: &[u8]) -> Result<SnapshotInfo, PersistError> {
    if blob.len() < SNAP_HDR_SIZE {
        return Err(PersistError::Corrupt("short header".to_string()));
    }
    if &blob[..8] != SNAP_MAGIC {
        return Err(PersistError::Corrupt("bad magic".to_string()));
    }
    let version = LittleEndian::read_u32(&blob[8..12]);
    let flags = LittleEndian::read_u32(&blob[12..16]);
    let payload_len = LittleEndian::read_u32(&blob[16..20]);
    let crc = LittleEndian::read_u32(&blob[20..24]);
    let payload = &blob[SNAP_HDR_SIZE..];
    let crc_ok = payload.len() == payload_len as usize && crc32fast::hash(payload) == crc;
    Ok(SnapshotInfo {
        version,
        flags,
        payload_len,
        crc,
        crc_ok,
    })
}
