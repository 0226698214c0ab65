//! Shared constants for the snapshot file format and store layout.

// -------- Snapshot --------
// Header (LE, 24 bytes):
// [MAGIC8 = "CNPYCFG1"][version u32 = 1][flags u32][payload_len u32][crc32 u32]
// Payload: JSON encoding of the config tree.
pub const SNAP_MAGIC: &[u8; 8] = b"CNPYCFG1";
pub const SNAP_VERSION: u32 = 1;
pub const SNAP_HDR_SIZE: usize = 24;

pub const SNAP_FILE: &str = "settings.snap";
pub const SNAP_TMP_FILE: &str = "settings.snap.tmp";

// -------- Flags --------
pub const FLAG_PRETTY_JSON: u32 = 0x1;

// -------- Store root --------
pub const LOCK_FILE: &str = "LOCK";
