use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use CanopyCfg::consts::SNAP_FILE;
use CanopyCfg::{decode_snapshot, inspect_snapshot};

pub fn exec(path: PathBuf) -> Result<()> {
    let snap_path = path.join(SNAP_FILE);
    let blob = fs::read(&snap_path)
        .with_context(|| format!("read snapshot {}", snap_path.display()))?;

    let info = inspect_snapshot(&blob)?;
    println!("snapshot:    {}", snap_path.display());
    println!("size:        {} B", blob.len());
    println!("version:     {}", info.version);
    println!("flags:       0x{:x}", info.flags);
    println!("payload:     {} B", info.payload_len);
    println!(
        "crc32:       {:08x} ({})",
        info.crc,
        if info.crc_ok { "ok" } else { "MISMATCH" }
    );

    if info.crc_ok {
        let tree = decode_snapshot(&blob)?;
        let keys: Vec<&str> = tree.entries().map(|(k, _)| k.as_str()).collect();
        println!("top keys:    {} ({})", tree.len(), keys.join(", "));
    }
    Ok(())
}
