use anyhow::{bail, Result};
use log::info;
use std::path::PathBuf;

use CanopyCfg::consts::SNAP_FILE;
use CanopyCfg::StoreOptions;

use crate::util::{load_defaults, open_store};

pub fn exec(path: PathBuf, defaults: Option<PathBuf>, pretty: bool) -> Result<()> {
    let snap_path = path.join(SNAP_FILE);
    if snap_path.exists() {
        bail!("store already initialized at {}", snap_path.display());
    }

    let tree = load_defaults(defaults.as_ref())?;
    let opts = StoreOptions::from_env().with_pretty_json(pretty);
    let mut store = open_store(&path, tree, opts)?;

    if !store.flush() {
        bail!("failed to write initial snapshot at {}", snap_path.display());
    }

    info!(
        "initialized store at {} ({} top-level keys)",
        path.display(),
        store.snapshot_tree().len()
    );
    Ok(())
}
