use anyhow::Result;
use log::info;
use std::path::PathBuf;

use CanopyCfg::StoreOptions;

use crate::util::{load_defaults, open_store};

pub fn exec(path: PathBuf, defaults: Option<PathBuf>) -> Result<()> {
    let tree = load_defaults(defaults.as_ref())?;
    let mut store = open_store(&path, tree, StoreOptions::from_env())?;
    store.reset();
    info!("reset store at {} (rev {})", path.display(), store.revision());
    Ok(())
}
