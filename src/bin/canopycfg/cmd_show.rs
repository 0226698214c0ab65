use anyhow::Result;
use std::path::PathBuf;

use CanopyCfg::{StoreOptions, Tree};

use crate::util::open_store;

pub fn exec(path: PathBuf, pretty: bool) -> Result<()> {
    let store = open_store(&path, Tree::new(), StoreOptions::from_env())?;
    let tree = store.snapshot_tree();
    let out = if pretty {
        serde_json::to_string_pretty(tree)?
    } else {
        serde_json::to_string(tree)?
    };
    println!("{}", out);
    Ok(())
}
