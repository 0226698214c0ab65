use anyhow::Result;
use log::info;
use std::path::PathBuf;

use CanopyCfg::{StoreOptions, Tree, Value};

use crate::util::open_store;

pub fn exec(path: PathBuf, key: String, value: String) -> Result<()> {
    // JSON first; a bare word that isn't valid JSON becomes a string,
    // so `--value admin` and `--value '"admin"'` are equivalent.
    let value: Value = match serde_json::from_str(&value) {
        Ok(v) => v,
        Err(_) => Value::from(value.as_str()),
    };

    let mut store = open_store(&path, Tree::new(), StoreOptions::from_env())?;
    store.stage_set(&key, value)?;
    store.commit()?;
    info!("committed {} (rev {})", key, store.revision());
    Ok(())
}
