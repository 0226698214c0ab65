use anyhow::{bail, Result};
use std::path::PathBuf;

use CanopyCfg::{StoreOptions, Tree};

use crate::util::open_store;

pub fn exec(path: PathBuf, key: String) -> Result<()> {
    let store = open_store(&path, Tree::new(), StoreOptions::from_env())?;
    match store.get(&key)? {
        // bare leaves print without JSON quoting; lists/nodes as JSON
        Some(value) => {
            match value.as_leaf() {
                Some(scalar) => println!("{}", scalar),
                None => println!("{}", serde_json::to_string(value)?),
            }
            Ok(())
        }
        None => bail!("not found: {}", key),
    }
}
