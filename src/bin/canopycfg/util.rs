use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use CanopyCfg::{FileSnapshot, Store, StoreOptions, Tree};

/// Load a defaults tree from a JSON file, or an empty tree.
pub fn load_defaults(file: Option<&PathBuf>) -> Result<Tree> {
    match file {
        Some(p) => {
            let text = fs::read_to_string(p)
                .with_context(|| format!("read defaults {}", p.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parse defaults {}", p.display()))
        }
        None => Ok(Tree::new()),
    }
}

/// Open a file-backed store at `root`.
pub fn open_store(root: &Path, defaults: Tree, opts: StoreOptions) -> Result<Store> {
    let snap = FileSnapshot::open_with_config(root, &opts)?;
    let store = Store::builder()
        .defaults(defaults)
        .persistence(Box::new(snap))
        .options(opts)
        .open()?;
    Ok(store)
}
