use std::fs;
use std::io::Write;
use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::model::keymap::Keymap;

/// Error type for persisting the keymap
#[derive(Debug, thiserror::Error)]
pub enum KeymapError {
    #[error("could not serialize keymap: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("could not write keymap: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not replace keymap file: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// On-disk shape: a flat list of `[[binding]]` tables
#[derive(Debug, Default, Serialize, Deserialize)]
struct KeymapFile {
    #[serde(default)]
    binding: Vec<BindingEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
struct BindingEntry {
    context: String,
    key: String,
    action: String,
}

impl Keymap {
    /// Load persisted bindings.
    ///
    /// A missing file yields an empty keymap. A corrupted file is backed up
    /// as `.bak` and an empty keymap is returned.
    pub fn load(path: &Path) -> Keymap {
        let mut keymap = Keymap::new();
        if !path.exists() {
            return keymap;
        }
        let file = match fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<KeymapFile>(&content) {
                Ok(file) => file,
                Err(e) => {
                    let bak = path.with_extension("bak");
                    let _ = fs::copy(path, &bak);
                    warn!(
                        "could not parse {} (backed up as {}): {}",
                        path.display(),
                        bak.display(),
                        e
                    );
                    return keymap;
                }
            },
            Err(e) => {
                warn!("could not read {}: {}", path.display(), e);
                return keymap;
            }
        };

        for entry in &file.binding {
            let mut chars = entry.key.chars();
            match (chars.next(), chars.next()) {
                (Some(key), None) => {
                    keymap.restore(&entry.context, key, &entry.action);
                }
                _ => warn!("skipping binding with key {:?}", entry.key),
            }
        }
        info!("loaded {} bindings from {}", file.binding.len(), path.display());
        keymap
    }

    /// Overwrite `path` with the current bindings (atomic replace)
    pub fn save(&self, path: &Path) -> Result<(), KeymapError> {
        let file = KeymapFile {
            binding: self
                .entries()
                .map(|(context, key, action)| BindingEntry {
                    context: context.to_string(),
                    key: key.to_string(),
                    action: action.to_string(),
                })
                .collect(),
        };
        let content = toml::to_string_pretty(&file)?;

        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.persist(path)?;
        info!("saved {} bindings to {}", file.binding.len(), path.display());
        Ok(())
    }
}
