// Resource stores: where asset bytes come from

use super::StoreError;
use std::path::{Path, PathBuf};

/// The three resource kinds every shape needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceCategory {
    /// Colored image, used as the drop target
    FilledImage,
    /// Outline image, used as the drag source
    OutlineImage,
    /// Spoken cue announcing the shape name
    Audio,
}

impl ResourceCategory {
    /// Get the default directory for this category
    pub fn default_directory(&self) -> &'static str {
        match self {
            ResourceCategory::FilledImage | ResourceCategory::OutlineImage => "images",
            ResourceCategory::Audio => "sounds",
        }
    }

    /// Get supported file extensions for this category, in probe order
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            ResourceCategory::FilledImage | ResourceCategory::OutlineImage => {
                &["png", "jpg", "jpeg"]
            }
            ResourceCategory::Audio => &["mp3", "wav", "ogg"],
        }
    }

    /// Derive the lookup key for a shape name
    pub fn key_for(&self, name: &str) -> String {
        match self {
            ResourceCategory::OutlineImage => format!("empty_{name}"),
            ResourceCategory::FilledImage | ResourceCategory::Audio => name.to_string(),
        }
    }
}

/// Raw bytes of a located resource
#[derive(Debug, Clone)]
pub struct Resource {
    pub path: String,
    pub bytes: Vec<u8>,
}

/// Anything that can hand out resource bytes by category and key
pub trait ResourceStore {
    /// Fetch a resource; `Ok(None)` means it does not exist
    fn fetch(&self, category: ResourceCategory, key: &str) -> Result<Option<Resource>, StoreError>;

    /// The path reported when a resource cannot be found
    fn locate(&self, category: ResourceCategory, key: &str) -> String;
}

/// Store backed by a directory tree on disk
///
/// Layout: `{root}/images/{key}.png` and `{root}/sounds/{key}.mp3`, with the
/// other listed extensions probed in order.
pub struct FileStore {
    base_path: PathBuf,
}

impl FileStore {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Every candidate path for a key, in probe order
    pub fn candidates(&self, category: ResourceCategory, key: &str) -> Vec<PathBuf> {
        let dir = self.base_path.join(category.default_directory());
        category
            .extensions()
            .iter()
            .map(|ext| dir.join(format!("{key}.{ext}")))
            .collect()
    }

    /// Read an arbitrary image by key, outside any shape bundle
    pub fn fetch_image(&self, key: &str) -> Result<Option<Resource>, StoreError> {
        self.fetch(ResourceCategory::FilledImage, key)
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl ResourceStore for FileStore {
    fn fetch(&self, category: ResourceCategory, key: &str) -> Result<Option<Resource>, StoreError> {
        for path in self.candidates(category, key) {
            if !path.is_file() {
                continue;
            }
            let bytes = std::fs::read(&path).map_err(|source| StoreError::Read {
                path: path.to_string_lossy().to_string(),
                source,
            })?;
            return Ok(Some(Resource {
                path: path.to_string_lossy().to_string(),
                bytes,
            }));
        }
        Ok(None)
    }

    fn locate(&self, category: ResourceCategory, key: &str) -> String {
        self.candidates(category, key)
            .first()
            .map(|p| p.to_string_lossy().to_string())
            .unwrap_or_else(|| key.to_string())
    }
}

/// In-memory store, keyed by `(category, key)`
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: std::collections::HashMap<(ResourceCategory, String), Vec<u8>>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, category: ResourceCategory, key: impl Into<String>, bytes: Vec<u8>) {
        self.entries.insert((category, key.into()), bytes);
    }
}

#[cfg(test)]
impl ResourceStore for MemoryStore {
    fn fetch(&self, category: ResourceCategory, key: &str) -> Result<Option<Resource>, StoreError> {
        Ok(self
            .entries
            .get(&(category, key.to_string()))
            .map(|bytes| Resource {
                path: self.locate(category, key),
                bytes: bytes.clone(),
            }))
    }

    fn locate(&self, category: ResourceCategory, key: &str) -> String {
        format!("memory://{}/{}", category.default_directory(), key)
    }
}
