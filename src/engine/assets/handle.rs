// Type-safe asset handle system

use std::fmt;
use std::sync::Arc;

/// Unique identifier for an asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssetId(u64);

impl AssetId {
    /// Create a new asset ID from a string path
    pub fn from_path(path: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        path.hash(&mut hasher);
        Self(hasher.finish())
    }
}

/// Shared, immutable handle to a loaded asset
///
/// Cloning a handle shares the decoded asset; the `id` stays stable for the
/// path the asset was loaded from, so GPU-side caches can key on it.
pub struct AssetHandle<T> {
    id: AssetId,
    path: Arc<str>,
    asset: Arc<T>,
}

impl<T> AssetHandle<T> {
    /// Wrap a decoded asset loaded from `path`
    pub fn new(path: &str, asset: T) -> Self {
        Self {
            id: AssetId::from_path(path),
            path: Arc::from(path),
            asset: Arc::new(asset),
        }
    }

    /// Get the underlying asset ID
    pub fn id(&self) -> AssetId {
        self.id
    }

    /// Path the asset was loaded from
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Borrow the decoded asset
    pub fn get(&self) -> &T {
        &self.asset
    }
}

impl<T> Clone for AssetHandle<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            path: Arc::clone(&self.path),
            asset: Arc::clone(&self.asset),
        }
    }
}

impl<T> PartialEq for AssetHandle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> fmt::Debug for AssetHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssetHandle")
            .field("id", &self.id)
            .field("path", &self.path)
            .finish()
    }
}

/// Decoded RGBA image ready for upload
pub type ImageHandle = AssetHandle<image::RgbaImage>;

/// Decoded audio cue
pub type AudioHandle = AssetHandle<crate::engine::audio::AudioCue>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_id_from_path() {
        let id1 = AssetId::from_path("images/triangle.png");
        let id2 = AssetId::from_path("images/triangle.png");
        let id3 = AssetId::from_path("images/empty_triangle.png");

        assert_eq!(id1, id2, "Same paths should produce same IDs");
        assert_ne!(id1, id3, "Different paths should produce different IDs");
    }

    #[test]
    fn test_handle_clone_shares_asset() {
        let handle = AssetHandle::new("images/square.png", vec![1u8, 2, 3]);
        let copy = handle.clone();

        assert_eq!(handle, copy);
        assert!(std::ptr::eq(handle.get(), copy.get()));
        assert_eq!(copy.path(), "images/square.png");
    }

    #[test]
    fn test_handle_equality_follows_path() {
        let a = AssetHandle::new("images/circle.png", 1u8);
        let b = AssetHandle::new("images/circle.png", 2u8);
        let c = AssetHandle::new("images/oval.png", 1u8);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.id(), b.id());
    }
}
