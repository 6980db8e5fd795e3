// Asset management system
//
// Resolves shape names to their images and audio cue, and loads them as
// complete, immutable bundles.

mod handle;
mod loader;
mod registry;

pub use handle::{AssetId, AudioHandle, ImageHandle};
pub use loader::FileStore;
pub use registry::{decode_image, AssetRegistry, InvalidShapeName, ShapeBundle, ShapeName};

#[cfg(test)]
pub(crate) use loader::MemoryStore;
#[cfg(test)]
pub(crate) use registry::test_support as registry_test_support;

/// Failures reading from a resource store (absence is not an error)
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let err = StoreError::Read {
            path: "images/test.png".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "Failed to read images/test.png: denied");
    }
}
