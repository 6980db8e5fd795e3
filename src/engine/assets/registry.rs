// Shape asset registry: name -> complete bundle, or an attributable failure

use super::loader::{Resource, ResourceCategory, ResourceStore};
use super::{AudioHandle, ImageHandle};
use crate::engine::audio::AudioCue;
use log::debug;
use std::fmt;

/// Non-empty logical shape name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShapeName(String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Shape name must not be empty")]
pub struct InvalidShapeName;

impl ShapeName {
    pub fn new(name: impl Into<String>) -> Result<Self, InvalidShapeName> {
        let name = name.into();
        if name.is_empty() {
            return Err(InvalidShapeName);
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShapeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One matchable shape with all three of its resources loaded
///
/// Only [`AssetRegistry::load_shape`] builds these, so a bundle in hand is
/// always complete.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeBundle {
    name: ShapeName,
    filled: ImageHandle,
    outline: ImageHandle,
    audio: AudioHandle,
}

impl ShapeBundle {
    /// Display label, and the equality key for matching
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Colored drop-target image
    pub fn filled_image(&self) -> &ImageHandle {
        &self.filled
    }

    /// Draggable outline image
    pub fn outline_image(&self) -> &ImageHandle {
        &self.outline
    }

    /// Cue announcing the shape name
    pub fn audio(&self) -> &AudioHandle {
        &self.audio
    }
}

/// Why a shape could not be loaded
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    #[error("Missing filled image for '{name}': {path}")]
    MissingFilledImage { name: String, path: String },

    #[error("Missing outline image for '{name}': {path}")]
    MissingOutlineImage { name: String, path: String },

    #[error("Missing audio for '{name}': {path}")]
    MissingAudio { name: String, path: String },

    #[error("Failed to decode {path} for '{name}': {reason}")]
    DecodeFailure {
        name: String,
        path: String,
        reason: String,
    },
}

impl LoadError {
    fn missing(category: ResourceCategory, name: &str, path: String) -> Self {
        let name = name.to_string();
        match category {
            ResourceCategory::FilledImage => Self::MissingFilledImage { name, path },
            ResourceCategory::OutlineImage => Self::MissingOutlineImage { name, path },
            ResourceCategory::Audio => Self::MissingAudio { name, path },
        }
    }

    /// Shape the failure belongs to
    pub fn name(&self) -> &str {
        match self {
            Self::MissingFilledImage { name, .. }
            | Self::MissingOutlineImage { name, .. }
            | Self::MissingAudio { name, .. }
            | Self::DecodeFailure { name, .. } => name,
        }
    }

    /// Resource path that was attempted
    pub fn path(&self) -> &str {
        match self {
            Self::MissingFilledImage { path, .. }
            | Self::MissingOutlineImage { path, .. }
            | Self::MissingAudio { path, .. }
            | Self::DecodeFailure { path, .. } => path,
        }
    }
}

/// Decode image bytes into RGBA
pub fn decode_image(bytes: &[u8]) -> Result<image::RgbaImage, image::ImageError> {
    Ok(image::load_from_memory(bytes)?.to_rgba8())
}

/// Loads shape bundles from a resource store
pub struct AssetRegistry<S> {
    store: S,
}

impl<S: ResourceStore> AssetRegistry<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load all three resources for one shape
    ///
    /// Presence of every resource is checked before anything is decoded, so a
    /// missing file is reported as missing even when another one is corrupt.
    pub fn load_shape(&self, name: &ShapeName) -> Result<ShapeBundle, LoadError> {
        let filled = self.require(ResourceCategory::FilledImage, name)?;
        let outline = self.require(ResourceCategory::OutlineImage, name)?;
        let audio = self.require(ResourceCategory::Audio, name)?;

        let filled = Self::image(name, filled)?;
        let outline = Self::image(name, outline)?;
        let cue = AudioCue::decode(&audio.bytes).map_err(|e| LoadError::DecodeFailure {
            name: name.to_string(),
            path: audio.path.clone(),
            reason: e.to_string(),
        })?;

        debug!(
            "Loaded shape '{}' ({} / {} / {})",
            name,
            filled.path(),
            outline.path(),
            audio.path
        );

        Ok(ShapeBundle {
            name: name.clone(),
            filled,
            outline,
            audio: AudioHandle::new(&audio.path, cue),
        })
    }

    /// Load every shape in order; the first failure aborts the whole list
    pub fn load_all(&self, names: &[ShapeName]) -> Result<Vec<ShapeBundle>, LoadError> {
        names.iter().map(|name| self.load_shape(name)).collect()
    }

    fn require(&self, category: ResourceCategory, name: &ShapeName) -> Result<Resource, LoadError> {
        let key = category.key_for(name.as_str());
        match self.store.fetch(category, &key) {
            Ok(Some(resource)) => Ok(resource),
            Ok(None) => Err(LoadError::missing(
                category,
                name.as_str(),
                self.store.locate(category, &key),
            )),
            Err(e) => Err(LoadError::DecodeFailure {
                name: name.to_string(),
                path: self.store.locate(category, &key),
                reason: e.to_string(),
            }),
        }
    }

    fn image(name: &ShapeName, resource: Resource) -> Result<ImageHandle, LoadError> {
        let decoded = decode_image(&resource.bytes).map_err(|e| LoadError::DecodeFailure {
            name: name.to_string(),
            path: resource.path.clone(),
            reason: e.to_string(),
        })?;
        Ok(ImageHandle::new(&resource.path, decoded))
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::engine::assets::{MemoryStore, StoreError};

    fn name(s: &str) -> ShapeName {
        ShapeName::new(s).unwrap()
    }

    #[test]
    fn test_shape_name_rejects_empty() {
        assert_eq!(ShapeName::new(""), Err(InvalidShapeName));
        assert_eq!(name("triangle").as_str(), "triangle");
    }

    #[test]
    fn test_load_shape_complete_bundle() {
        let registry = AssetRegistry::new(store_with(&["triangle"]));
        let bundle = registry.load_shape(&name("triangle")).unwrap();

        assert_eq!(bundle.name(), "triangle");
        assert_eq!(bundle.filled_image().get().dimensions(), (4, 4));
        assert_eq!(bundle.outline_image().path(), "memory://images/empty_triangle");
        assert_eq!(bundle.audio().path(), "memory://sounds/triangle");
    }

    #[test]
    fn test_missing_filled_image() {
        let mut store = store_with(&[]);
        store.insert(ResourceCategory::OutlineImage, "empty_star", png_bytes(2, 2));
        store.insert(ResourceCategory::Audio, "star", mp3_bytes());

        let err = AssetRegistry::new(store).load_shape(&name("star")).unwrap_err();
        assert_eq!(
            err,
            LoadError::MissingFilledImage {
                name: "star".to_string(),
                path: "memory://images/star".to_string(),
            }
        );
    }

    #[test]
    fn test_missing_outline_image() {
        let mut store = store_with(&[]);
        store.insert(ResourceCategory::FilledImage, "star", png_bytes(2, 2));
        store.insert(ResourceCategory::Audio, "star", mp3_bytes());

        let err = AssetRegistry::new(store).load_shape(&name("star")).unwrap_err();
        assert!(matches!(err, LoadError::MissingOutlineImage { .. }));
        assert_eq!(err.path(), "memory://images/empty_star");
    }

    #[test]
    fn test_missing_audio() {
        let mut store = store_with(&[]);
        store.insert(ResourceCategory::FilledImage, "star", png_bytes(2, 2));
        store.insert(ResourceCategory::OutlineImage, "empty_star", png_bytes(2, 2));

        let err = AssetRegistry::new(store).load_shape(&name("star")).unwrap_err();
        assert!(matches!(err, LoadError::MissingAudio { .. }));
        assert_eq!(err.name(), "star");
    }

    #[test]
    fn test_missing_reported_before_decode() {
        let mut store = store_with(&[]);
        store.insert(ResourceCategory::FilledImage, "star", b"not an image".to_vec());
        store.insert(ResourceCategory::OutlineImage, "empty_star", png_bytes(2, 2));

        let err = AssetRegistry::new(store).load_shape(&name("star")).unwrap_err();
        assert!(matches!(err, LoadError::MissingAudio { .. }));
    }

    #[test]
    fn test_corrupt_image_is_decode_failure() {
        let mut store = store_with(&["star"]);
        store.insert(ResourceCategory::OutlineImage, "empty_star", b"garbage".to_vec());

        let err = AssetRegistry::new(store).load_shape(&name("star")).unwrap_err();
        match err {
            LoadError::DecodeFailure { name, path, .. } => {
                assert_eq!(name, "star");
                assert_eq!(path, "memory://images/empty_star");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_corrupt_audio_is_decode_failure() {
        let mut store = store_with(&["star"]);
        store.insert(ResourceCategory::Audio, "star", b"????".to_vec());

        let err = AssetRegistry::new(store).load_shape(&name("star")).unwrap_err();
        assert!(matches!(err, LoadError::DecodeFailure { .. }));
        assert_eq!(err.path(), "memory://sounds/star");
    }

    /// Store that serves images but cannot read the sounds directory
    struct UnreadableAudioStore(MemoryStore);

    impl ResourceStore for UnreadableAudioStore {
        fn fetch(
            &self,
            category: ResourceCategory,
            key: &str,
        ) -> Result<Option<Resource>, StoreError> {
            if category == ResourceCategory::Audio {
                return Err(StoreError::Read {
                    path: self.locate(category, key),
                    source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
                });
            }
            self.0.fetch(category, key)
        }

        fn locate(&self, category: ResourceCategory, key: &str) -> String {
            format!("locked/{}/{}.mp3", category.default_directory(), key)
        }
    }

    #[test]
    fn test_store_read_failure_is_decode_failure() {
        let registry = AssetRegistry::new(UnreadableAudioStore(store_with(&["star"])));
        let err = registry.load_shape(&name("star")).unwrap_err();

        match err {
            LoadError::DecodeFailure { name, path, reason } => {
                assert_eq!(name, "star");
                assert_eq!(path, "locked/sounds/star.mp3");
                assert!(reason.contains("denied"), "reason was {reason}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_load_all_in_order() {
        let bundles = bundles(&["triangle", "square", "circle"]);
        let names: Vec<&str> = bundles.iter().map(|b| b.name()).collect();
        assert_eq!(names, vec!["triangle", "square", "circle"]);
    }

    #[test]
    fn test_load_all_is_all_or_nothing() {
        let registry = AssetRegistry::new(store_with(&["triangle"]));
        let result = registry.load_all(&[name("triangle"), name("missingshape")]);

        let err = result.unwrap_err();
        assert!(matches!(err, LoadError::MissingFilledImage { .. }));
        assert_eq!(err.name(), "missingshape");
    }

    #[test]
    fn test_load_error_display_names_resource() {
        let err = LoadError::MissingAudio {
            name: "oval".to_string(),
            path: "assets/sounds/oval.mp3".to_string(),
        };
        assert_eq!(err.to_string(), "Missing audio for 'oval': assets/sounds/oval.mp3");
    }
}
