//! Version timeline of the edited image.
//!
//! Versions are stored newest first. Committing while an older version is
//! selected drops everything newer than it, like undo followed by a new edit.

use chrono::{DateTime, Utc};
use image::DynamicImage;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VersionOrigin {
    /// Image loaded from disk
    Source,
    /// Result of a committed crop
    Crop,
}

impl std::fmt::Display for VersionOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Source => write!(f, "Source"),
            Self::Crop => write!(f, "Manual crop"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ImageVersion {
    pub id: Uuid,
    pub image: DynamicImage,
    pub origin: VersionOrigin,
    pub timestamp: DateTime<Utc>,
}

impl ImageVersion {
    pub fn new(image: DynamicImage, origin: VersionOrigin) -> Self {
        Self {
            id: Uuid::new_v4(),
            image,
            origin,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Default)]
pub struct VersionHistory {
    versions: Vec<ImageVersion>,
    current: usize,
    original: Option<DynamicImage>,
}

impl VersionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new timeline from a freshly loaded image.
    pub fn ingest(&mut self, image: DynamicImage) -> &ImageVersion {
        self.original = Some(image.clone());
        self.versions = vec![ImageVersion::new(image, VersionOrigin::Source)];
        self.current = 0;
        &self.versions[0]
    }

    /// Adds a version on top of the current one and selects it.
    pub fn push(&mut self, image: DynamicImage, origin: VersionOrigin) -> &ImageVersion {
        if self.versions.is_empty() {
            self.original = Some(image.clone());
        } else {
            self.versions.drain(..self.current);
        }
        self.versions.insert(0, ImageVersion::new(image, origin));
        self.current = 0;
        tracing::debug!(versions = self.versions.len(), %origin, "version added");
        &self.versions[0]
    }

    /// Selects the version at `index` (0 = newest). Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.versions.len() {
            self.current = index;
            true
        } else {
            false
        }
    }

    pub fn current(&self) -> Option<&ImageVersion> {
        self.versions.get(self.current)
    }

    pub fn current_index(&self) -> Option<usize> {
        (!self.versions.is_empty()).then_some(self.current)
    }

    /// The image the timeline started from.
    pub fn original(&self) -> Option<&DynamicImage> {
        self.original.as_ref()
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImageVersion> {
        self.versions.iter()
    }
}
