//! Lightbox gallery and navigation
use thiserror::Error;

/// Immutable list of navigable image sources, built once from the product image
/// containers on the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Gallery {
    sources: Vec<String>,
    /// Gallery index for each container, `None` when the container has no image
    containers: Vec<Option<usize>>,
}

impl Gallery {
    /// Build a gallery from one entry per image container, in page order.
    pub fn from_sources<I>(containers: I) -> Self
    where
        I: IntoIterator<Item = Option<String>>,
    {
        let mut sources = Vec::new();
        let containers = containers
            .into_iter()
            .map(|src| {
                src.filter(|s| !s.is_empty()).map(|s| {
                    sources.push(s);
                    sources.len() - 1
                })
            })
            .collect();
        Self {
            sources,
            containers,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    #[must_use]
    pub fn source(&self, index: usize) -> Option<&str> {
        self.sources.get(index).map(String::as_str)
    }

    /// Gallery index of the image inside container `container`.
    #[must_use]
    pub fn index_for_container(&self, container: usize) -> Option<usize> {
        self.containers.get(container).copied().flatten()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GalleryError {
    #[error("gallery has no images")]
    Empty,
    #[error("image index {index} out of range (gallery has {len})")]
    OutOfRange { index: usize, len: usize },
}

/// Keys the lightbox reacts to while open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxKey {
    Escape,
    ArrowLeft,
    ArrowRight,
    Other,
}

impl LightboxKey {
    /// Map a `KeyboardEvent.key` value.
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        match key {
            "Escape" | "Esc" => Self::Escape,
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxAction {
    Close,
    Prev,
    Next,
    Ignore,
}

/// Current position within a [`Gallery`] and whether the lightbox shows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lightbox {
    gallery: Gallery,
    current: usize,
    open: bool,
}

impl Lightbox {
    #[must_use]
    pub const fn new(gallery: Gallery) -> Self {
        Self {
            gallery,
            current: 0,
            open: false,
        }
    }

    #[must_use]
    pub const fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    #[must_use]
    pub const fn current(&self) -> usize {
        self.current
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub fn current_source(&self) -> Option<&str> {
        self.gallery.source(self.current)
    }

    /// Show image `index` and mark the lightbox open.
    ///
    /// # Errors
    ///
    /// Returns an error if the gallery is empty or `index` is out of range.
    pub fn open(&mut self, index: usize) -> Result<&str, GalleryError> {
        let len = self.gallery.len();
        if len == 0 {
            return Err(GalleryError::Empty);
        }
        if index >= len {
            return Err(GalleryError::OutOfRange { index, len });
        }
        self.current = index;
        self.open = true;
        Ok(&self.gallery.sources[index])
    }

    pub const fn close(&mut self) {
        self.open = false;
    }

    /// Advance one image, wrapping to the first. `None` while closed.
    pub fn next(&mut self) -> Option<&str> {
        self.step(1)
    }

    /// Go back one image, wrapping to the last. `None` while closed.
    pub fn prev(&mut self) -> Option<&str> {
        let len = self.gallery.len();
        self.step(len.saturating_sub(1))
    }

    fn step(&mut self, forward: usize) -> Option<&str> {
        let len = self.gallery.len();
        if !self.open || len == 0 {
            return None;
        }
        self.current = (self.current + forward) % len;
        self.gallery.source(self.current)
    }

    /// Decide what a key press does. Every key is ignored while closed.
    #[must_use]
    pub const fn handle_key(&self, key: LightboxKey) -> LightboxAction {
        if !self.open {
            return LightboxAction::Ignore;
        }
        match key {
            LightboxKey::Escape => LightboxAction::Close,
            LightboxKey::ArrowLeft => LightboxAction::Prev,
            LightboxKey::ArrowRight => LightboxAction::Next,
            LightboxKey::Other => LightboxAction::Ignore,
        }
    }

    /// Swap in a freshly built gallery, keeping the position when it still exists.
    pub fn rebuild(&mut self, gallery: Gallery) {
        self.gallery = gallery;
        if self.current >= self.gallery.len() {
            self.current = 0;
        }
        if self.gallery.is_empty() {
            self.open = false;
        }
    }
}
