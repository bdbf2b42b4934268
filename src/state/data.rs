/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the media loader, the composer and the UI layer.
use iced::widget::image::Handle;
use std::fmt;
use std::path::PathBuf;
use uuid::Uuid;

use super::list::Keyed;

/// Identifier of a committed panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PanelId(Uuid);

impl PanelId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "panel-{}", self.0)
    }
}

/// Identifier of an image waiting in the staging list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StagedId(Uuid);

impl StagedId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for StagedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "staged-{}", self.0)
    }
}

/// A decoded image file picked by the user
#[derive(Debug, Clone)]
pub struct SourceImage {
    /// Full path of the selected file
    pub path: PathBuf,
    /// File name only (e.g., "page_01.png")
    pub name: String,
    pub width: u32,
    pub height: u32,
    /// Full-size image, built from the file's encoded bytes
    pub handle: Handle,
}

/// Represents an image selected but not yet committed as a panel
///
/// Dropping it releases both image handles it holds.
#[derive(Debug, Clone)]
pub struct StagedImage {
    pub id: StagedId,
    pub source: SourceImage,
    /// Thumbnail derived from `source`
    pub preview: Handle,
}

impl StagedImage {
    pub fn new(source: SourceImage, preview: Handle) -> Self {
        Self {
            id: StagedId::new(),
            source,
            preview,
        }
    }
}

impl Keyed for StagedImage {
    type Key = StagedId;

    fn key(&self) -> StagedId {
        self.id
    }
}

/// A committed unit of the comic: an image plus its caption
#[derive(Debug, Clone)]
pub struct Panel {
    pub id: PanelId,
    pub image: Handle,
    /// Dialogue text, empty when the panel has none
    pub caption: String,
    /// Name of the file the panel was created from
    pub label: String,
}

impl Panel {
    /// Turn a staged image into a panel, taking over its full-size image
    pub fn from_staged(staged: StagedImage, caption: String) -> Self {
        Self {
            id: PanelId::new(),
            image: staged.source.handle,
            caption,
            label: staged.source.name,
        }
    }

    pub fn has_caption(&self) -> bool {
        !self.caption.is_empty()
    }
}

impl Keyed for Panel {
    type Key = PanelId;

    fn key(&self) -> PanelId {
        self.id
    }
}
