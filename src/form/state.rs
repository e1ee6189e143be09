use std::fmt;
use std::str::FromStr;

use crate::catalog::Catalog;
use crate::status::StatusReport;

/// Largest media file accepted for selection.
pub const MAX_MEDIA_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionType {
    Text,
    Image,
    Video,
    Audio,
}

impl QuestionType {
    pub const ALL: [QuestionType; 4] = [
        QuestionType::Text,
        QuestionType::Image,
        QuestionType::Video,
        QuestionType::Audio,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::Text => "text",
            QuestionType::Image => "image",
            QuestionType::Video => "video",
            QuestionType::Audio => "audio",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            QuestionType::Text => "Text",
            QuestionType::Image => "Image",
            QuestionType::Video => "Video",
            QuestionType::Audio => "Audio",
        }
    }

    pub fn is_media(&self) -> bool {
        !matches!(self, QuestionType::Text)
    }

    /// MIME filter offered for media files of this type.
    pub fn accept_filter(&self) -> Option<&'static str> {
        match self {
            QuestionType::Text => None,
            QuestionType::Image => Some("image/*"),
            QuestionType::Video => Some("video/*"),
            QuestionType::Audio => Some("audio/*"),
        }
    }

    pub fn file_hint(&self) -> Option<&'static str> {
        match self {
            QuestionType::Text => None,
            QuestionType::Image => Some("PNG, JPG, GIF up to 10MB"),
            QuestionType::Video => Some("MP4, WebM, AVI up to 10MB"),
            QuestionType::Audio => Some("MP3, WAV, OGG up to 10MB"),
        }
    }
}

impl FromStr for QuestionType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|t| t.as_str() == s).ok_or(())
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A locally chosen file. Only its name ever leaves the machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    pub name: String,
    pub size: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Message {
    #[default]
    Hidden,
    Success(String),
    Error(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CatalogState {
    #[default]
    Loading,
    Ready(Catalog),
    Failed,
}

impl CatalogState {
    pub fn catalog(&self) -> Option<&Catalog> {
        match self {
            CatalogState::Ready(catalog) => Some(catalog),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    #[default]
    QuestionText,
    AnswerText,
    QuestionType,
    Category,
    Subcategory,
    MediaFile,
    Submit,
}

impl Field {
    pub const ORDER: [Field; 7] = [
        Field::QuestionText,
        Field::AnswerText,
        Field::QuestionType,
        Field::Category,
        Field::Subcategory,
        Field::MediaFile,
        Field::Submit,
    ];
}

/// Everything the form screen shows, owned by the controller.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    pub status: StatusReport,
    pub catalog: CatalogState,
    pub question_text: String,
    pub answer_text: String,
    pub question_type: Option<QuestionType>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub media: Option<MediaFile>,
    /// Path being typed into the media field, not yet selected.
    pub media_path_input: String,
    pub in_flight: bool,
    pub message: Message,
    pub focus: Field,
}

impl FormState {
    pub fn media_visible(&self) -> bool {
        self.question_type.map_or(false, |t| t.is_media())
    }

    /// Subcategories offered for the current category.
    pub fn subcategory_options(&self) -> &[String] {
        match (self.catalog.catalog(), self.category.as_deref()) {
            (Some(catalog), Some(category)) => catalog.subcategories_for(category),
            _ => &[],
        }
    }

    pub fn category_enabled(&self) -> bool {
        self.catalog.catalog().map_or(false, |c| !c.is_empty())
    }

    pub fn subcategory_enabled(&self) -> bool {
        !self.subcategory_options().is_empty()
    }

    /// Whether `field` can currently take focus.
    pub fn is_focusable(&self, field: Field) -> bool {
        match field {
            Field::Category => self.category_enabled(),
            Field::Subcategory => self.subcategory_enabled(),
            Field::MediaFile => self.media_visible(),
            Field::Submit => !self.in_flight,
            _ => true,
        }
    }
}
