//! Pure projection of [`FormState`] into what the screen displays.

use crate::form::{CatalogState, Field, FormState, Message, QuestionType};
use crate::status::ConnectionStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Neutral,
    Good,
    Bad,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectView {
    pub enabled: bool,
    pub placeholder: &'static str,
    pub options: Vec<String>,
    pub selected: Option<String>,
}

impl SelectView {
    /// Text shown in the closed selector.
    pub fn display(&self) -> &str {
        self.selected.as_deref().unwrap_or(self.placeholder)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaView {
    pub accept: &'static str,
    pub hint: &'static str,
    pub file_name: Option<String>,
    pub path_input: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitView {
    pub label: &'static str,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub status_label: &'static str,
    pub status_tone: StatusTone,
    pub checked_at: Option<String>,
    pub question_text: String,
    pub answer_text: String,
    pub question_type: SelectView,
    pub category: SelectView,
    pub subcategory: SelectView,
    pub media: Option<MediaView>,
    pub submit: SubmitView,
    pub message: Message,
    pub focus: Field,
}

impl FormView {
    pub fn project(state: &FormState) -> Self {
        let status_tone = match state.status.status {
            ConnectionStatus::Unknown => StatusTone::Neutral,
            ConnectionStatus::Connected => StatusTone::Good,
            ConnectionStatus::Error => StatusTone::Bad,
        };

        let question_type = SelectView {
            enabled: true,
            placeholder: "Select a type...",
            options: QuestionType::ALL
                .iter()
                .map(|t| t.display_name().to_string())
                .collect(),
            selected: state.question_type.map(|t| t.display_name().to_string()),
        };

        let category = match &state.catalog {
            CatalogState::Loading => SelectView {
                enabled: false,
                placeholder: "Loading categories...",
                options: Vec::new(),
                selected: None,
            },
            CatalogState::Failed => SelectView {
                enabled: false,
                placeholder: "Error loading categories",
                options: Vec::new(),
                selected: None,
            },
            CatalogState::Ready(catalog) => SelectView {
                enabled: state.category_enabled(),
                placeholder: "Select a category...",
                options: catalog.categories().map(str::to_string).collect(),
                selected: state.category.clone(),
            },
        };

        let subcategory = if state.subcategory_enabled() {
            SelectView {
                enabled: true,
                placeholder: "Select a subcategory...",
                options: state.subcategory_options().to_vec(),
                selected: state.subcategory.clone(),
            }
        } else {
            SelectView {
                enabled: false,
                placeholder: "Select a category first...",
                options: Vec::new(),
                selected: None,
            }
        };

        let media = state
            .question_type
            .filter(|_| state.media_visible())
            .and_then(|t| {
                Some(MediaView {
                    accept: t.accept_filter()?,
                    hint: t.file_hint()?,
                    file_name: state.media.as_ref().map(|m| m.name.clone()),
                    path_input: state.media_path_input.clone(),
                })
            });

        let submit = if state.in_flight {
            SubmitView {
                label: "Submitting...",
                enabled: false,
            }
        } else {
            SubmitView {
                label: "Submit Question",
                enabled: true,
            }
        };

        Self {
            status_label: state.status.label,
            status_tone,
            checked_at: state
                .status
                .checked_at
                .map(|t| t.format("%H:%M:%S UTC").to_string()),
            question_text: state.question_text.clone(),
            answer_text: state.answer_text.clone(),
            question_type,
            category,
            subcategory,
            media,
            submit,
            message: state.message.clone(),
            focus: state.focus,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::form::MediaFile;
    use crate::status::StatusReport;

    fn ready_state() -> FormState {
        let catalog: Catalog = vec![
            ("Science".to_string(), vec!["Physics".to_string(), "Chemistry".to_string()]),
            ("History".to_string(), vec!["Ancient".to_string(), "Modern".to_string()]),
        ]
        .into_iter()
        .collect();
        FormState {
            catalog: CatalogState::Ready(catalog),
            ..FormState::default()
        }
    }

    #[test]
    fn test_subcategory_projection_follows_category() {
        let mut state = ready_state();
        let view = FormView::project(&state);
        assert!(!view.subcategory.enabled);
        assert_eq!(view.subcategory.display(), "Select a category first...");
        assert_eq!(view.category.options, ["Science", "History"]);

        state.category = Some("History".to_string());
        let view = FormView::project(&state);
        assert!(view.subcategory.enabled);
        assert_eq!(view.subcategory.options, ["Ancient", "Modern"]);
        assert_eq!(view.subcategory.display(), "Select a subcategory...");
    }

    #[test]
    fn test_media_section_per_type() {
        let mut state = ready_state();
        let cases = [
            (QuestionType::Image, "image/*", "PNG, JPG, GIF up to 10MB"),
            (QuestionType::Video, "video/*", "MP4, WebM, AVI up to 10MB"),
            (QuestionType::Audio, "audio/*", "MP3, WAV, OGG up to 10MB"),
        ];
        for (question_type, accept, hint) in cases {
            state.question_type = Some(question_type);
            let media = FormView::project(&state).media.unwrap();
            assert_eq!(media.accept, accept);
            assert_eq!(media.hint, hint);
        }

        state.question_type = Some(QuestionType::Text);
        assert_eq!(FormView::project(&state).media, None);
        state.question_type = None;
        assert_eq!(FormView::project(&state).media, None);
    }

    #[test]
    fn test_selected_file_name_displayed() {
        let mut state = ready_state();
        state.question_type = Some(QuestionType::Image);
        state.media = Some(MediaFile {
            name: "atom.png".to_string(),
            size: 10,
        });
        let media = FormView::project(&state).media.unwrap();
        assert_eq!(media.file_name.as_deref(), Some("atom.png"));
    }

    #[test]
    fn test_submit_button_while_in_flight() {
        let mut state = ready_state();
        assert_eq!(
            FormView::project(&state).submit,
            SubmitView {
                label: "Submit Question",
                enabled: true,
            }
        );
        state.in_flight = true;
        assert_eq!(
            FormView::project(&state).submit,
            SubmitView {
                label: "Submitting...",
                enabled: false,
            }
        );
    }

    #[test]
    fn test_category_placeholders_while_loading_and_after_failure() {
        let mut state = FormState::default();
        assert_eq!(FormView::project(&state).category.display(), "Loading categories...");
        state.catalog = CatalogState::Failed;
        let view = FormView::project(&state);
        assert!(!view.category.enabled);
        assert_eq!(view.category.display(), "Error loading categories");
    }

    #[test]
    fn test_status_tone() {
        let mut state = ready_state();
        assert_eq!(FormView::project(&state).status_tone, StatusTone::Neutral);
        assert_eq!(FormView::project(&state).checked_at, None);

        state.status = StatusReport {
            status: ConnectionStatus::Connected,
            label: "API Connected",
            checked_at: Some(chrono::Utc::now()),
        };
        let view = FormView::project(&state);
        assert_eq!(view.status_tone, StatusTone::Good);
        assert_eq!(view.status_label, "API Connected");
        assert!(view.checked_at.is_some());
    }
}
