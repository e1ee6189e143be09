use std::path::Path;

use log::{debug, info, warn};

use super::state::{CatalogState, Field, FormState, MediaFile, Message, QuestionType, MAX_MEDIA_BYTES};
use crate::api::{ApiError, CreatedQuestion, QuestionPayload};
use crate::catalog::Catalog;
use crate::draft::{Draft, DraftStore};
use crate::status::StatusReport;

const CATALOG_LOAD_FAILED: &str = "Failed to load categories. Please restart the application.";
const FILE_TOO_LARGE: &str = "File size must be less than 10MB";
const SUBMIT_REJECTED: &str = "Failed to create question";
const SUBMIT_FAILED: &str = "Failed to create question. Please try again.";

/// User intents produced by the input layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    FocusNext,
    FocusPrev,
    Insert(char),
    Backspace,
    CycleNext,
    CyclePrev,
    /// Enter on the focused field.
    Activate,
    RemoveFile,
    Submit,
    Quit,
}

/// Work the app loop must carry out on the controller's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Submit(QuestionPayload),
    Quit,
}

/// Applies events to [`FormState`]; never touches the terminal.
pub struct FormController {
    state: FormState,
    drafts: DraftStore,
    /// Slot contents read at startup, held until the catalog result arrives.
    pending_draft: Option<Draft>,
    draft_restored: bool,
}

impl FormController {
    pub fn new(drafts: DraftStore) -> Self {
        let pending_draft = drafts.restore();
        Self {
            state: FormState::default(),
            drafts,
            pending_draft,
            draft_restored: false,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn apply_status(&mut self, report: StatusReport) {
        if report.status != self.state.status.status {
            info!("API status: {}", report.label);
        }
        self.state.status = report;
    }

    /// Installs the catalog load result, then restores any saved draft on top of it.
    pub fn apply_catalog(&mut self, result: Result<Catalog, ApiError>) {
        match result {
            Ok(catalog) => {
                self.state.catalog = CatalogState::Ready(catalog);
            }
            Err(e) => {
                warn!("Catalog unavailable: {}", e);
                self.state.catalog = CatalogState::Failed;
                self.show_error(CATALOG_LOAD_FAILED);
            }
        }

        if !self.draft_restored {
            self.draft_restored = true;
            match self.pending_draft.take() {
                Some(draft) => self.apply_draft(draft),
                // edits made while loading were held back from the slot
                None if self.snapshot() != Draft::default() => self.persist_draft(),
                None => {}
            }
        }
    }

    fn apply_draft(&mut self, draft: Draft) {
        info!("Restoring saved draft");
        self.state.question_text = draft.question_text;
        self.state.answer_text = draft.answer_text;
        self.state.question_type = draft.question_type.parse().ok();

        let category = Some(draft.category).filter(|c| {
            self.state
                .catalog
                .catalog()
                .map_or(false, |catalog| catalog.has_category(c))
        });
        self.state.category = category;
        self.state.subcategory = None;

        // the subcategory list above is derived from the category, so membership is checked against it
        if self.state.subcategory_options().contains(&draft.subcategory) {
            self.state.subcategory = Some(draft.subcategory);
        }

        if !self.state.media_visible() {
            self.clear_media();
        }
    }

    fn snapshot(&self) -> Draft {
        Draft {
            question_text: self.state.question_text.clone(),
            answer_text: self.state.answer_text.clone(),
            question_type: self
                .state
                .question_type
                .map(|t| t.as_str().to_string())
                .unwrap_or_default(),
            category: self.state.category.clone().unwrap_or_default(),
            subcategory: self.state.subcategory.clone().unwrap_or_default(),
        }
    }

    /// Writes the live form to the slot; a no-op until the saved draft has been restored.
    fn persist_draft(&mut self) {
        if !self.draft_restored {
            return;
        }
        let draft = self.snapshot();
        if let Err(e) = self.drafts.save(&draft) {
            warn!("Auto-save failed: {}", e);
        }
    }

    pub fn set_question_text(&mut self, text: impl Into<String>) {
        self.state.question_text = text.into();
        self.persist_draft();
    }

    pub fn set_answer_text(&mut self, text: impl Into<String>) {
        self.state.answer_text = text.into();
        self.persist_draft();
    }

    /// Changing to a non-media type hides the media section and drops the file.
    pub fn select_question_type(&mut self, question_type: Option<QuestionType>) {
        self.state.question_type = question_type;
        if !self.state.media_visible() {
            self.clear_media();
        }
        self.persist_draft();
    }

    /// Selects a category known to the catalog (or none); the subcategory is always reset.
    pub fn select_category(&mut self, category: Option<&str>) -> bool {
        if let Some(name) = category {
            let known = self
                .state
                .catalog
                .catalog()
                .map_or(false, |catalog| catalog.has_category(name));
            if !known {
                debug!("Ignoring unknown category {}", name);
                return false;
            }
        }

        self.state.category = category.map(str::to_string);
        self.state.subcategory = None;
        self.persist_draft();
        true
    }

    /// Selects a subcategory of the current category (or none).
    pub fn select_subcategory(&mut self, subcategory: Option<&str>) -> bool {
        if let Some(name) = subcategory {
            if !self.state.subcategory_options().iter().any(|s| s == name) {
                debug!("Ignoring subcategory {} outside current category", name);
                return false;
            }
        }

        self.state.subcategory = subcategory.map(str::to_string);
        self.persist_draft();
        true
    }

    /// Accepts `file` unless it exceeds the size cap, in which case the selection is cleared.
    pub fn select_file(&mut self, file: MediaFile) -> bool {
        if !self.state.media_visible() {
            return false;
        }
        if file.size > MAX_MEDIA_BYTES {
            warn!("Rejected {} ({} bytes)", file.name, file.size);
            self.show_error(FILE_TOO_LARGE);
            self.clear_media();
            return false;
        }

        debug!("Selected media file {} ({} bytes)", file.name, file.size);
        self.state.media = Some(file);
        self.state.media_path_input.clear();
        true
    }

    pub fn select_file_at(&mut self, path: &Path) -> bool {
        match std::fs::metadata(path) {
            Ok(meta) if meta.is_file() => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                self.select_file(MediaFile {
                    name,
                    size: meta.len(),
                })
            }
            Ok(_) => {
                self.show_error(format!("{} is not a file", path.display()));
                self.clear_media();
                false
            }
            Err(e) => {
                warn!("Cannot inspect {}: {}", path.display(), e);
                self.show_error(format!("Cannot open {}: {}", path.display(), e));
                self.clear_media();
                false
            }
        }
    }

    pub fn remove_file(&mut self) {
        self.clear_media();
    }

    fn clear_media(&mut self) {
        self.state.media = None;
        self.state.media_path_input.clear();
    }

    /// Starts a submission attempt.
    ///
    /// Returns the payload to send, or `None` when a submission is already in flight
    /// or a required field is missing.
    pub fn begin_submission(&mut self) -> Option<QuestionPayload> {
        if self.state.in_flight {
            debug!("Submission already in flight");
            return None;
        }
        self.state.message = Message::Hidden;

        let payload = self.build_payload();
        if let Some(problem) = payload.presence_error() {
            self.show_error(problem);
            return None;
        }

        self.state.in_flight = true;
        Some(payload)
    }

    fn build_payload(&self) -> QuestionPayload {
        let question_type = self
            .state
            .question_type
            .map(|t| t.as_str().to_string())
            .unwrap_or_default();
        let media_file_path = self
            .state
            .media
            .as_ref()
            .map(|file| format!("media/{}s/{}", question_type, file.name));

        QuestionPayload {
            question_text: self.state.question_text.clone(),
            answer_text: self.state.answer_text.clone(),
            question_type,
            category: self.state.category.clone().unwrap_or_default(),
            subcategory: self.state.subcategory.clone().unwrap_or_default(),
            media_file_path,
        }
    }

    pub fn finish_submission(&mut self, result: Result<CreatedQuestion, ApiError>) {
        self.state.in_flight = false;

        match result {
            Ok(created) => {
                if let Err(e) = self.drafts.clear() {
                    warn!("Failed to clear saved draft: {}", e);
                }
                self.reset_fields();
                self.show_success(format!("Question created successfully! ID: {}", created.id));
            }
            Err(e) => {
                warn!("Error creating question: {}", e);
                let message = match e {
                    ApiError::Rejected {
                        detail: Some(detail),
                        ..
                    } => detail,
                    ApiError::Rejected { detail: None, .. } => SUBMIT_REJECTED.to_string(),
                    _ => SUBMIT_FAILED.to_string(),
                };
                self.show_error(message);
            }
        }
    }

    fn reset_fields(&mut self) {
        self.state.question_text.clear();
        self.state.answer_text.clear();
        self.state.question_type = None;
        self.state.category = None;
        self.state.subcategory = None;
        self.clear_media();
        self.state.focus = Field::QuestionText;
    }

    fn show_success(&mut self, text: impl Into<String>) {
        self.state.message = Message::Success(text.into());
    }

    fn show_error(&mut self, text: impl Into<String>) {
        self.state.message = Message::Error(text.into());
    }

    pub fn focus_next(&mut self) {
        self.move_focus(1);
    }

    pub fn focus_prev(&mut self) {
        self.move_focus(Field::ORDER.len() - 1);
    }

    fn move_focus(&mut self, step: usize) {
        let len = Field::ORDER.len();
        let current = Field::ORDER
            .iter()
            .position(|f| *f == self.state.focus)
            .unwrap_or(0);

        let mut index = current;
        for _ in 0..len {
            index = (index + step) % len;
            if self.state.is_focusable(Field::ORDER[index]) {
                self.state.focus = Field::ORDER[index];
                return;
            }
        }
    }

    pub fn handle_intent(&mut self, intent: Intent) -> Option<Command> {
        match intent {
            Intent::Quit => return Some(Command::Quit),
            Intent::FocusNext => self.focus_next(),
            Intent::FocusPrev => self.focus_prev(),
            Intent::Insert(c) => self.insert_char(c),
            Intent::Backspace => self.delete_char(),
            Intent::CycleNext => self.cycle_selection(true),
            Intent::CyclePrev => self.cycle_selection(false),
            Intent::RemoveFile => {
                if self.state.focus == Field::MediaFile {
                    self.remove_file();
                }
            }
            Intent::Submit => return self.begin_submission().map(Command::Submit),
            Intent::Activate => match self.state.focus {
                Field::Submit => return self.begin_submission().map(Command::Submit),
                Field::MediaFile => {
                    let typed = self.state.media_path_input.trim().to_string();
                    if !typed.is_empty() {
                        self.select_file_at(Path::new(&typed));
                    }
                }
                _ => self.focus_next(),
            },
        }
        None
    }

    fn insert_char(&mut self, c: char) {
        match self.state.focus {
            Field::QuestionText => {
                let mut text = self.state.question_text.clone();
                text.push(c);
                self.set_question_text(text);
            }
            Field::AnswerText => {
                let mut text = self.state.answer_text.clone();
                text.push(c);
                self.set_answer_text(text);
            }
            Field::MediaFile => self.state.media_path_input.push(c),
            _ => {}
        }
    }

    fn delete_char(&mut self) {
        match self.state.focus {
            Field::QuestionText => {
                let mut text = self.state.question_text.clone();
                text.pop();
                self.set_question_text(text);
            }
            Field::AnswerText => {
                let mut text = self.state.answer_text.clone();
                text.pop();
                self.set_answer_text(text);
            }
            Field::MediaFile => {
                self.state.media_path_input.pop();
            }
            _ => {}
        }
    }

    fn cycle_selection(&mut self, forward: bool) {
        match self.state.focus {
            Field::QuestionType => {
                let options: Vec<Option<QuestionType>> = std::iter::once(None)
                    .chain(QuestionType::ALL.into_iter().map(Some))
                    .collect();
                let next = cycle(&options, &self.state.question_type, forward);
                self.select_question_type(next);
            }
            Field::Category => {
                let Some(catalog) = self.state.catalog.catalog() else {
                    return;
                };
                let options: Vec<Option<String>> = std::iter::once(None)
                    .chain(catalog.categories().map(|c| Some(c.to_string())))
                    .collect();
                let next = cycle(&options, &self.state.category, forward);
                self.select_category(next.as_deref());
            }
            Field::Subcategory => {
                let options: Vec<Option<String>> = std::iter::once(None)
                    .chain(self.state.subcategory_options().iter().cloned().map(Some))
                    .collect();
                let next = cycle(&options, &self.state.subcategory, forward);
                self.select_subcategory(next.as_deref());
            }
            _ => {}
        }
    }
}

/// Neighbour of `current` in `options`, wrapping at both ends.
fn cycle<T: PartialEq + Clone>(options: &[T], current: &T, forward: bool) -> T {
    let len = options.len();
    let index = options.iter().position(|o| o == current).unwrap_or(0);
    let next = if forward {
        (index + 1) % len
    } else {
        (index + len - 1) % len
    };
    options[next].clone()
}
