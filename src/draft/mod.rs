pub mod storage;

pub use storage::{FileStorage, MemoryStorage, Storage};

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Slot name of the single persisted draft.
pub const DRAFT_KEY: &str = "quiz_form_draft";

#[derive(Error, Debug)]
pub enum DraftError {
    #[error("Draft storage failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Draft encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// In-progress form values. Unset fields are empty strings.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Draft {
    pub question_text: String,
    pub answer_text: String,
    pub question_type: String,
    pub category: String,
    pub subcategory: String,
}

pub struct DraftStore {
    storage: Box<dyn Storage>,
    key: String,
}

impl DraftStore {
    pub fn new(storage: impl Storage + 'static) -> Self {
        Self::with_key(storage, DRAFT_KEY)
    }

    pub fn with_key(storage: impl Storage + 'static, key: &str) -> Self {
        Self {
            storage: Box::new(storage),
            key: key.to_string(),
        }
    }

    /// Overwrites the slot with `draft`.
    pub fn save(&mut self, draft: &Draft) -> Result<(), DraftError> {
        let json = serde_json::to_string(draft)?;
        self.storage.set(&self.key, &json)?;
        Ok(())
    }

    /// Reads the slot; anything unreadable counts as no draft.
    pub fn restore(&self) -> Option<Draft> {
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("Error reading saved draft: {}", e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(draft) => {
                debug!("Restored draft from slot {}", self.key);
                Some(draft)
            }
            Err(e) => {
                warn!("Error restoring auto-save: {}", e);
                None
            }
        }
    }

    pub fn clear(&mut self) -> Result<(), DraftError> {
        self.storage.remove(&self.key)?;
        Ok(())
    }
}
