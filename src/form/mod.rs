pub mod controller;
pub mod state;

pub use controller::{Command, FormController, Intent};
pub use state::{CatalogState, Field, FormState, MediaFile, Message, QuestionType, MAX_MEDIA_BYTES};
