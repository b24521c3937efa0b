use moodnotes_core::{MoodNote, NoteDraft, Validator};
use schemars::JsonSchema;
use serde::Deserialize;

use crate::errors::{RestError, RestResult};

pub const CONFLICT_FIELD: &str = "_conflict";
pub const CONFLICT_MESSAGE: &str = "Edit Conflict: This note was updated by someone else. \
     Please review the changes and try submitting again.";

/// Fields posted by the create form
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct CreateNoteForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// Fields posted by the edit form. `version` stays raw text until
/// [`EditNoteForm::version`] parses it.
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct EditNoteForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub version: String,
}

impl From<CreateNoteForm> for NoteDraft {
    fn from(form: CreateNoteForm) -> Self {
        NoteDraft::new(form.title, form.content)
    }
}

impl EditNoteForm {
    pub fn version(&self) -> RestResult<i64> {
        self.version
            .parse::<i64>()
            .map_err(|_| RestError::BadRequest)
    }

    pub fn draft(&self) -> NoteDraft {
        NoteDraft::new(self.title.clone(), self.content.clone())
    }
}

/// `{id}` path segment, parsed by hand so bad ids become 404 rather than 400
#[derive(Debug, Deserialize, JsonSchema)]
pub struct NoteIdPath {
    pub id: String,
}

impl NoteIdPath {
    pub fn parse(&self) -> RestResult<i64> {
        match self.id.parse::<i64>() {
            Ok(id) if id >= 1 => Ok(id),
            _ => Err(RestError::NotFound),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: i64, version: i64 },
}

/// Everything the note form page shows. Validation results travel next to
/// the submitted values rather than inside them.
#[derive(Debug, Clone)]
pub struct NoteFormPage {
    pub mode: FormMode,
    pub draft: NoteDraft,
    pub errors: Validator,
    /// Stored note, shown when editing or after a conflict
    pub current: Option<MoodNote>,
}

impl NoteFormPage {
    pub fn create(draft: NoteDraft, errors: Validator) -> Self {
        NoteFormPage {
            mode: FormMode::Create,
            draft,
            errors,
            current: None,
        }
    }

    pub fn edit(note: MoodNote) -> Self {
        NoteFormPage {
            mode: FormMode::Edit {
                id: note.id,
                version: note.version,
            },
            draft: NoteDraft::from(&note),
            errors: Validator::new(),
            current: Some(note),
        }
    }

    pub fn edit_invalid(id: i64, version: i64, draft: NoteDraft, errors: Validator) -> Self {
        NoteFormPage {
            mode: FormMode::Edit { id, version },
            draft,
            errors,
            current: None,
        }
    }

    /// Keep the user's attempted values, adopt the stored version so the
    /// next submit can succeed
    pub fn conflict(draft: NoteDraft, current: MoodNote) -> Self {
        let mut errors = Validator::new();
        errors.add_error(CONFLICT_FIELD, CONFLICT_MESSAGE);

        NoteFormPage {
            mode: FormMode::Edit {
                id: current.id,
                version: current.version,
            },
            draft,
            errors,
            current: Some(current),
        }
    }
}
