use aide::{
    axum::{
        routing::{get_with, post_with},
        ApiRouter, IntoApiResponse,
    },
    transform::TransformOperation,
};
use axum::{
    extract::{
        rejection::{FormRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use moodnotes_core::{apply_edit, validate_note, EditOutcome, NoteDraft, NoteUpdate};
use tracing::{debug, info};

use crate::{
    db::run_store,
    errors::{RestError, RestResult},
    model::form::{CreateNoteForm, EditNoteForm, NoteFormPage, NoteIdPath},
    render::{render, Page},
    state::AppState,
};

/// Home page, all notes newest first
async fn home(State(state): State<AppState>) -> impl IntoApiResponse {
    respond(list_notes(&state).await)
}

async fn list_notes(state: &AppState) -> RestResult<Response> {
    let notes = run_store(&state.store, |store| store.get_all()).await?;

    Ok(render(StatusCode::OK, Page::Home(&notes)))
}

fn home_docs(op: TransformOperation) -> TransformOperation {
    op.summary("List notes")
        .description("HTML page listing every mood note, newest first")
        .tag("Notes")
}

async fn show_create_form() -> impl IntoApiResponse {
    let page = NoteFormPage::create(NoteDraft::default(), Default::default());
    render(StatusCode::OK, Page::NoteForm(&page))
}

fn show_create_form_docs(op: TransformOperation) -> TransformOperation {
    op.summary("New note form").tag("Notes")
}

async fn create_note(
    State(state): State<AppState>,
    form: Result<Form<CreateNoteForm>, FormRejection>,
) -> impl IntoApiResponse {
    respond(insert_note(&state, form).await)
}

async fn insert_note(
    state: &AppState,
    form: Result<Form<CreateNoteForm>, FormRejection>,
) -> RestResult<Response> {
    let draft = NoteDraft::from(form_body(form)?);

    let errors = validate_note(&draft);
    if !errors.is_valid() {
        debug!(?errors, "Rejected new note");
        let page = NoteFormPage::create(draft, errors);
        return Ok(render(StatusCode::UNPROCESSABLE_ENTITY, Page::NoteForm(&page)));
    }

    let note = run_store(&state.store, move |store| store.insert(&draft)).await?;
    info!(id = note.id, "Created mood note");

    Ok(Redirect::to("/").into_response())
}

fn create_note_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Create note")
        .description("Validate and store a new note, then redirect home. Invalid input re-renders the form with 422.")
        .tag("Notes")
}

async fn show_edit_form(
    State(state): State<AppState>,
    path: Result<Path<NoteIdPath>, PathRejection>,
) -> impl IntoApiResponse {
    respond(load_edit_form(&state, path).await)
}

async fn load_edit_form(
    state: &AppState,
    path: Result<Path<NoteIdPath>, PathRejection>,
) -> RestResult<Response> {
    let id = note_id(path)?;
    let note = run_store(&state.store, move |store| store.get(id)).await?;

    let page = NoteFormPage::edit(note);
    Ok(render(StatusCode::OK, Page::NoteForm(&page)))
}

fn show_edit_form_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Edit note form")
        .description("Form prefilled with the stored note and its version")
        .tag("Notes")
}

async fn update_note(
    State(state): State<AppState>,
    path: Result<Path<NoteIdPath>, PathRejection>,
    form: Result<Form<EditNoteForm>, FormRejection>,
) -> impl IntoApiResponse {
    respond(edit_note(&state, path, form).await)
}

async fn edit_note(
    state: &AppState,
    path: Result<Path<NoteIdPath>, PathRejection>,
    form: Result<Form<EditNoteForm>, FormRejection>,
) -> RestResult<Response> {
    let id = note_id(path)?;
    let form = form_body(form)?;
    let version = form.version()?;
    let draft = form.draft();

    let errors = validate_note(&draft);
    if !errors.is_valid() {
        debug!(id, ?errors, "Rejected note edit");
        let page = NoteFormPage::edit_invalid(id, version, draft, errors);
        return Ok(render(StatusCode::UNPROCESSABLE_ENTITY, Page::NoteForm(&page)));
    }

    let update = NoteUpdate {
        id,
        draft: draft.clone(),
        version,
    };
    let outcome = run_store(&state.store, move |store| apply_edit(store, &update)).await?;

    match outcome {
        EditOutcome::Updated(note) => {
            info!(id, version = note.version, "Updated mood note");
            Ok(Redirect::to("/").into_response())
        }
        EditOutcome::Deleted => Err(RestError::NotFound),
        EditOutcome::Conflict { current } => {
            info!(
                id,
                submitted = version,
                current = current.version,
                "Edit conflict"
            );
            let page = NoteFormPage::conflict(draft, current);
            Ok(render(StatusCode::CONFLICT, Page::NoteForm(&page)))
        }
    }
}

fn update_note_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Update note")
        .description(
            "Version-checked edit. 400 on a malformed version, 422 on invalid fields, \
             404 if the note is gone, 409 with the stored note if someone saved first.",
        )
        .tag("Notes")
}

async fn delete_note(
    State(state): State<AppState>,
    path: Result<Path<NoteIdPath>, PathRejection>,
) -> impl IntoApiResponse {
    respond(remove_note(&state, path).await)
}

async fn remove_note(
    state: &AppState,
    path: Result<Path<NoteIdPath>, PathRejection>,
) -> RestResult<Response> {
    let id = note_id(path)?;
    run_store(&state.store, move |store| store.delete(id)).await?;
    info!(id, "Deleted mood note");

    Ok(Redirect::to("/").into_response())
}

fn delete_note_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Delete note").tag("Notes")
}

/// Any id the router cannot decode is as missing as one that parses to nothing
fn note_id(path: Result<Path<NoteIdPath>, PathRejection>) -> RestResult<i64> {
    match path {
        Ok(Path(path)) => path.parse(),
        Err(rejection) => {
            debug!(%rejection, "Rejected note id");
            Err(RestError::NotFound)
        }
    }
}

fn form_body<T>(form: Result<Form<T>, FormRejection>) -> RestResult<T> {
    match form {
        Ok(Form(body)) => Ok(body),
        Err(rejection) => {
            debug!(%rejection, "Rejected form body");
            Err(RestError::BadRequest)
        }
    }
}

fn respond(result: RestResult<Response>) -> Response {
    match result {
        Ok(response) => response,
        Err(e) => e.into_response(),
    }
}

pub fn note_routes() -> ApiRouter<AppState> {
    ApiRouter::new()
        .api_route("/", get_with(home, home_docs))
        .api_route(
            "/note/new",
            get_with(show_create_form, show_create_form_docs)
                .post_with(create_note, create_note_docs),
        )
        .api_route(
            "/note/edit/:id",
            get_with(show_edit_form, show_edit_form_docs).post_with(update_note, update_note_docs),
        )
        .api_route("/note/delete/:id", post_with(delete_note, delete_note_docs))
}
