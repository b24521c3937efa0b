use std::fmt::Write;

use axum::http::StatusCode;
use moodnotes_core::MoodNote;

use super::{escape, human_date};
use crate::model::form::{FormMode, NoteFormPage, CONFLICT_FIELD};

pub fn home(notes: &[MoodNote]) -> String {
    if notes.is_empty() {
        return r#"<h2>Latest notes</h2>
<p>No mood notes yet. <a href="/note/new">Write the first one.</a></p>"#
            .to_string();
    }

    let mut out = String::from("<h2>Latest notes</h2>\n<ul class=\"notes\">\n");
    for note in notes {
        let _ = write!(
            out,
            r#"<li class="note">
<h3>{title}</h3>
<p>{content}</p>
<small>Created {created} &middot; Updated {updated} &middot; v{version}</small>
<a href="/note/edit/{id}">Edit</a>
<form method="post" action="/note/delete/{id}"><button type="submit">Delete</button></form>
</li>
"#,
            id = note.id,
            title = escape(&note.title),
            content = escape(&note.content),
            created = human_date(note.created_at),
            updated = human_date(note.updated_at),
            version = note.version,
        );
    }
    out.push_str("</ul>");
    out
}

pub fn note_form_title(form: &NoteFormPage) -> String {
    match form.mode {
        FormMode::Create => "New note".to_string(),
        FormMode::Edit { .. } => "Edit note".to_string(),
    }
}

pub fn note_form(form: &NoteFormPage) -> String {
    let mut out = format!("<h2>{}</h2>\n", note_form_title(form));

    if let Some(message) = form.errors.error(CONFLICT_FIELD) {
        let _ = writeln!(out, r#"<div class="conflict">{}</div>"#, escape(message));
    }

    let (action, version_field) = match form.mode {
        FormMode::Create => ("/note/new".to_string(), String::new()),
        FormMode::Edit { id, version } => (
            format!("/note/edit/{}", id),
            format!(r#"<input type="hidden" name="version" value="{}">"#, version),
        ),
    };

    let _ = write!(
        out,
        r#"<form method="post" action="{action}">
{version_field}
<label for="title">Title</label>
{title_error}<input type="text" id="title" name="title" value="{title}">
<label for="content">Content</label>
{content_error}<textarea id="content" name="content">{content}</textarea>
<button type="submit">Save</button>
</form>
"#,
        title_error = field_error(form, "title"),
        title = escape(&form.draft.title),
        content_error = field_error(form, "content"),
        content = escape(&form.draft.content),
    );

    if let Some(current) = &form.current {
        let heading = if form.errors.error(CONFLICT_FIELD).is_some() {
            "Currently saved version"
        } else {
            "Saved note"
        };
        let _ = write!(
            out,
            r#"<section class="current">
<h3>{heading}</h3>
<h4>{title}</h4>
<p>{content}</p>
<small>Updated {updated} &middot; v{version}</small>
</section>
"#,
            title = escape(&current.title),
            content = escape(&current.content),
            updated = human_date(current.updated_at),
            version = current.version,
        );
    }

    out
}

fn field_error(form: &NoteFormPage, field: &str) -> String {
    form.errors
        .error(field)
        .map(|message| format!(r#"<span class="error">{}</span>"#, escape(message)))
        .unwrap_or_default()
}

pub fn error(status: StatusCode, reason: &str) -> String {
    format!(
        r#"<h2>{code} {reason}</h2>
<p><a href="/">Back to your notes</a></p>"#,
        code = status.as_u16(),
        reason = escape(reason),
    )
}
