use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use chrono::{DateTime, Datelike, Local};
use moodnotes_core::MoodNote;

use crate::model::form::NoteFormPage;

mod pages;

/// A page and the data it displays
pub enum Page<'a> {
    Home(&'a [MoodNote]),
    NoteForm(&'a NoteFormPage),
    /// Generic page for the status only, no internal detail
    Error,
}

pub fn render(status: StatusCode, page: Page<'_>) -> Response {
    let (title, body) = match page {
        Page::Home(notes) => ("My Mood Notes".to_string(), pages::home(notes)),
        Page::NoteForm(form) => (pages::note_form_title(form), pages::note_form(form)),
        Page::Error => {
            let reason = status.canonical_reason().unwrap_or("Error");
            (reason.to_string(), pages::error(status, reason))
        }
    };

    (status, Html(layout(&title, &body))).into_response()
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title} - Mood Notes</title>
<link rel="stylesheet" href="/static/css/main.css">
</head>
<body>
<header><h1><a href="/">Mood Notes</a></h1>
<nav><a href="/">Home</a> <a href="/note/new">New note</a></nav>
</header>
<main>
{body}
</main>
<footer>Mood Notes &copy; {year}</footer>
</body>
</html>
"#,
        title = escape(title),
        body = body,
        year = Local::now().year(),
    )
}

/// Escape text for use in element content and quoted attribute values
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Millisecond timestamp as local time, e.g. "Monday, Jan 02, 2006 at 03:04 PM"
pub fn human_date(millis: i64) -> String {
    match DateTime::from_timestamp_millis(millis) {
        Some(utc) => utc
            .with_timezone(&Local)
            .format("%A, %b %d, %Y at %I:%M %p")
            .to_string(),
        None => String::new(),
    }
}
