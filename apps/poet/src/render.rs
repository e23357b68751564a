//! Plain-text rendering of a mode's search state.

use std::fmt::Write as _;

use client_core::{SearchPhase, SearchState};
use shared::domain::{Poem, PoemQuery, SearchMode};

pub fn render_state(mode: SearchMode, state: &SearchState, full: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "[{mode}] {}", describe_query(state.last_query()));

    if state.phase() == SearchPhase::Idle {
        out.push_str("  (no search yet)\n");
        return out;
    }
    if state.is_loading() {
        out.push_str("  searching...\n");
        return out;
    }

    for poem in state.results() {
        render_poem(&mut out, poem, full);
    }
    if let Some(message) = state.error_message() {
        let _ = writeln!(out, "  ! {message}");
    }
    out
}

fn render_poem(out: &mut String, poem: &Poem, full: bool) {
    let _ = writeln!(
        out,
        "  {} by {} ({} lines)",
        poem.title,
        poem.author,
        poem.line_count()
    );
    if full {
        for line in &poem.lines {
            let _ = writeln!(out, "      {line}");
        }
    }
}

fn describe_query(query: Option<&PoemQuery>) -> String {
    match query {
        None => String::new(),
        Some(PoemQuery::ByAuthor { author }) => format!("author \"{author}\""),
        Some(PoemQuery::ByTitle { title }) => format!("title \"{title}\""),
        Some(PoemQuery::ByAuthorAndTitle { author, title }) => {
            format!("author \"{author}\", title \"{title}\"")
        }
    }
}
