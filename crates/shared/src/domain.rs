use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A single poem as returned by the poetry API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poem {
    pub title: String,
    pub author: String,
    pub lines: Vec<String>,
}

impl Poem {
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    ByAuthor,
    ByTitle,
    ByAuthorAndTitle,
}

impl SearchMode {
    pub const ALL: [SearchMode; 3] = [
        SearchMode::ByAuthor,
        SearchMode::ByTitle,
        SearchMode::ByAuthorAndTitle,
    ];

    pub fn index(self) -> usize {
        match self {
            SearchMode::ByAuthor => 0,
            SearchMode::ByTitle => 1,
            SearchMode::ByAuthorAndTitle => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SearchMode::ByAuthor => "by author",
            SearchMode::ByTitle => "by title",
            SearchMode::ByAuthorAndTitle => "by author and title",
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The inputs of one search, tagged by mode.
///
/// Inputs are kept exactly as entered; only [`PoemQuery::validate`] looks at
/// them with whitespace trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PoemQuery {
    ByAuthor { author: String },
    ByTitle { title: String },
    ByAuthorAndTitle { author: String, title: String },
}

impl PoemQuery {
    pub fn by_author(author: impl Into<String>) -> Self {
        Self::ByAuthor {
            author: author.into(),
        }
    }

    pub fn by_title(title: impl Into<String>) -> Self {
        Self::ByTitle {
            title: title.into(),
        }
    }

    pub fn by_author_and_title(author: impl Into<String>, title: impl Into<String>) -> Self {
        Self::ByAuthorAndTitle {
            author: author.into(),
            title: title.into(),
        }
    }

    pub fn mode(&self) -> SearchMode {
        match self {
            PoemQuery::ByAuthor { .. } => SearchMode::ByAuthor,
            PoemQuery::ByTitle { .. } => SearchMode::ByTitle,
            PoemQuery::ByAuthorAndTitle { .. } => SearchMode::ByAuthorAndTitle,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            PoemQuery::ByAuthor { author } if is_blank(author) => {
                Err(ValidationError::MissingAuthor)
            }
            PoemQuery::ByTitle { title } if is_blank(title) => Err(ValidationError::MissingTitle),
            PoemQuery::ByAuthorAndTitle { author, title }
                if is_blank(author) || is_blank(title) =>
            {
                Err(ValidationError::MissingAuthorOrTitle)
            }
            _ => Ok(()),
        }
    }

    /// Path of the endpoint serving this query, with the raw inputs interpolated.
    pub fn endpoint_path(&self) -> String {
        match self {
            PoemQuery::ByAuthor { author } => format!("/author/{author}"),
            PoemQuery::ByTitle { title } => format!("/title/{title}"),
            PoemQuery::ByAuthorAndTitle { author, title } => {
                format!("/author,title/{author};{title}")
            }
        }
    }

    /// Message shown next to an empty result set.
    pub fn not_found_message(&self) -> String {
        match self {
            PoemQuery::ByAuthor { author } => format!("No poems found for author: \"{author}\""),
            PoemQuery::ByTitle { title } => format!("No poems found with title: \"{title}\""),
            PoemQuery::ByAuthorAndTitle { author, title } => {
                format!("No poems found by \"{author}\" with title \"{title}\"")
            }
        }
    }

    /// Message carried by a response that was not a list of poems.
    pub fn malformed_response_message(&self) -> String {
        match self {
            PoemQuery::ByAuthor { author } => format!("No poems found for author: {author}"),
            PoemQuery::ByTitle { title } => format!("No poems found with title: {title}"),
            PoemQuery::ByAuthorAndTitle { author, title } => {
                format!("No poems found by author \"{author}\" with title \"{title}\"")
            }
        }
    }
}

fn is_blank(input: &str) -> bool {
    input.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_inputs_fail_with_mode_specific_error() {
        assert_eq!(
            PoemQuery::by_author("").validate(),
            Err(ValidationError::MissingAuthor)
        );
        assert_eq!(
            PoemQuery::by_title("  \t").validate(),
            Err(ValidationError::MissingTitle)
        );
        assert_eq!(
            PoemQuery::by_author_and_title("Keats", " ").validate(),
            Err(ValidationError::MissingAuthorOrTitle)
        );
        assert_eq!(
            PoemQuery::by_author_and_title("", "Ode").validate(),
            Err(ValidationError::MissingAuthorOrTitle)
        );
        assert!(PoemQuery::by_author_and_title("Keats", "Ode").validate().is_ok());
    }

    #[test]
    fn endpoint_paths_interpolate_raw_inputs() {
        assert_eq!(
            PoemQuery::by_author("John Masefield").endpoint_path(),
            "/author/John Masefield"
        );
        assert_eq!(PoemQuery::by_title("Ozymandias").endpoint_path(), "/title/Ozymandias");
        assert_eq!(
            PoemQuery::by_author_and_title("Shelley", "Ozymandias").endpoint_path(),
            "/author,title/Shelley;Ozymandias"
        );
    }

    #[test]
    fn not_found_messages_quote_inputs() {
        assert_eq!(
            PoemQuery::by_title("Nonexistent Poem Xyz").not_found_message(),
            "No poems found with title: \"Nonexistent Poem Xyz\""
        );
        assert_eq!(
            PoemQuery::by_author_and_title("X", "Y").not_found_message(),
            "No poems found by \"X\" with title \"Y\""
        );
    }

    #[test]
    fn poem_ignores_extra_fields() {
        let poem: Poem = serde_json::from_str(
            r#"{"title":"Sea Fever","author":"John Masefield","lines":["I must go down..."],"linecount":"1"}"#,
        )
        .expect("poem");
        assert_eq!(poem.line_count(), 1);
        assert_eq!(poem.author, "John Masefield");
    }
}
