use std::path::PathBuf;

const MIN_KEYWORD_CHARS: usize = 4;
const MAX_SECTIONS: usize = 3;
const MAX_RESULT_CHARS: usize = 1500;

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Unavailable,
    NotFound,
    Found(String),
}

impl std::fmt::Display for SearchOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchOutcome::Unavailable => write!(
                f,
                "Hmm, the knowledge base is not available right now. Please try again later."
            ),
            SearchOutcome::NotFound => write!(
                f,
                "Hmm, I don't see this information specific to our salon. Would you like to book a consultation instead?"
            ),
            SearchOutcome::Found(text) => f.write_str(text),
        }
    }
}

/// Plain-text knowledge document, re-read on every search.
pub struct KnowledgeBase {
    path: PathBuf,
}

impl KnowledgeBase {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub async fn search(&self, query: &str) -> SearchOutcome {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "knowledge base unavailable");
                return SearchOutcome::Unavailable;
            }
        };

        let outcome = search_text(&content, query);
        tracing::debug!(
            query,
            found = matches!(outcome, SearchOutcome::Found(_)),
            "knowledge base search"
        );
        outcome
    }
}

/// Blank-line delimited sections of a document.
pub fn split_sections(content: &str) -> Vec<&str> {
    content.split("\n\n").collect()
}

/// Number of query keywords (four characters or longer) contained in `section`.
/// Both sides are expected lower-cased.
fn score_section(section: &str, keywords: &[&str]) -> usize {
    keywords
        .iter()
        .filter(|k| k.chars().count() >= MIN_KEYWORD_CHARS && section.contains(*k))
        .count()
}

pub fn search_text(content: &str, query: &str) -> SearchOutcome {
    let content = content.replace("\r\n", "\n");
    let query = query.to_lowercase();
    let keywords: Vec<&str> = query.split_whitespace().collect();

    let mut matches: Vec<(&str, usize)> = split_sections(&content)
        .into_iter()
        .filter_map(|section| {
            let score = score_section(&section.to_lowercase(), &keywords);
            (score > 0).then_some((section, score))
        })
        .collect();

    if matches.is_empty() {
        return SearchOutcome::NotFound;
    }

    // sort_by is stable, so equal scores keep document order
    matches.sort_by(|a, b| b.1.cmp(&a.1));

    let joined = matches
        .iter()
        .take(MAX_SECTIONS)
        .map(|(section, _)| *section)
        .collect::<Vec<_>>()
        .join("\n\n");

    SearchOutcome::Found(truncate(joined))
}

fn truncate(text: String) -> String {
    match text.char_indices().nth(MAX_RESULT_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text,
    }
}
