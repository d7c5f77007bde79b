use crate::models::{Language, Post};
use crate::types::{Token, TokenDocument};
use crate::Error;
use regex::Regex;
use std::sync::LazyLock;

static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:https?://|www\.)\S+").expect("URL pattern is valid")
});

static HANDLE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@\w+").expect("handle pattern is valid"));

static RETWEET_MARKER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bRT\b:?").expect("retweet marker pattern is valid"));

const TATWEEL: char = '\u{0640}';

/// Tokenizer for post text.
///
/// Cleans the text (HTML entities, URLs, user handles, retweet markers), normalizes it
/// for the configured language and then returns every match of the token pattern.
#[derive(Debug, Clone)]
pub struct PostTokenizer {
    token_regex: Regex,
    language: Language,
}

impl PostTokenizer {
    /// # Errors
    ///
    /// Returns `Error::InvalidTokenPattern` if `token_pattern` doesn't compile.
    pub fn new(token_pattern: &str, language: Language) -> Result<Self, Error> {
        let token_regex = Regex::new(token_pattern)?;

        Ok(Self {
            token_regex,
            language,
        })
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn token_pattern(&self) -> &str {
        self.token_regex.as_str()
    }

    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        let text = unescape_html_entities(text);
        let text = URL_REGEX.replace_all(&text, " ");
        let text = HANDLE_REGEX.replace_all(&text, " ");
        let text = RETWEET_MARKER_REGEX.replace_all(&text, " ");

        let normalized = match self.language {
            Language::En => text.to_lowercase(),
            Language::Ar => normalize_arabic(&text).to_lowercase(),
        };

        self.token_regex
            .find_iter(&normalized)
            .map(|token| token.as_str().to_string())
            .collect()
    }

    /// Tokenizes `text` and joins the tokens with single spaces.
    pub fn tokenize_to_document(&self, text: &str) -> TokenDocument {
        self.tokenize(text).join(" ")
    }

    pub fn tokenize_post(&self, post: &Post) -> TokenDocument {
        self.tokenize_to_document(&post.text_content())
    }
}

/// Twitter escapes these entities in post text.
fn unescape_html_entities(text: &str) -> String {
    // `&amp;` goes last so that `&amp;lt;` becomes `&lt;` and not `<`
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

fn is_arabic_diacritic(c: char) -> bool {
    matches!(c, '\u{064B}'..='\u{0652}' | '\u{0670}')
}

/// Strips diacritics and tatweel, and folds the alef variants into a bare alef.
fn normalize_arabic(text: &str) -> String {
    text.chars()
        .filter(|&c| !is_arabic_diacritic(c) && c != TATWEEL)
        .map(|c| match c {
            'أ' | 'إ' | 'آ' | 'ٱ' => 'ا',
            other => other,
        })
        .collect()
}
