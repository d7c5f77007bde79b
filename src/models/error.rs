use std::fmt;

#[derive(Debug)]
pub enum Error {
    ParserError(String),
    InvalidTokenPattern(String),
    /// Counting produced no features (no tokens, no posts, or everything pruned).
    EmptyVocabulary(String),
    NotFitted(String),
    NoPostsToScale(String),
    IoError(std::io::Error),
    JsonError(serde_json::Error),
    CsvError(csv::Error),
    Other(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ParserError(msg) => write!(f, "Parser Error: {}", msg),
            Error::InvalidTokenPattern(msg) => write!(f, "Invalid Token Pattern: {}", msg),
            Error::EmptyVocabulary(msg) => write!(f, "Empty Vocabulary: {}", msg),
            Error::NotFitted(msg) => write!(f, "Vectorizer Not Fitted: {}", msg),
            Error::NoPostsToScale(msg) => write!(f, "No Posts To Scale By: {}", msg),
            Error::IoError(err) => write!(f, "IO Error: {}", err),
            Error::JsonError(err) => write!(f, "JSON Error: {}", err),
            Error::CsvError(err) => write!(f, "CSV Error: {}", err),
            Error::Other(msg) => write!(f, "Other Error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::IoError(err) => Some(err),
            Error::JsonError(err) => Some(err),
            Error::CsvError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<String> for Error {
    fn from(msg: String) -> Error {
        Error::ParserError(msg)
    }
}

impl From<&str> for Error {
    fn from(msg: &str) -> Error {
        Error::ParserError(msg.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Error {
        Error::IoError(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Error {
        Error::JsonError(err)
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Error {
        Error::CsvError(err)
    }
}

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Error {
        Error::InvalidTokenPattern(err.to_string())
    }
}

impl From<rayon::ThreadPoolBuildError> for Error {
    fn from(err: rayon::ThreadPoolBuildError) -> Error {
        Error::Other(err.to_string())
    }
}
