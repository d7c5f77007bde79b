use crate::Error;
use flate2::read::MultiGzDecoder;
use log::{debug, warn};
use serde::Deserialize;
use serde_json::Value;
use std::fs::File;
use std::io::{BufRead, BufReader, Read, Split};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ExtendedPost {
    #[serde(default)]
    pub full_text: Option<String>,
}

/// A social media post, as delivered by the Twitter APIs.
///
/// Only the fields used for counting are deserialized; everything else in the record is
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Post {
    pub text: Option<String>,
    pub full_text: Option<String>,
    pub extended_tweet: Option<ExtendedPost>,
    pub quoted_status: Option<Box<Post>>,
    pub retweeted_status: Option<Box<Post>>,
    /// Set by the upstream civil unrest classifier. Kept as a raw JSON value so that
    /// non-boolean values don't fail the whole record.
    pub civil_unrest_related: Option<Value>,
}

impl Post {
    /// The post's own text, preferring the untruncated variants.
    pub fn own_text(&self) -> &str {
        self.extended_tweet
            .as_ref()
            .and_then(|extended| extended.full_text.as_deref())
            .or(self.full_text.as_deref())
            .or(self.text.as_deref())
            .unwrap_or("")
    }

    /// Text used for counting.
    ///
    /// Retweets are replaced by the text of the original post (the top-level text is a
    /// truncated `RT @user: ...` copy of it). Quoted posts are appended.
    pub fn text_content(&self) -> String {
        let mut parts: Vec<&str> = Vec::with_capacity(2);

        match &self.retweeted_status {
            Some(retweeted) => parts.push(retweeted.own_text()),
            None => parts.push(self.own_text()),
        }

        if let Some(quoted) = &self.quoted_status {
            parts.push(quoted.own_text());
        }

        parts
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Only an explicit JSON `true` counts. Missing, `null` and non-boolean flags don't.
    pub fn is_civil_unrest_related(&self) -> bool {
        matches!(self.civil_unrest_related, Some(Value::Bool(true)))
    }
}

/// Reads posts from a newline-delimited JSON file, gzip-compressed when the file name
/// ends in `.gz`.
pub struct PostReader {
    path: PathBuf,
}

impl PostReader {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Opens the file and returns an iterator over its posts.
    ///
    /// # Errors
    ///
    /// Returns an error if the file can't be opened. Problems inside the file are logged
    /// instead: malformed lines are skipped, and a corrupt or truncated gzip stream ends
    /// the iteration.
    pub fn read_posts(&self) -> Result<Posts, Error> {
        let file = File::open(&self.path)?;

        let is_gzipped = self
            .path
            .extension()
            .map_or(false, |extension| extension.eq_ignore_ascii_case("gz"));

        let reader: Box<dyn Read + Send> = if is_gzipped {
            Box::new(MultiGzDecoder::new(file))
        } else {
            Box::new(file)
        };

        Ok(Posts {
            lines: BufReader::new(reader).split(b'\n'),
            path: self.path.clone(),
            line_number: 0,
        })
    }
}

pub struct Posts {
    lines: Split<BufReader<Box<dyn Read + Send>>>,
    path: PathBuf,
    line_number: usize,
}

impl Iterator for Posts {
    type Item = Post;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(err) => {
                    warn!(
                        "Stopped reading {} after line {}: {}",
                        self.path.display(),
                        self.line_number,
                        err
                    );
                    return None;
                }
            };
            self.line_number += 1;

            if line.iter().all(|byte| byte.is_ascii_whitespace()) {
                continue;
            }

            match serde_json::from_slice::<Post>(&line) {
                Ok(post) => return Some(post),
                Err(err) => {
                    warn!(
                        "Skipping invalid post on line {} of {}: {}",
                        self.line_number,
                        self.path.display(),
                        err
                    );
                    debug!("Invalid line: {}", String::from_utf8_lossy(&line));
                }
            }
        }
    }
}
