use crate::types::{Token, Vocabulary};
use crate::Error;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Reads a newline-delimited list of words.
///
/// Each line is trimmed and blank lines are dropped. Order is preserved.
pub fn read_word_list<P: AsRef<Path>>(path: P) -> Result<Vec<Token>, Error> {
    let reader = BufReader::new(File::open(path)?);
    let mut words = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let word = line.trim();
        if !word.is_empty() {
            words.push(word.to_string());
        }
    }

    Ok(words)
}

/// Reads a newline-delimited fixed vocabulary.
pub fn read_vocabulary<P: AsRef<Path>>(path: P) -> Result<Vocabulary, Error> {
    Ok(read_word_list(path)?.into_iter().collect())
}
