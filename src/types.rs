use std::collections::{BTreeMap, HashSet};

// Types listed here are either shared across multiple files and/or exposed via the library.

/// Represents a token as an owned `String`. Bigrams are a single token with the two
/// words joined by one space.
pub type Token = String;

/// Represents a borrowed view of a token as a `str`. This is used when ownership is not required.
pub type TokenRef = str;

/// A post's tokens joined by single spaces. This is the unit the vectorizer counts over.
pub type TokenDocument = String;

/// Represents the total number of occurrences of a token across a collection of posts.
pub type TokenFrequency = u64;

/// A mapping of tokens to their total frequency.
///
/// A `BTreeMap` is used so that serialized tables are ordered by token and reproducible
/// across runs.
pub type FrequencyTable = BTreeMap<Token, TokenFrequency>;

/// An externally supplied set of allowed tokens.
pub type Vocabulary = HashSet<Token>;
