use crate::types::{Token, TokenFrequency, TokenRef, Vocabulary};
use crate::utils::write_atomically;
use crate::Error;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Settings for a `CountVectorizer`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountVectorizerConfig {
    /// Smallest and largest n-gram size, inclusive.
    pub ngram_range: (usize, usize),
    /// Minimum number of documents a term must appear in. Ignored with a fixed vocabulary.
    pub min_df: usize,
    pub lowercase: bool,
    /// Words removed before n-grams are built.
    pub stop_words: Option<Vec<Token>>,
    /// A fixed vocabulary. When set, only these terms are counted.
    pub vocabulary: Option<Vec<Token>>,
}

impl Default for CountVectorizerConfig {
    fn default() -> Self {
        Self {
            ngram_range: (1, 1),
            min_df: 1,
            lowercase: true,
            stop_words: None,
            vocabulary: None,
        }
    }
}

impl CountVectorizerConfig {
    pub fn with_bigrams(mut self, include_bigrams: bool) -> Self {
        self.ngram_range = if include_bigrams { (1, 2) } else { (1, 1) };
        self
    }

    pub fn with_min_df(mut self, min_df: usize) -> Self {
        self.min_df = min_df;
        self
    }

    pub fn with_stop_words(mut self, stop_words: Option<Vec<Token>>) -> Self {
        self.stop_words = stop_words.map(|mut words| {
            words.sort();
            words.dedup();
            words
        });
        self
    }

    pub fn with_vocabulary(mut self, vocabulary: Option<&Vocabulary>) -> Self {
        self.vocabulary = vocabulary.map(|vocabulary| {
            let mut terms: Vec<Token> = vocabulary.iter().cloned().collect();
            terms.sort();
            terms
        });
        self
    }
}

/// Counts terms (unigrams and optionally bigrams) over a collection of documents.
///
/// Documents are pre-tokenized: tokens separated by whitespace. Fitting learns the set of
/// features (term -> column) which can then be reused through `transform` on further
/// documents, and persisted with `save`/`load`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountVectorizer {
    config: CountVectorizerConfig,
    fitted_vocabulary: Option<BTreeMap<Token, usize>>,
}

impl CountVectorizer {
    pub fn new(config: CountVectorizerConfig) -> Self {
        Self {
            config,
            fitted_vocabulary: None,
        }
    }

    pub fn config(&self) -> &CountVectorizerConfig {
        &self.config
    }

    pub fn is_fitted(&self) -> bool {
        self.fitted_vocabulary.is_some()
    }

    /// Splits a document into the terms that are counted.
    ///
    /// All unigrams come first, followed by the n-grams of increasing size built from the
    /// tokens left after stop word removal. N-gram words are joined with a single space.
    pub fn analyze(&self, document: &TokenRef) -> Vec<Token> {
        let stop_words = self.stop_word_set();
        self.analyze_with(document, &stop_words)
    }

    fn analyze_with(&self, document: &TokenRef, stop_words: &HashSet<&TokenRef>) -> Vec<Token> {
        let text = if self.config.lowercase {
            document.to_lowercase()
        } else {
            document.to_string()
        };

        let words: Vec<&str> = text
            .split_whitespace()
            .filter(|word| !stop_words.contains(word))
            .collect();

        let (min_n, max_n) = self.config.ngram_range;
        let mut terms = Vec::new();

        for n in min_n.max(1)..=max_n {
            if n == 1 {
                terms.extend(words.iter().map(|word| word.to_string()));
            } else {
                terms.extend(words.windows(n).map(|window| window.join(" ")));
            }
        }

        terms
    }

    fn stop_word_set(&self) -> HashSet<&TokenRef> {
        self.config
            .stop_words
            .iter()
            .flatten()
            .map(|word| word.as_str())
            .collect()
    }

    /// Learns the features from `documents` and returns the total count of each feature
    /// across all of them, in feature order (see `feature_names`).
    ///
    /// # Errors
    ///
    /// Returns `Error::EmptyVocabulary` when no feature is left: an empty fixed
    /// vocabulary, documents without any term, fewer documents than `min_df`, or every
    /// term pruned by `min_df`.
    pub fn fit_transform<S: AsRef<str>>(
        &mut self,
        documents: &[S],
    ) -> Result<Vec<TokenFrequency>, Error> {
        if let Some(vocabulary) = &self.config.vocabulary {
            if vocabulary.is_empty() {
                return Err(Error::EmptyVocabulary(
                    "empty vocabulary passed to fit".to_string(),
                ));
            }

            let mut terms = vocabulary.clone();
            terms.sort();
            terms.dedup();

            self.fitted_vocabulary = Some(
                terms
                    .into_iter()
                    .enumerate()
                    .map(|(index, term)| (term, index))
                    .collect(),
            );

            return self.transform(documents);
        }

        let stop_words = self.stop_word_set();

        // term -> (term frequency, document frequency)
        let mut term_stats: HashMap<Token, (TokenFrequency, usize)> = HashMap::new();

        for document in documents {
            let mut document_counts: HashMap<Token, TokenFrequency> = HashMap::new();
            for term in self.analyze_with(document.as_ref(), &stop_words) {
                *document_counts.entry(term).or_insert(0) += 1;
            }

            for (term, count) in document_counts {
                let stats = term_stats.entry(term).or_insert((0, 0));
                stats.0 += count;
                stats.1 += 1;
            }
        }

        if term_stats.is_empty() {
            return Err(Error::EmptyVocabulary(
                "empty vocabulary; perhaps the documents only contain stop words".to_string(),
            ));
        }

        if documents.len() < self.config.min_df {
            return Err(Error::EmptyVocabulary(format!(
                "max_df corresponds to < documents than min_df ({} documents, min_df {})",
                documents.len(),
                self.config.min_df
            )));
        }

        let min_df = self.config.min_df;
        let mut retained: Vec<(Token, TokenFrequency)> = term_stats
            .into_iter()
            .filter(|(_, (_, document_frequency))| *document_frequency >= min_df)
            .map(|(term, (term_frequency, _))| (term, term_frequency))
            .collect();

        if retained.is_empty() {
            return Err(Error::EmptyVocabulary(
                "After pruning, no terms remain. Try a lower min_df or a higher max_df."
                    .to_string(),
            ));
        }

        retained.sort_by(|a, b| a.0.cmp(&b.0));

        self.fitted_vocabulary = Some(
            retained
                .iter()
                .enumerate()
                .map(|(index, (term, _))| (term.clone(), index))
                .collect(),
        );

        Ok(retained.into_iter().map(|(_, count)| count).collect())
    }

    /// Counts the fitted features in `documents`, summed over all documents.
    pub fn transform<S: AsRef<str>>(&self, documents: &[S]) -> Result<Vec<TokenFrequency>, Error> {
        let vocabulary = self.fitted_vocabulary.as_ref().ok_or_else(|| {
            Error::NotFitted("call fit_transform before transform".to_string())
        })?;

        let stop_words = self.stop_word_set();
        let mut counts = vec![0; vocabulary.len()];

        for document in documents {
            for term in self.analyze_with(document.as_ref(), &stop_words) {
                if let Some(&index) = vocabulary.get(term.as_str()) {
                    counts[index] += 1;
                }
            }
        }

        Ok(counts)
    }

    /// Features in column order.
    pub fn feature_names(&self) -> Result<Vec<Token>, Error> {
        let vocabulary = self.fitted_vocabulary.as_ref().ok_or_else(|| {
            Error::NotFitted("call fit_transform before feature_names".to_string())
        })?;

        let mut features: Vec<(&Token, usize)> = vocabulary
            .iter()
            .map(|(term, &index)| (term, index))
            .collect();
        features.sort_by_key(|&(_, index)| index);

        Ok(features.into_iter().map(|(term, _)| term.clone()).collect())
    }

    /// Writes the vectorizer (settings and fitted features) as JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        write_atomically(path, |writer| {
            serde_json::to_writer(writer, self)?;
            Ok(())
        })
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}
