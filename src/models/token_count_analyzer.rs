use crate::models::{
    CountVectorizer, CountVectorizerConfig, Language, PostReader, PostTokenizer,
    TokenCountConfig, TokenCounts,
};
use crate::types::{Token, TokenDocument, Vocabulary};
use crate::utils::read_word_list;
use crate::Error;
use log::{debug, warn};
use std::path::Path;

/// Token counts of one input file.
#[derive(Debug, Clone)]
pub struct FileTokenCounts {
    pub token_counts: TokenCounts,
    /// `None` when counting produced no features.
    pub vectorizer: Option<CountVectorizer>,
    /// Number of posts that were tokenized.
    pub num_posts: usize,
}

/// Counts tokens in files of posts.
pub struct TokenCountAnalyzer {
    tokenizer: PostTokenizer,
    stopwords: Option<Vec<Token>>,
}

impl TokenCountAnalyzer {
    pub fn new(
        token_pattern: &str,
        language: Language,
        stopwords_file: Option<&Path>,
    ) -> Result<Self, Error> {
        let tokenizer = PostTokenizer::new(token_pattern, language)?;
        let stopwords = stopwords_file.map(read_word_list).transpose()?;

        Ok(Self::with_stopwords(tokenizer, stopwords))
    }

    pub fn from_config(config: &TokenCountConfig) -> Result<Self, Error> {
        Self::new(
            config.token_pattern(),
            config.language,
            config.stopwords_file.as_deref(),
        )
    }

    pub fn with_stopwords(tokenizer: PostTokenizer, stopwords: Option<Vec<Token>>) -> Self {
        Self {
            tokenizer,
            stopwords,
        }
    }

    pub fn tokenizer(&self) -> &PostTokenizer {
        &self.tokenizer
    }

    /// Tokenizes the posts of a file, reading at most `sample_size` posts from the start.
    pub fn tokenize_file(
        &self,
        input_file: &Path,
        sample_size: Option<usize>,
    ) -> Result<Vec<TokenDocument>, Error> {
        let posts = PostReader::new(input_file).read_posts()?;

        Ok(posts
            .take(sample_size.unwrap_or(usize::MAX))
            .map(|post| self.tokenizer.tokenize_post(&post))
            .collect())
    }

    /// Tokenizes only the posts flagged as civil unrest related.
    pub fn tokenize_civil_unrest_posts(
        &self,
        input_file: &Path,
    ) -> Result<Vec<TokenDocument>, Error> {
        let posts = PostReader::new(input_file).read_posts()?;

        Ok(posts
            .filter(|post| post.is_civil_unrest_related())
            .map(|post| self.tokenizer.tokenize_post(&post))
            .collect())
    }

    /// Counts the tokens of one input file.
    ///
    /// When counting yields no features the problem is logged and an empty result is
    /// returned, so a batch can move on to the next file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file can't be opened, or if counts must be scaled but the
    /// file had no posts.
    pub fn get_token_counts_from_file(
        &self,
        input_file: &Path,
        config: &TokenCountConfig,
        valid_vocab: Option<&Vocabulary>,
    ) -> Result<FileTokenCounts, Error> {
        let documents = if config.civil_unrest_only {
            self.tokenize_civil_unrest_posts(input_file)?
        } else {
            self.tokenize_file(input_file, config.sample_size)?
        };
        debug!("{:?}", documents);
        let num_posts = documents.len();

        let (token_counts, vectorizer) = match self.get_token_counts(
            &documents,
            config.min_count,
            valid_vocab,
            config.include_bigrams,
        ) {
            Ok(counted) => counted,
            Err(Error::EmptyVocabulary(msg)) => {
                warn!(
                    "Issue counting tokens in {}:\n{}",
                    input_file.display(),
                    msg
                );
                return Ok(FileTokenCounts {
                    token_counts: TokenCounts::empty(),
                    vectorizer: None,
                    num_posts,
                });
            }
            Err(err) => return Err(err),
        };

        let token_counts = if config.scale_counts {
            token_counts.scale_by_posts(num_posts).map_err(|err| match err {
                Error::NoPostsToScale(msg) => {
                    Error::NoPostsToScale(format!("{}: {}", input_file.display(), msg))
                }
                other => other,
            })?
        } else {
            token_counts
        };

        Ok(FileTokenCounts {
            token_counts,
            vectorizer: Some(vectorizer),
            num_posts,
        })
    }

    /// Counts tokens (and optionally bigrams) across `documents`.
    ///
    /// With `valid_vocab` only those tokens are counted and `min_count` is ignored.
    /// Otherwise tokens found in fewer than `min_count` documents are dropped.
    pub fn get_token_counts<S: AsRef<str>>(
        &self,
        documents: &[S],
        min_count: usize,
        valid_vocab: Option<&Vocabulary>,
        include_bigrams: bool,
    ) -> Result<(TokenCounts, CountVectorizer), Error> {
        let config = CountVectorizerConfig::default()
            .with_bigrams(include_bigrams)
            .with_min_df(min_count)
            .with_vocabulary(valid_vocab)
            .with_stop_words(self.stopwords.clone());

        let mut vectorizer = CountVectorizer::new(config);
        let counts = vectorizer.fit_transform(documents)?;
        let tokens = vectorizer.feature_names()?;

        Ok((TokenCounts::new(tokens, counts), vectorizer))
    }
}
