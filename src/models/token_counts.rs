use crate::types::{FrequencyTable, Token, TokenFrequency};
use crate::Error;

/// Count values for a list of tokens.
#[derive(Debug, Clone, PartialEq)]
pub enum Counts {
    /// Total occurrences across all posts of a file.
    Total(Vec<TokenFrequency>),
    /// Average occurrences per post.
    PerPost(Vec<f64>),
}

impl Counts {
    pub fn len(&self) -> usize {
        match self {
            Counts::Total(counts) => counts.len(),
            Counts::PerPost(counts) => counts.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Counts rendered for output: `3` for totals, `0.5` for averages.
    pub fn to_strings(&self) -> Vec<String> {
        match self {
            Counts::Total(counts) => counts.iter().map(|count| count.to_string()).collect(),
            Counts::PerPost(counts) => counts.iter().map(|count| count.to_string()).collect(),
        }
    }

    pub fn as_f64(&self) -> Vec<f64> {
        match self {
            Counts::Total(counts) => counts.iter().map(|&count| count as f64).collect(),
            Counts::PerPost(counts) => counts.clone(),
        }
    }
}

/// Tokens of one file with their matching counts.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenCounts {
    pub tokens: Vec<Token>,
    pub counts: Counts,
}

impl TokenCounts {
    pub fn new(tokens: Vec<Token>, counts: Vec<TokenFrequency>) -> Self {
        debug_assert_eq!(tokens.len(), counts.len());
        Self {
            tokens,
            counts: Counts::Total(counts),
        }
    }

    /// No features, used when counting a file yields nothing.
    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Divides every count by `num_posts`.
    ///
    /// # Errors
    ///
    /// Returns `Error::NoPostsToScale` when `num_posts` is zero.
    pub fn scale_by_posts(self, num_posts: usize) -> Result<Self, Error> {
        if num_posts == 0 {
            return Err(Error::NoPostsToScale(format!(
                "cannot scale {} token counts by zero posts",
                self.tokens.len()
            )));
        }

        let divisor = num_posts as f64;
        let scaled = self
            .counts
            .as_f64()
            .into_iter()
            .map(|count| count / divisor)
            .collect();

        Ok(Self {
            tokens: self.tokens,
            counts: Counts::PerPost(scaled),
        })
    }

    /// The counts as a frequency table. `None` for per-post averages.
    pub fn to_frequency_table(&self) -> Option<FrequencyTable> {
        match &self.counts {
            Counts::Total(counts) => Some(
                self.tokens
                    .iter()
                    .cloned()
                    .zip(counts.iter().copied())
                    .collect(),
            ),
            Counts::PerPost(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_by_posts() {
        let token_counts = TokenCounts::new(vec!["a".to_string(), "b".to_string()], vec![4, 1]);
        let scaled = token_counts.scale_by_posts(4).unwrap();

        assert_eq!(scaled.counts, Counts::PerPost(vec![1.0, 0.25]));
        assert_eq!(scaled.counts.to_strings(), vec!["1", "0.25"]);
    }

    #[test]
    fn test_scale_by_zero_posts_is_an_error() {
        let token_counts = TokenCounts::new(vec!["a".to_string()], vec![0]);

        assert!(matches!(
            token_counts.scale_by_posts(0),
            Err(Error::NoPostsToScale(_))
        ));
    }
}
