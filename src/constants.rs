use crate::models::{Language, OutputFormat, TokenCountConfig};

/// Letter-led and letter-trailed sequences, allowing internal punctuation.
pub const DEFAULT_TOKEN_PATTERN: &str = r"\p{L}[\p{L}\p{P}]+\p{L}";

pub const DEFAULT_MIN_COUNT: usize = 10;

pub const DEFAULT_LANGUAGE: Language = Language::En;

pub const DEFAULT_OUTPUT_FORMAT: OutputFormat = OutputFormat::Tsv;

/// Number of tokens written to the top-K vocabulary file during aggregation.
pub const TOP_K_TOKENS: usize = 10_000;

pub const AGGREGATE_PROGRESS_INTERVAL: usize = 100;

pub const RAW_FILE_EXTENSION: &str = "raw";
pub const TSV_FILE_EXTENSION: &str = "tsv";
pub const TEMP_FILE_SUFFIX: &str = ".tmp";

pub const VECTORIZER_FILE_NAME: &str = "vectorizer.json";
pub const ALL_TOKEN_COUNTS_FILE_NAME: &str = "all_token_counts.json";
pub const TOP_TOKENS_FILE_NAME: &str = "top_10k_tokens.txt";

pub const DEFAULT_TOKEN_COUNT_CONFIG: TokenCountConfig = TokenCountConfig {
    token_pattern: None,
    language: DEFAULT_LANGUAGE,
    min_count: DEFAULT_MIN_COUNT,
    include_bigrams: false,
    scale_counts: false,
    sample_size: None,
    civil_unrest_only: false,
    stopwords_file: None,
    valid_vocab_file: None,
};
