use crate::constants::{
    DEFAULT_OUTPUT_FORMAT, DEFAULT_TOKEN_COUNT_CONFIG, DEFAULT_TOKEN_PATTERN, RAW_FILE_EXTENSION,
    TSV_FILE_EXTENSION,
};
use std::path::{Path, PathBuf};

/// Tokenizer language mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Language {
    En,
    Ar,
}

/// Per-file output format.
///
/// `Tsv` is meant for final features (one header line, one data line), `Raw` is the
/// `token<TAB>count` intermediate consumed by aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Raw,
    Tsv,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Raw => RAW_FILE_EXTENSION,
            OutputFormat::Tsv => TSV_FILE_EXTENSION,
        }
    }
}

/// Settings that control how posts are tokenized and counted.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenCountConfig {
    /// Regex for matching tokens. `None` uses `DEFAULT_TOKEN_PATTERN`.
    pub token_pattern: Option<String>,
    pub language: Language,
    /// Minimum number of posts a token must appear in. Ignored with a fixed vocabulary.
    pub min_count: usize,
    pub include_bigrams: bool,
    /// Divide counts by the number of posts in the file.
    pub scale_counts: bool,
    /// Only read the first `n` posts of each file. Not applied with `civil_unrest_only`.
    pub sample_size: Option<usize>,
    pub civil_unrest_only: bool,
    /// Newline-delimited stopwords.
    pub stopwords_file: Option<PathBuf>,
    /// Newline-delimited fixed vocabulary.
    pub valid_vocab_file: Option<PathBuf>,
}

impl TokenCountConfig {
    pub fn token_pattern(&self) -> &str {
        self.token_pattern.as_deref().unwrap_or(DEFAULT_TOKEN_PATTERN)
    }
}

impl Default for TokenCountConfig {
    fn default() -> Self {
        DEFAULT_TOKEN_COUNT_CONFIG
    }
}

/// Where and how per-file results are written.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputConfig {
    pub output_dir: PathBuf,
    pub output_format: OutputFormat,
    /// Skip input files whose output already exists.
    pub no_overwrite: bool,
    /// Size of the worker pool used for per-file work.
    pub threads: usize,
}

impl OutputConfig {
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            output_format: DEFAULT_OUTPUT_FORMAT,
            no_overwrite: false,
            threads: 1,
        }
    }

    /// Output path for an input file: `<output_dir>/<input file name>.<tsv|raw>`.
    pub fn output_path_for(&self, input_file: &Path) -> PathBuf {
        let file_name = input_file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| input_file.to_string_lossy().into_owned());

        self.output_dir
            .join(format!("{}.{}", file_name, self.output_format.extension()))
    }
}
