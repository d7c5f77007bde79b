mod constants;
pub use constants::{
    ALL_TOKEN_COUNTS_FILE_NAME, DEFAULT_MIN_COUNT, DEFAULT_TOKEN_COUNT_CONFIG,
    DEFAULT_TOKEN_PATTERN, TOP_K_TOKENS, TOP_TOKENS_FILE_NAME, VECTORIZER_FILE_NAME,
};
pub mod models;
pub use models::{
    AggregateReport, CountAggregator, CountVectorizer, CountVectorizerConfig, Counts, Error,
    FileOutcome, FileTokenCounts, Language, OutputConfig, OutputFormat, PipelineSummary, Post,
    PostReader, PostTokenizer, TokenCountAnalyzer, TokenCountConfig, TokenCountPipeline,
    TokenCounts,
};
pub mod types;
pub use types::{FrequencyTable, Token, TokenDocument, TokenFrequency, TokenRef, Vocabulary};
mod utils;
pub use utils::{
    merge_frequency_tables, read_vocabulary, read_word_list, sort_frequency_table, top_k_tokens,
};

use std::path::Path;

/// Counts the tokens of every input file and writes one output per file into
/// `output.output_dir`.
pub fn count_tokens_in_files<P: AsRef<Path> + Sync>(
    input_files: &[P],
    config: TokenCountConfig,
    output: OutputConfig,
) -> Result<PipelineSummary, Error> {
    let pipeline = TokenCountPipeline::new(config, output)?;
    pipeline.run(input_files)
}

/// Sums all raw count files in `output_dir` and writes `all_token_counts.json` and
/// `top_10k_tokens.txt` next to them.
pub fn aggregate_token_counts<P: AsRef<Path>>(output_dir: P) -> Result<AggregateReport, Error> {
    CountAggregator::new().aggregate_and_write(output_dir)
}
