pub mod config;
pub use config::{Language, OutputConfig, OutputFormat, TokenCountConfig};

pub mod count_aggregator;
pub use count_aggregator::{AggregateReport, CountAggregator};

pub mod count_vectorizer;
pub use count_vectorizer::{CountVectorizer, CountVectorizerConfig};

pub mod count_writer;
pub use count_writer::{write_raw_counts, write_token_counts, write_tsv};

pub mod error;
pub use error::Error;

pub mod post;
pub use post::{Post, PostReader, Posts};

pub mod token_count_analyzer;
pub use token_count_analyzer::{FileTokenCounts, TokenCountAnalyzer};

pub mod token_count_pipeline;
pub use token_count_pipeline::{FileOutcome, PipelineSummary, TokenCountPipeline};

pub mod token_counts;
pub use token_counts::{Counts, TokenCounts};

pub mod tokenizer;
pub use tokenizer::PostTokenizer;
