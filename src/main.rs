use clap::Parser;
use log::{error, info, LevelFilter};
use std::path::PathBuf;
use tweet_token_counts::{
    aggregate_token_counts, count_tokens_in_files, Error, Language, OutputConfig, OutputFormat,
    TokenCountConfig, DEFAULT_MIN_COUNT, DEFAULT_TOKEN_PATTERN,
};

/// Features that depend on the frequency of tokens in posts.
///
/// Also counts keywords when --valid-vocab is passed, and can restrict counting to posts
/// flagged as civil unrest related by an upstream classifier.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// List of gzip'd post files (newline-delimited JSON)
    #[arg(long, num_args = 1.., required_unless_present = "aggregate")]
    input_files: Vec<PathBuf>,

    #[arg(long)]
    output_dir: PathBuf,

    #[arg(long)]
    debug: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Tsv)]
    output_format: OutputFormat,

    /// If output file already exists, do not replace it
    #[arg(long)]
    no_overwrite: bool,

    /// Aggregate all the raw token counts in --output-dir
    #[arg(long)]
    aggregate: bool,

    /// File with newline-delimited stopwords
    #[arg(long)]
    stopwords: Option<PathBuf>,

    #[arg(long, default_value_t = DEFAULT_MIN_COUNT)]
    min_count: usize,

    #[arg(long)]
    include_bigrams: bool,

    /// Regex pattern for matching tokens in posts
    #[arg(long, default_value = DEFAULT_TOKEN_PATTERN)]
    token_pattern: String,

    /// Scale counts by the number of posts
    #[arg(long)]
    scale: bool,

    /// Number of posts to use for the counts (-1 for all)
    #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
    sample: i64,

    #[arg(long, value_enum, default_value_t = Language::En)]
    language: Language,

    /// Limit vocabulary to the words in the provided file (newline-delimited)
    #[arg(long)]
    valid_vocab: Option<PathBuf>,

    /// Only count posts whose 'civil_unrest_related' flag is set to true
    #[arg(long)]
    civil_unrest_only: bool,

    /// Number of files processed at the same time
    #[arg(long, default_value_t = 1)]
    threads: usize,
}

impl Args {
    fn token_count_config(&self) -> TokenCountConfig {
        TokenCountConfig {
            token_pattern: Some(self.token_pattern.clone()),
            language: self.language,
            min_count: self.min_count,
            include_bigrams: self.include_bigrams,
            scale_counts: self.scale,
            sample_size: usize::try_from(self.sample).ok(),
            civil_unrest_only: self.civil_unrest_only,
            stopwords_file: self.stopwords.clone(),
            valid_vocab_file: self.valid_vocab.clone(),
        }
    }

    fn output_config(&self) -> OutputConfig {
        OutputConfig {
            output_dir: self.output_dir.clone(),
            output_format: self.output_format,
            no_overwrite: self.no_overwrite,
            threads: self.threads,
        }
    }
}

fn init_logger(debug: bool) {
    let default_level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .init();
}

fn run(args: Args) -> Result<(), Error> {
    if args.aggregate {
        let report = aggregate_token_counts(&args.output_dir)?;
        info!(
            "{} distinct tokens, top token: {:?}",
            report.token_counts.len(),
            report.top_tokens.first()
        );
        return Ok(());
    }

    count_tokens_in_files(
        &args.input_files,
        args.token_count_config(),
        args.output_config(),
    )?;

    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logger(args.debug);

    if let Err(e) = run(args) {
        error!("{}", e);
        std::process::exit(1);
    }
}
