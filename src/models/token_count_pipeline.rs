use crate::constants::VECTORIZER_FILE_NAME;
use crate::models::{
    write_token_counts, CountVectorizer, OutputConfig, TokenCountAnalyzer, TokenCountConfig,
};
use crate::types::Vocabulary;
use crate::utils::read_vocabulary;
use crate::Error;
use log::{debug, info, warn};
use rayon::prelude::*;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// What happened to one input file.
#[derive(Debug, Clone)]
pub enum FileOutcome {
    /// Output already existed and overwriting was disabled.
    SkippedExisting(PathBuf),
    Written {
        output_file: PathBuf,
        /// No features were counted, an empty output was written.
        empty: bool,
        vectorizer: Option<CountVectorizer>,
    },
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PipelineSummary {
    pub written: usize,
    pub empty: usize,
    pub skipped_existing: usize,
    pub vectorizer_saved: bool,
}

/// Counts the tokens of a batch of input files and writes one output per file.
pub struct TokenCountPipeline {
    analyzer: TokenCountAnalyzer,
    config: TokenCountConfig,
    valid_vocab: Option<Vocabulary>,
    output: OutputConfig,
}

impl TokenCountPipeline {
    /// Loads the stopwords and vocabulary files and creates the output directory.
    pub fn new(config: TokenCountConfig, output: OutputConfig) -> Result<Self, Error> {
        let analyzer = TokenCountAnalyzer::from_config(&config)?;
        let valid_vocab = config
            .valid_vocab_file
            .as_deref()
            .map(read_vocabulary)
            .transpose()?;

        if let Some(valid_vocab) = &valid_vocab {
            info!("Restricting counts to {} vocabulary tokens", valid_vocab.len());
        }

        fs::create_dir_all(&output.output_dir)?;

        Ok(Self {
            analyzer,
            config,
            valid_vocab,
            output,
        })
    }

    /// Processes every input file, `threads` at a time.
    ///
    /// Inputs that map to the same output file are processed one after another in input
    /// order, so the last of them wins. The fitted vectorizer of the first input file is
    /// saved as `vectorizer.json`.
    pub fn run<P: AsRef<Path> + Sync>(&self, input_files: &[P]) -> Result<PipelineSummary, Error> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.output.threads.max(1))
            .build()?;

        let groups = self.group_by_output_path(input_files);

        let mut indexed_outcomes: Vec<(usize, FileOutcome)> = pool.install(|| {
            groups
                .par_iter()
                .map(|indices| {
                    indices
                        .iter()
                        .map(|&index| {
                            self.process_file(input_files[index].as_ref(), index == 0)
                                .map(|outcome| (index, outcome))
                        })
                        .collect::<Result<Vec<_>, Error>>()
                })
                .collect::<Result<Vec<_>, Error>>()
        })?
        .into_iter()
        .flatten()
        .collect();
        indexed_outcomes.sort_by_key(|&(index, _)| index);
        let outcomes = indexed_outcomes.into_iter().map(|(_, outcome)| outcome);

        let mut summary = PipelineSummary::default();

        for (index, outcome) in outcomes.enumerate() {
            match outcome {
                FileOutcome::SkippedExisting(_) => summary.skipped_existing += 1,
                FileOutcome::Written {
                    empty, vectorizer, ..
                } => {
                    summary.written += 1;
                    if empty {
                        summary.empty += 1;
                    }

                    if index == 0 {
                        if let Some(vectorizer) = vectorizer {
                            let vectorizer_file = self.output.output_dir.join(VECTORIZER_FILE_NAME);
                            vectorizer.save(&vectorizer_file)?;
                            debug!("Saved vectorizer to {}", vectorizer_file.display());
                            summary.vectorizer_saved = true;
                        }
                    }
                }
            }
        }

        info!(
            "Wrote {} files ({} without features), skipped {} existing",
            summary.written, summary.empty, summary.skipped_existing
        );

        Ok(summary)
    }

    /// Indices of the input files grouped by output path, in order of first appearance.
    fn group_by_output_path<P: AsRef<Path>>(&self, input_files: &[P]) -> Vec<Vec<usize>> {
        let mut group_of_output: HashMap<PathBuf, usize> = HashMap::new();
        let mut groups: Vec<Vec<usize>> = Vec::new();

        for (index, input_file) in input_files.iter().enumerate() {
            let output_file = self.output.output_path_for(input_file.as_ref());

            match group_of_output.get(&output_file) {
                Some(&group) => {
                    warn!(
                        "{} and {} both write to {}",
                        input_files[groups[group][0]].as_ref().display(),
                        input_file.as_ref().display(),
                        output_file.display()
                    );
                    groups[group].push(index);
                }
                None => {
                    group_of_output.insert(output_file, groups.len());
                    groups.push(vec![index]);
                }
            }
        }

        groups
    }

    /// Counts one input file and writes its output.
    ///
    /// The fitted vectorizer is only kept in the outcome when `keep_vectorizer` is set.
    pub fn process_file(
        &self,
        input_file: &Path,
        keep_vectorizer: bool,
    ) -> Result<FileOutcome, Error> {
        let output_file = self.output.output_path_for(input_file);

        if self.output.no_overwrite && output_file.exists() {
            warn!("Skipping: {} already exists.", output_file.display());
            return Ok(FileOutcome::SkippedExisting(output_file));
        }

        info!("Counting tokens in {}", input_file.display());
        let file_token_counts = self.analyzer.get_token_counts_from_file(
            input_file,
            &self.config,
            self.valid_vocab.as_ref(),
        )?;

        let filename = input_file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        write_token_counts(
            &output_file,
            &filename,
            self.output.output_format,
            &file_token_counts.token_counts,
        )?;
        debug!(
            "Wrote {} tokens from {} posts to {}",
            file_token_counts.token_counts.tokens.len(),
            file_token_counts.num_posts,
            output_file.display()
        );

        Ok(FileOutcome::Written {
            output_file,
            empty: file_token_counts.token_counts.is_empty(),
            vectorizer: if keep_vectorizer {
                file_token_counts.vectorizer
            } else {
                None
            },
        })
    }
}
