use crate::constants::{
    AGGREGATE_PROGRESS_INTERVAL, ALL_TOKEN_COUNTS_FILE_NAME, RAW_FILE_EXTENSION, TOP_K_TOKENS,
    TOP_TOKENS_FILE_NAME,
};
use crate::types::{FrequencyTable, Token, TokenFrequency};
use crate::utils::{merge_frequency_tables, top_k_tokens, write_atomically};
use crate::Error;
use csv::{ReaderBuilder, StringRecord, Trim};
use log::{error, info};
use rayon::prelude::*;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Global token counts across a directory of raw count files.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateReport {
    pub token_counts: FrequencyTable,
    /// Most frequent tokens first.
    pub top_tokens: Vec<Token>,
}

impl AggregateReport {
    pub fn from_token_counts(token_counts: FrequencyTable, top_k: usize) -> Self {
        let top_tokens = top_k_tokens(&token_counts, top_k);
        Self {
            token_counts,
            top_tokens,
        }
    }

    /// Writes `all_token_counts.json` and `top_10k_tokens.txt` into `output_dir`.
    pub fn write_to_dir<P: AsRef<Path>>(&self, output_dir: P) -> Result<(), Error> {
        let output_dir = output_dir.as_ref();

        write_atomically(output_dir.join(ALL_TOKEN_COUNTS_FILE_NAME), |writer| {
            serde_json::to_writer(writer, &self.token_counts)?;
            Ok(())
        })?;

        write_atomically(output_dir.join(TOP_TOKENS_FILE_NAME), |writer| {
            writer.write_all(self.top_tokens.join("\n").as_bytes())?;
            Ok(())
        })?;

        Ok(())
    }
}

/// Sums raw (`token<TAB>count`) files into one frequency table.
///
/// Each file is parsed into its own partial table and the partial tables are added
/// together, so files can be read in parallel.
pub struct CountAggregator {
    top_k: usize,
}

impl Default for CountAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl CountAggregator {
    pub fn new() -> Self {
        Self {
            top_k: TOP_K_TOKENS,
        }
    }

    pub fn with_top_k(top_k: usize) -> Self {
        Self { top_k }
    }

    /// Raw count files directly inside `dir`, sorted by path.
    pub fn find_raw_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>, Error> {
        let suffix = format!(".{}", RAW_FILE_EXTENSION);
        let mut raw_files = Vec::new();

        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            let is_raw = path
                .file_name()
                .and_then(|name| name.to_str())
                .map_or(false, |name| name.ends_with(&suffix));

            if is_raw && entry.file_type()?.is_file() {
                raw_files.push(path);
            }
        }

        raw_files.sort();
        Ok(raw_files)
    }

    /// Parses one `token<TAB>count` record.
    pub fn parse_raw_count_record(record: &StringRecord) -> Result<(Token, TokenFrequency), Error> {
        if record.len() != 2 {
            return Err(Error::ParserError(format!(
                "expected 2 tab-separated fields, found {}",
                record.len()
            )));
        }

        let token = &record[0];
        let count = record[1].parse::<TokenFrequency>().map_err(|err| {
            Error::ParserError(format!("invalid count {:?}: {}", &record[1], err))
        })?;

        Ok((token.to_string(), count))
    }

    /// Reads one raw count file into a frequency table.
    ///
    /// Malformed lines are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the file can't be read or isn't valid UTF-8. None of the
    /// file's lines count in that case.
    pub fn read_raw_count_file<P: AsRef<Path>>(path: P) -> Result<FrequencyTable, Error> {
        let path = path.as_ref();
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .delimiter(b'\t')
            .quoting(false)
            .flexible(true)
            .trim(Trim::All)
            .from_path(path)?;

        let mut token_counts = FrequencyTable::new();

        for record in reader.records() {
            let record = record?;

            match Self::parse_raw_count_record(&record) {
                Ok((token, count)) => *token_counts.entry(token).or_insert(0) += count,
                Err(err) => {
                    let line = record.position().map_or(0, |position| position.line());
                    error!(
                        "Error parsing line {} ({:?}) from file {}: {}",
                        line,
                        record.iter().collect::<Vec<_>>().join("\t"),
                        path.display(),
                        err
                    );
                }
            }
        }

        Ok(token_counts)
    }

    /// Sums the counts of every raw count file in `dir`.
    ///
    /// Files that can't be decoded are logged and skipped.
    pub fn aggregate_counts<P: AsRef<Path>>(&self, dir: P) -> Result<FrequencyTable, Error> {
        let dir = dir.as_ref();
        let raw_files = Self::find_raw_files(dir)?;
        info!(
            "Aggregating {} raw count files in {}",
            raw_files.len(),
            dir.display()
        );

        let token_counts = raw_files
            .par_iter()
            .enumerate()
            .map(|(index, raw_file)| {
                if index % AGGREGATE_PROGRESS_INTERVAL == 0 {
                    info!("On file {}", index);
                }

                Self::read_raw_count_file(raw_file).unwrap_or_else(|err| {
                    error!("Error in file {}. Skipping.\n{}", raw_file.display(), err);
                    FrequencyTable::new()
                })
            })
            .reduce(FrequencyTable::new, merge_frequency_tables);

        Ok(token_counts)
    }

    /// Aggregates `dir` and ranks the tokens. Nothing is written.
    pub fn aggregate<P: AsRef<Path>>(&self, dir: P) -> Result<AggregateReport, Error> {
        let token_counts = self.aggregate_counts(dir)?;
        Ok(AggregateReport::from_token_counts(token_counts, self.top_k))
    }

    /// Aggregates `dir` and writes the report artifacts into it.
    pub fn aggregate_and_write<P: AsRef<Path>>(&self, dir: P) -> Result<AggregateReport, Error> {
        let dir = dir.as_ref();
        let report = self.aggregate(dir)?;
        report.write_to_dir(dir)?;
        info!(
            "Aggregated {} distinct tokens into {}",
            report.token_counts.len(),
            dir.display()
        );
        Ok(report)
    }
}
