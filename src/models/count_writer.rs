use crate::models::{OutputFormat, TokenCounts};
use crate::utils::write_atomically;
use crate::Error;
use csv::{QuoteStyle, WriterBuilder};
use std::path::Path;

fn tab_writer_builder() -> WriterBuilder {
    let mut builder = WriterBuilder::new();
    builder
        .delimiter(b'\t')
        .quote_style(QuoteStyle::Never)
        .has_headers(false);
    builder
}

/// Writes the wide format: a `#filename` header naming every token, then one row with
/// `filename` and the matching counts.
pub fn write_tsv<P: AsRef<Path>>(
    output_file: P,
    filename: &str,
    token_counts: &TokenCounts,
) -> Result<(), Error> {
    write_atomically(output_file, |writer| {
        let mut tsv_writer = tab_writer_builder().from_writer(writer);

        let header = std::iter::once("#filename").chain(token_counts.tokens.iter().map(String::as_str));
        tsv_writer.write_record(header)?;

        let counts = token_counts.counts.to_strings();
        let row = std::iter::once(filename).chain(counts.iter().map(String::as_str));
        tsv_writer.write_record(row)?;

        tsv_writer.flush()?;
        Ok(())
    })
}

/// Writes the raw format: one `token<TAB>count` line per token, no header.
pub fn write_raw_counts<P: AsRef<Path>>(
    output_file: P,
    token_counts: &TokenCounts,
) -> Result<(), Error> {
    write_atomically(output_file, |writer| {
        let mut raw_writer = tab_writer_builder().from_writer(writer);

        for (token, count) in token_counts
            .tokens
            .iter()
            .zip(token_counts.counts.to_strings())
        {
            raw_writer.write_record([token.as_str(), count.as_str()])?;
        }

        raw_writer.flush()?;
        Ok(())
    })
}

pub fn write_token_counts<P: AsRef<Path>>(
    output_file: P,
    filename: &str,
    output_format: OutputFormat,
    token_counts: &TokenCounts,
) -> Result<(), Error> {
    match output_format {
        OutputFormat::Tsv => write_tsv(output_file, filename, token_counts),
        OutputFormat::Raw => write_raw_counts(output_file, token_counts),
    }
}
