use crate::constants::TEMP_FILE_SUFFIX;
use crate::Error;
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Writes a file so that `path` either holds the complete contents or is left untouched.
///
/// The contents go to a uniquely named temporary file in the same directory, which is
/// renamed over `path` once `write_contents` succeeds. Concurrent writers of the same
/// `path` never share a temporary file. On failure the temporary file is removed.
pub fn write_atomically<P, F>(path: P, write_contents: F) -> Result<(), Error>
where
    P: AsRef<Path>,
    F: FnOnce(&mut BufWriter<NamedTempFile>) -> Result<(), Error>,
{
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let prefix = path
        .file_name()
        .map(|name| format!(".{}.", name.to_string_lossy()))
        .unwrap_or_else(|| ".".to_string());

    let temp_file = tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(TEMP_FILE_SUFFIX)
        .tempfile_in(dir)?;

    let mut writer = BufWriter::new(temp_file);
    write_contents(&mut writer)?;
    writer.flush()?;

    let temp_file = writer.into_inner().map_err(|err| err.into_error())?;
    temp_file.persist(path).map_err(|err| err.error)?;

    Ok(())
}
