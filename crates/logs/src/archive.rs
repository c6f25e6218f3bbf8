use std::{
    io::{Cursor, Read},
    sync::OnceLock,
};

use regex::Regex;
use runwatch_core::models::RawLogLine;
use thiserror::Error;
use zip::{ZipArchive, result::ZipError};

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("Log archive is corrupt")]
    Corrupt(#[from] ZipError),
}

/// Reads every file in a zipped log bundle, in archive order, into numbered lines.
///
/// Invalid UTF-8 is replaced rather than rejected. Directory entries are skipped.
pub fn read_archive(bytes: &[u8]) -> Result<Vec<RawLogLine>, ArchiveError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut lines = Vec::new();
    let mut contents = Vec::new();
    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        if file.is_dir() {
            continue;
        }
        let source_name = file.name().to_string();
        contents.clear();
        file.read_to_end(&mut contents).map_err(ZipError::Io)?;
        let text = String::from_utf8_lossy(&contents);
        let text = text.strip_prefix('\u{feff}').unwrap_or(&text);
        lines.extend(split_lines(text).into_iter().enumerate().map(|(idx, line)| RawLogLine {
            source_name: source_name.clone(),
            line_number: idx + 1,
            text: line.to_string(),
        }));
    }
    Ok(lines)
}

/// Splits on `\n`, `\r\n` and a lone `\r`. A trailing terminator does not start a new line.
fn split_lines(text: &str) -> Vec<&str> {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = REGEX.get_or_init(|| Regex::new(r"\r\n|\r|\n").unwrap());
    let mut lines = regex.split(text).collect::<Vec<_>>();
    if lines.last() == Some(&"") {
        lines.pop();
    }
    lines
}
