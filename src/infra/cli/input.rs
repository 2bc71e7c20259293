//! Timestamp acquisition from various sources.

use crate::domain::RawTimestamp;
use anyhow::{Context, Result};
use std::io::{IsTerminal, Read};
use std::path::PathBuf;

/// Source of timestamp input
pub enum InputSource {
    /// Values given on the command line
    Args(Vec<String>),

    /// File with one JSON value (or bare string) per line
    File(PathBuf),

    /// Same line format, piped in
    Stdin,
}

/// Try to read stdin (non-destructive check)
/// Returns Some(text) if stdin has content, None otherwise
pub fn try_read_stdin() -> Result<Option<String>> {
    if std::io::stdin().is_terminal() {
        return Ok(None);
    }

    read_nonempty(std::io::stdin())
}

fn read_nonempty(mut reader: impl Read) -> Result<Option<String>> {
    let mut buffer = String::new();
    match reader
        .read_to_string(&mut buffer)
        .context("Failed to read timestamps from stdin")?
    {
        0 => Ok(None),
        _ => Ok(Some(buffer)),
    }
}

/// Split line-delimited input into raw timestamps. Lines that are not JSON are
/// taken verbatim; an empty line is an absent timestamp.
pub fn parse_lines(text: &str) -> Vec<RawTimestamp> {
    text.lines()
        .map(|line| RawTimestamp::from_arg(line.trim_end_matches('\r')))
        .collect()
}

/// Acquire raw timestamps from various sources
pub fn acquire_timestamps(source: InputSource) -> Result<Vec<RawTimestamp>> {
    match source {
        InputSource::Args(args) => Ok(args.iter().map(|arg| RawTimestamp::from_arg(arg)).collect()),

        InputSource::File(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read timestamps from {}", path.display()))?;
            Ok(parse_lines(&text))
        }

        InputSource::Stdin => Ok(try_read_stdin()?
            .map(|text| parse_lines(&text))
            .unwrap_or_default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_lines_mixed_shapes() {
        let text = "[2025,6,15,10,30,0]\n\"2025-06-15T10:30:00Z\"\n2025-06-15 10:30:00\r\n\nnull\n";
        let values = parse_lines(text);
        assert_eq!(values.len(), 5);
        assert!(matches!(values[0], RawTimestamp::Components(_)));
        assert_eq!(values[1], RawTimestamp::Text("2025-06-15T10:30:00Z".into()));
        assert_eq!(values[2], RawTimestamp::Text("2025-06-15 10:30:00".into()));
        assert!(values[3].is_absent());
        assert!(values[4].is_absent());
    }

    #[test]
    fn test_read_nonempty() {
        assert_eq!(read_nonempty(&b""[..]).unwrap(), None);
        assert_eq!(
            read_nonempty(&b"null\n"[..]).unwrap().as_deref(),
            Some("null\n")
        );
    }

    #[test]
    fn test_read_error_is_reported() {
        let err = read_nonempty(&[0xff, 0xfe, b'\n'][..]).unwrap_err();
        assert!(err.to_string().contains("Failed to read timestamps from stdin"));
    }

    #[test]
    fn test_acquire_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{{\"year\":2025,\"monthValue\":6,\"dayOfMonth\":15}}").unwrap();
        writeln!(file, "not-a-date").unwrap();

        let values = acquire_timestamps(InputSource::File(file.path().to_path_buf())).unwrap();
        assert_eq!(values.len(), 2);
        assert!(matches!(values[0], RawTimestamp::Fields(_)));
        assert_eq!(values[1], RawTimestamp::Text("not-a-date".into()));
    }

    #[test]
    fn test_acquire_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = acquire_timestamps(InputSource::File(dir.path().join("nope.txt"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read timestamps"));
    }
}
