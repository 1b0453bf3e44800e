//! Reading a stored report and undoing its transport encoding.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::fs;
use std::io::Read;
use std::path::Path;

use crate::error::{Result, ScanlensError};

/// File name analysis runs attach their report under.
pub const OUTPUT_FILE_NAME: &str = "output.json";

/// How the stored bytes are encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Encoding {
    /// Plain UTF-8 text.
    #[default]
    Plain,
    /// Base64 over UTF-8 text, as stored in document version bodies.
    Base64,
}

/// Reads `path`, or stdin when `path` is `-`.
///
/// # Errors
/// Returns error if the source cannot be read.
pub fn read_source(path: &Path) -> Result<Vec<u8>> {
    if path == Path::new("-") {
        let mut buf = Vec::new();
        std::io::stdin().read_to_end(&mut buf)?;
        return Ok(buf);
    }
    fs::read(path).map_err(|source| ScanlensError::Io {
        source,
        path: path.to_path_buf(),
    })
}

/// Decodes stored bytes into report text.
///
/// # Errors
/// Returns error if the base64 is malformed or the result is not UTF-8.
pub fn decode(bytes: Vec<u8>, encoding: Encoding) -> Result<String> {
    let text = match encoding {
        Encoding::Plain => bytes,
        Encoding::Base64 => {
            let compact: Vec<u8> = bytes
                .into_iter()
                .filter(|b| !b.is_ascii_whitespace())
                .collect();
            STANDARD.decode(compact)?
        }
    };
    let text = String::from_utf8(text)?;
    tracing::debug!(bytes = text.len(), ?encoding, "decoded report");
    Ok(text)
}

/// Reads and decodes a report in one step.
///
/// # Errors
/// Returns error if reading or decoding fails.
pub fn load_report(path: &Path, encoding: Encoding) -> Result<String> {
    decode(read_source(path)?, encoding)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_passes_through() {
        let text = decode(b"{\"a\":1}".to_vec(), Encoding::Plain);
        assert_eq!(text.ok().as_deref(), Some("{\"a\":1}"));
    }

    #[test]
    fn base64_decodes_unicode() {
        let encoded = STANDARD.encode("{\"message\":\"caf\u{e9}\"}");
        let text = decode(encoded.into_bytes(), Encoding::Base64);
        assert_eq!(text.ok().as_deref(), Some("{\"message\":\"caf\u{e9}\"}"));
    }

    #[test]
    fn base64_ignores_line_breaks() {
        let encoded = STANDARD.encode("hello world");
        let (a, b) = encoded.split_at(4);
        let wrapped = format!("{a}\n{b}\n");
        let text = decode(wrapped.into_bytes(), Encoding::Base64);
        assert_eq!(text.ok().as_deref(), Some("hello world"));
    }

    #[test]
    fn bad_base64_is_decode_error() {
        let err = decode(b"!!!".to_vec(), Encoding::Base64);
        assert!(matches!(err, Err(ScanlensError::Decode(_))));
    }

    #[test]
    fn invalid_utf8_is_decode_error() {
        let err = decode(vec![0xff, 0xfe], Encoding::Plain);
        assert!(matches!(err, Err(ScanlensError::Decode(_))));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = read_source(Path::new("/definitely/not/here.json"));
        assert!(matches!(err, Err(ScanlensError::Io { .. })));
    }
}
