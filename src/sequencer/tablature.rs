// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Tablature parser.
//!
//! A tablature is a text stream made only of lines of the form
//!
//! ```text
//! HH|..o...o...o...o.
//! SD|....o.......o...
//! BD|o...o...o...o...
//! ```
//!
//! i.e. a unique two letter drum name, a vertical bar, then a pattern where
//! `.` and `-` are pauses and any other character is a hit. Only single-byte
//! character sets are supported: positions are counted in bytes.

use std::io::{self, BufRead, BufReader, Read};

use thiserror::Error;
use tracing::debug;

use super::{DrumKit, DrumTab};

/// Bytes that mark a pause in a pattern
const PAUSES: [u8; 2] = [b'.', b'-'];

/// Width of a drum name
const NAME_LEN: usize = 2;

/// Position of the bar separating the name from the pattern
const BAR_INDEX: usize = NAME_LEN;

/// Shortest acceptable line: name, bar and at least one pattern byte
const MIN_LINE_LEN: usize = NAME_LEN + 2;

/// Broad classification of a [`TabError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabErrorKind {
    /// Malformed line, duplicated drum, or nothing to play
    InvalidFormat,
    /// A drum the kit does not recognise
    UnknownDrum,
    /// The underlying reader failed
    Io,
}

/// Errors returned by [`read_tab`]
#[derive(Error, Debug)]
pub enum TabError {
    /// The line is too short or has no bar after the drum name
    #[error("invalid tablature: line {line}")]
    BadLine { line: usize },

    /// A drum has more than one line
    #[error("invalid tablature: line {line}: drum {name:?} already has a line")]
    DuplicateDrum { line: usize, name: String },

    /// No lines, or no pattern on any line
    #[error("invalid tablature: nothing to play")]
    Empty,

    /// The kit has no drum with this name
    #[error("unknown drum: {name:?}")]
    UnknownDrum { name: String },

    /// Reading the input failed
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl TabError {
    /// Classify this error
    pub fn kind(&self) -> TabErrorKind {
        match self {
            TabError::BadLine { .. } | TabError::DuplicateDrum { .. } | TabError::Empty => {
                TabErrorKind::InvalidFormat
            }
            TabError::UnknownDrum { .. } => TabErrorKind::UnknownDrum,
            TabError::Io(_) => TabErrorKind::Io,
        }
    }

    /// The 1-based line number, where one applies
    pub fn line(&self) -> Option<usize> {
        match self {
            TabError::BadLine { line } | TabError::DuplicateDrum { line, .. } => Some(*line),
            _ => None,
        }
    }
}

/// A validated drum line
struct DrumLine {
    name: String,
    pattern: Vec<u8>,
}

impl DrumLine {
    /// Whether the pattern hits at `pos`; past the end is silence
    fn hits_at(&self, pos: usize) -> bool {
        self.pattern
            .get(pos)
            .is_some_and(|b| !PAUSES.contains(b))
    }
}

/// Read a tablature from `reader`, building its steps with `kit`.
///
/// Lines are validated in order and the first problem aborts the read.
/// Once every line is accepted, one step per pattern column is allocated
/// and each drum is composed into the steps it hits, visiting the drums in
/// the order their lines appeared. Lines shorter than the widest one are
/// silent for the remaining columns.
pub fn read_tab<R: Read>(reader: R, kit: &dyn DrumKit) -> Result<DrumTab, TabError> {
    let lines = scan_lines(BufReader::new(reader), kit)?;

    let width = lines.iter().map(|l| l.pattern.len()).max().unwrap_or(0);
    if width == 0 {
        return Err(TabError::Empty);
    }

    let names = lines.iter().map(|l| l.name.clone()).collect();
    let mut tab = DrumTab::with_width(kit, width, names);
    for line in &lines {
        for (pos, step) in tab.steps_mut().iter_mut().enumerate() {
            if line.hits_at(pos) {
                step.add_drum(&line.name);
            }
        }
    }

    debug!(drums = lines.len(), steps = width, "read tablature");
    Ok(tab)
}

/// Validate every line of the input
fn scan_lines<R: BufRead>(mut reader: R, kit: &dyn DrumKit) -> Result<Vec<DrumLine>, TabError> {
    let mut lines: Vec<DrumLine> = Vec::new();
    let mut buf = Vec::new();
    let mut line_no = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no += 1;
        let text = trim_line_ending(&buf);

        // Is the line prefix valid?
        if text.len() < MIN_LINE_LEN || text[BAR_INDEX] != b'|' {
            return Err(TabError::BadLine { line: line_no });
        }

        // Is the drum known to the kit?
        let name = String::from_utf8_lossy(&text[..NAME_LEN]).into_owned();
        if !kit.has_drum(&name) {
            return Err(TabError::UnknownDrum { name });
        }

        // Is this the drum's only line?
        if lines.iter().any(|l| l.name == name) {
            return Err(TabError::DuplicateDrum {
                line: line_no,
                name,
            });
        }

        lines.push(DrumLine {
            name,
            pattern: text[BAR_INDEX + 1..].to_vec(),
        });
    }

    Ok(lines)
}

/// Strip a trailing `\n` or `\r\n`
fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequencer::testkit::TestKit;

    fn step_strings(tab: &DrumTab) -> Vec<String> {
        tab.steps().iter().map(|s| format!("{:?}", s)).collect()
    }

    #[test]
    fn test_short_line_is_invalid() {
        let err = read_tab("D1|\n".as_bytes(), &TestKit::default()).unwrap_err();
        assert_eq!(err.kind(), TabErrorKind::InvalidFormat);
        assert_eq!(err.line(), Some(1));
    }

    #[test]
    fn test_missing_bar_is_invalid() {
        let err = read_tab("D1|o.\nD2:o.\n".as_bytes(), &TestKit::default()).unwrap_err();
        assert!(matches!(err, TabError::BadLine { line: 2 }));
    }

    #[test]
    fn test_blank_line_is_invalid() {
        let err = read_tab("D1|o.\n\nD2|o.\n".as_bytes(), &TestKit::default()).unwrap_err();
        assert!(matches!(err, TabError::BadLine { line: 2 }));
    }

    #[test]
    fn test_unknown_drum() {
        let err = read_tab("D3|.\n".as_bytes(), &TestKit::default()).unwrap_err();
        assert_eq!(err.kind(), TabErrorKind::UnknownDrum);
        assert!(matches!(err, TabError::UnknownDrum { ref name } if name == "D3"));
    }

    #[test]
    fn test_drum_names_are_case_sensitive() {
        let err = read_tab("d1|o\n".as_bytes(), &TestKit::default()).unwrap_err();
        assert_eq!(err.kind(), TabErrorKind::UnknownDrum);
    }

    #[test]
    fn test_format_checked_before_drum_name() {
        let err = read_tab("D3.o\n".as_bytes(), &TestKit::default()).unwrap_err();
        assert_eq!(err.kind(), TabErrorKind::InvalidFormat);
    }

    #[test]
    fn test_duplicate_drum() {
        let err = read_tab("D1|.\nD1|o\n".as_bytes(), &TestKit::default()).unwrap_err();
        assert_eq!(err.kind(), TabErrorKind::InvalidFormat);
        assert!(matches!(err, TabError::DuplicateDrum { line: 2, ref name } if name == "D1"));
    }

    #[test]
    fn test_empty_input() {
        let err = read_tab("".as_bytes(), &TestKit::default()).unwrap_err();
        assert!(matches!(err, TabError::Empty));
        assert_eq!(err.kind(), TabErrorKind::InvalidFormat);
        assert_eq!(err.line(), None);
    }

    #[test]
    fn test_parse_tablature() {
        let tab = read_tab("D1|..o.\nD2|o.o.\n".as_bytes(), &TestKit::default()).unwrap();
        assert_eq!(tab.len(), 4);
        assert_eq!(step_strings(&tab), vec!["D2", "_", "D1+D2", "_"]);
        assert_eq!(tab.drums(), &["D1".to_string(), "D2".to_string()]);
    }

    #[test]
    fn test_dash_is_a_pause() {
        let tab = read_tab("D1|-x-.\n".as_bytes(), &TestKit::default()).unwrap();
        assert_eq!(step_strings(&tab), vec!["_", "D1", "_", "_"]);
    }

    #[test]
    fn test_short_pattern_does_not_repeat() {
        let tab = read_tab("D1|oo\nD2|.o.o\n".as_bytes(), &TestKit::default()).unwrap();
        assert_eq!(step_strings(&tab), vec!["D1", "D1+D2", "_", "D2"]);
    }

    #[test]
    fn test_crlf_and_missing_final_newline() {
        let tab = read_tab("D1|o.\r\nD2|.o".as_bytes(), &TestKit::default()).unwrap();
        assert_eq!(step_strings(&tab), vec!["D1", "D2"]);
    }

    #[test]
    fn test_parse_is_repeatable() {
        let text = "D2|o.o.o\nD1|.oo..\n";
        let first = read_tab(text.as_bytes(), &TestKit::default()).unwrap();
        let second = read_tab(text.as_bytes(), &TestKit::default()).unwrap();
        assert_eq!(step_strings(&first), step_strings(&second));
        assert_eq!(format!("{:?}", first), format!("{:?}", second));
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone"))
        }
    }

    #[test]
    fn test_read_failure_is_propagated() {
        let err = read_tab(FailingReader, &TestKit::default()).unwrap_err();
        assert_eq!(err.kind(), TabErrorKind::Io);
        match err {
            TabError::Io(e) => assert_eq!(e.kind(), io::ErrorKind::BrokenPipe),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            TabError::BadLine { line: 3 }.to_string(),
            "invalid tablature: line 3"
        );
        assert_eq!(
            TabError::UnknownDrum { name: "XX".into() }.to_string(),
            "unknown drum: \"XX\""
        );
    }
}
