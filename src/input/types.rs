use std::path::PathBuf;

use compact_str::CompactString;

/// One circle descriptor read from the input, before store construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CircleRecord {
    /// 1-based line number in the input
    pub line: usize,
    /// Circle area (always > 0)
    pub area: u64,
    /// Optional CSS fill color (second column)
    pub color: Option<CompactString>,
    /// Optional display name (third column, may contain tabs)
    pub name: Option<CompactString>,
}

/// Fatal input problems. Any of these aborts the run before placement.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("could not read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("read error at line {line}")]
    Read {
        line: usize,
        #[source]
        source: std::io::Error,
    },
    #[error("bad number (out of range error) in input line {line}: {text:?}")]
    BadArea { line: usize, text: String },
    #[error("no circles in input")]
    Empty,
}
