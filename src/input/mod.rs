pub mod types;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use compact_str::CompactString;

use self::types::{CircleRecord, InputError};

/// Read circle descriptors from a file.
pub fn read_records(path: &Path) -> Result<Vec<CircleRecord>, InputError> {
    let file = File::open(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!("Reading circles from {}", path.display());
    parse_records(BufReader::new(file))
}

/// Parse `AREA[\tCOLOR[\tNAME]]` lines. Blank lines are skipped.
pub fn parse_records<R: BufRead>(reader: R) -> Result<Vec<CircleRecord>, InputError> {
    let mut records = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line_no = i + 1;
        let line = line.map_err(|source| InputError::Read {
            line: line_no,
            source,
        })?;
        if let Some(record) = parse_line(line_no, &line)? {
            records.push(record);
        }
    }

    if records.is_empty() {
        return Err(InputError::Empty);
    }

    tracing::debug!("{} records are read in", records.len());
    Ok(records)
}

fn parse_line(line_no: usize, line: &str) -> Result<Option<CircleRecord>, InputError> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return Ok(None);
    }

    let mut columns = line.splitn(3, '\t');
    let area_text = columns.next().unwrap_or_default().trim();
    let area = match area_text.parse::<u64>() {
        Ok(area) if area > 0 => area,
        _ => {
            return Err(InputError::BadArea {
                line: line_no,
                text: area_text.to_string(),
            })
        }
    };

    let color = columns.next().and_then(non_empty);
    let name = columns.next().and_then(non_empty);
    if color.is_some() || name.is_some() {
        tracing::trace!("line {}: color={:?}, name={:?}", line_no, color, name);
    }

    Ok(Some(CircleRecord {
        line: line_no,
        area,
        color,
        name,
    }))
}

fn non_empty(s: &str) -> Option<CompactString> {
    (!s.is_empty()).then(|| CompactString::new(s))
}
