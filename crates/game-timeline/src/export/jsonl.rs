use crate::errors::TlError;
use crate::model::{FooterLine, HeaderLine, JsonlLine, RecordLine, Timeline};
use chrono::Utc;
use serde_json::to_string;
use std::collections::HashSet;
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const EXPORT_VERSION: &str = "v1";

/// Header, one line per record in timeline order, footer. `notable` holds the
/// indexes of records that survived the significant-event filter.
pub fn build_lines(timeline: &Timeline, notable: &HashSet<usize>) -> Vec<JsonlLine> {
    let mut lines = Vec::with_capacity(timeline.len() + 2);
    lines.push(JsonlLine::Header(HeaderLine {
        export_version: EXPORT_VERSION,
        generated_at: Utc::now(),
        game_pk: timeline.game_pk,
    }));
    for (index, record) in timeline.iter().enumerate() {
        lines.push(JsonlLine::Record(RecordLine {
            index,
            notable: notable.contains(&index),
            record: record.clone(),
        }));
    }
    lines.push(JsonlLine::Footer(FooterLine {
        total_records: timeline.len(),
        notable_records: notable.len(),
    }));
    lines
}

pub fn serialize_lines(lines: &[JsonlLine], max_line_bytes: usize) -> Result<Vec<String>, TlError> {
    let mut serialized = Vec::with_capacity(lines.len());
    for line in lines {
        let json = to_string(line).map_err(|err| TlError::Internal(err.to_string()))?;
        if json.len() > max_line_bytes {
            return Err(TlError::Oversize);
        }
        serialized.push(json);
    }
    Ok(serialized)
}

pub fn write_lines(path: &Path, lines: &[String]) -> Result<PathBuf, TlError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent)?;
        }
    }

    let mut writer = BufWriter::new(File::create(path)?);
    for line in lines {
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;

    Ok(path.to_path_buf())
}
