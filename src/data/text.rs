//! Plain-text node files
//!
//! The first line holds the node count `n`; each of the next `n` lines holds
//! `x y r e p` separated by whitespace. Anything after those lines is ignored,
//! which lets a written network snapshot be read back as input.

use crate::data::NodeRecord;
use crate::error::DataError;
use crate::graph::{Node, NodeId};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// A record line that could not be turned into a node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    /// 1-based line number in the file
    pub line: usize,
    pub content: String,
    pub reason: String,
}

/// Result of reading a node file
#[derive(Debug, Clone, Default)]
pub struct NodeFile {
    /// Node count announced on the first line
    pub expected: usize,

    pub nodes: Vec<Node>,

    pub skipped: Vec<SkippedRecord>,

    /// Records announced but missing because the file ended early
    pub missing: usize,
}

/// Read nodes from a file, numbering them from `first_id`
pub fn read_nodes<P: AsRef<Path>>(path: P, first_id: NodeId) -> Result<NodeFile, DataError> {
    let path = path.as_ref();
    log::info!("Reading nodes from {}", path.display());

    let file = File::open(path)?;
    let parsed = parse_nodes(BufReader::new(file), first_id)?;

    log::info!(
        "Read {} of {} nodes from {} ({} skipped, {} missing)",
        parsed.nodes.len(),
        parsed.expected,
        path.display(),
        parsed.skipped.len(),
        parsed.missing
    );
    Ok(parsed)
}

/// Parse nodes from any buffered reader.
///
/// Node ids are `first_id + record index`, so a skipped record leaves a gap.
/// Lines that are not valid UTF-8 are skipped like any other malformed record.
pub fn parse_nodes<R: BufRead>(reader: R, first_id: NodeId) -> Result<NodeFile, DataError> {
    let mut lines = reader.split(b'\n');

    let header = lines.next().ok_or(DataError::MissingHeader)??;
    let header = String::from_utf8_lossy(&header);
    let expected: usize = header
        .trim()
        .parse()
        .map_err(|_| DataError::InvalidHeader {
            line: header.to_string(),
        })?;

    // The count is untrusted, so nothing is reserved up front
    let mut result = NodeFile {
        expected,
        ..NodeFile::default()
    };

    for index in 0..expected {
        let line_no = index + 2;
        let Some(raw) = lines.next() else {
            result.missing = expected - index;
            log::warn!(
                "Node file ended after {} of {} records",
                index,
                expected
            );
            break;
        };
        let raw = raw?;

        let parsed = std::str::from_utf8(&raw)
            .map_err(|_| "line is not valid UTF-8".to_string())
            .and_then(parse_record)
            .and_then(|record| {
                node_id(first_id, index)
                    .map(|id| record.into_node(id))
                    .ok_or_else(|| format!("node id {} + {} overflows", first_id, index))
            });

        match parsed {
            Ok(node) => result.nodes.push(node),
            Err(reason) => {
                let content = String::from_utf8_lossy(&raw).trim().to_string();
                log::warn!("Error parsing line {}: {:?} ({})", line_no, content, reason);
                result.skipped.push(SkippedRecord {
                    line: line_no,
                    content,
                    reason,
                });
            }
        }
    }

    Ok(result)
}

/// Id of the record at `index`, or `None` past the end of the id space
fn node_id(first_id: NodeId, index: usize) -> Option<NodeId> {
    NodeId::try_from(index)
        .ok()
        .and_then(|offset| first_id.checked_add(offset))
}

/// Parse one `x y r e p` line
pub fn parse_record(line: &str) -> Result<NodeRecord, String> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 5 {
        return Err(format!("expected 5 values, found {}", fields.len()));
    }

    let mut values = [0.0f64; 5];
    for (value, field) in values.iter_mut().zip(&fields) {
        let parsed: f64 = field
            .parse()
            .map_err(|_| format!("{:?} is not a number", field))?;
        if !parsed.is_finite() {
            return Err(format!("{:?} is not a finite number", field));
        }
        *value = parsed;
    }

    let [x, y, radio_range, energy, processing_power] = values;
    Ok(NodeRecord {
        x,
        y,
        radio_range,
        energy,
        processing_power,
    })
}
