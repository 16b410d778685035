use std::sync::LazyLock;

use regex::Regex;

use super::error::FormatError;
use super::model::{AtomPair, CurveMatrix, InteractionRecord, ParsedFile};

/// Token opening the first interaction line; the numeric table follows it.
const DATA_HEADER: &str = "No.1";
/// Prefix of every interaction line.
const INTERACTION_PREFIX: &str = "No.";

static NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[-+]?\d+\.?\d*([eE][-+]?\d+)?$").expect("number pattern compiles")
});

static PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r":([A-Za-z]+)\d+->([A-Za-z]+)\d+\(").expect("pair pattern compiles")
});

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Parse one COHPCAR/COOPCAR text into its energy axis, numeric table and
/// ordered interaction list.
///
/// The two header heuristics run independently: the numeric table is
/// everything after the first `No.1` line whose first token looks like a
/// number, while interaction records come from every `No.` line anywhere in
/// the text that carries a `:<El><n>-><El><n>(` label.
pub fn parse(text: &str) -> Result<ParsedFile, FormatError> {
    let lines: Vec<&str> = text.lines().collect();

    let header = find_data_header(&lines).ok_or(FormatError::MissingHeader)?;
    log::debug!("data header on line {}", header + 1);

    let mut rows = Vec::new();
    let mut row_lines = Vec::new();
    for (offset, line) in lines[header + 1..].iter().enumerate() {
        if !is_numeric_row(line) {
            continue;
        }
        let line_no = header + offset + 2;
        rows.push(parse_row(line, line_no)?);
        row_lines.push(line_no);
    }
    if rows.is_empty() {
        return Err(FormatError::NoNumericRows);
    }

    let matrix = CurveMatrix::from_rows(rows, &row_lines)?;
    let interactions = parse_interactions(&lines);
    log::debug!(
        "{} numeric rows x {} columns, {} interaction records",
        matrix.n_rows(),
        matrix.n_cols(),
        interactions.len()
    );

    Ok(ParsedFile {
        energy: matrix.energy(),
        matrix,
        interactions,
    })
}

// ---------------------------------------------------------------------------
// Heuristics
// ---------------------------------------------------------------------------

/// Index of the first line whose trimmed text starts with `No.1`.
pub fn find_data_header(lines: &[&str]) -> Option<usize> {
    lines
        .iter()
        .position(|line| line.trim().starts_with(DATA_HEADER))
}

/// A row counts as data when its first whitespace-separated token is a
/// decimal or scientific-notation number.
pub fn is_numeric_row(line: &str) -> bool {
    line.split_whitespace()
        .next()
        .is_some_and(|token| NUMBER.is_match(token))
}

/// Extract the canonical pair from a `No.<n>:<El><i>-><El><j>(...)` line.
///
/// Returns `None` for lines that are not interaction lines or whose label
/// does not match; such lines never produce a record.
pub fn parse_pair_line(line: &str) -> Option<AtomPair> {
    let trimmed = line.trim();
    if !trimmed.starts_with(INTERACTION_PREFIX) {
        return None;
    }
    let caps = PAIR.captures(trimmed)?;
    Some(AtomPair::new(&caps[1], &caps[2]))
}

/// Collect interaction records in encounter order.
pub fn parse_interactions(lines: &[&str]) -> Vec<InteractionRecord> {
    lines
        .iter()
        .filter_map(|line| parse_pair_line(line))
        .enumerate()
        .map(|(index, pair)| InteractionRecord { index, pair })
        .collect()
}

fn parse_row(line: &str, line_no: usize) -> Result<Vec<f64>, FormatError> {
    line.split_whitespace()
        .map(|token| {
            token.parse::<f64>().map_err(|_| FormatError::InvalidNumber {
                line: line_no,
                token: token.to_string(),
            })
        })
        .collect()
}
