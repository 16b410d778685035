use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::FormatError;

// ---------------------------------------------------------------------------
// AtomPair – canonical unordered pair of element symbols
// ---------------------------------------------------------------------------

/// Two element symbols, stored in canonical order.
///
/// `(A, B)` and `(B, A)` build the same value; the derived `Ord` compares the
/// canonical tuple lexicographically, which is the display order used for
/// colours, table rows and traces.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AtomPair {
    first: String,
    second: String,
}

impl AtomPair {
    /// Canonicalise two symbols: identical symbols stay `(A, A)`, otherwise
    /// they are sorted alphabetically.
    pub fn new(a: &str, b: &str) -> Self {
        let (first, second) = if a <= b { (a, b) } else { (b, a) };
        AtomPair {
            first: first.to_string(),
            second: second.to_string(),
        }
    }

    pub fn first(&self) -> &str {
        &self.first
    }

    pub fn second(&self) -> &str {
        &self.second
    }

    pub fn is_homonuclear(&self) -> bool {
        self.first == self.second
    }
}

impl fmt::Display for AtomPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.first, self.second)
    }
}

// ---------------------------------------------------------------------------
// CurveKind – COHP vs COOP
// ---------------------------------------------------------------------------

/// Which LOBSTER file a section came from. Decides the sign convention and
/// every label shown for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CurveKind {
    Cohp,
    Coop,
}

impl CurveKind {
    pub const ALL: [CurveKind; 2] = [CurveKind::Cohp, CurveKind::Coop];

    /// COHP is plotted as -COHP so bonding contributions point right.
    pub fn sign(self) -> f64 {
        match self {
            CurveKind::Cohp => -1.0,
            CurveKind::Coop => 1.0,
        }
    }

    /// Substring identifying this file inside an archive.
    pub fn member_token(self) -> &'static str {
        match self {
            CurveKind::Cohp => "COHPCAR",
            CurveKind::Coop => "COOPCAR",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CurveKind::Cohp => "COHP",
            CurveKind::Coop => "COOP",
        }
    }

    pub fn axis_title(self) -> &'static str {
        match self {
            CurveKind::Cohp => "-COHP",
            CurveKind::Coop => "COOP",
        }
    }

    pub fn integrated_label(self) -> &'static str {
        match self {
            CurveKind::Cohp => "ICOHP",
            CurveKind::Coop => "ICOOP",
        }
    }
}

impl fmt::Display for CurveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// InteractionRecord – one `No.<n>:` header line
// ---------------------------------------------------------------------------

/// One interaction block of the source file, in encounter order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionRecord {
    /// 0-based ordinal; selects the column group through [`ColumnLayout`].
    pub index: usize,
    pub pair: AtomPair,
}

// ---------------------------------------------------------------------------
// ColumnLayout – where interaction columns live
// ---------------------------------------------------------------------------

/// Positional contract between an interaction ordinal and its two columns.
///
/// LOBSTER writes `energy, pCOHP(avg), IpCOHP(avg)` before the first
/// interaction, so ordinal `i` lives at columns `3 + 2*i` and `4 + 2*i`.
/// `Bare` describes tables without the average block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnLayout {
    #[default]
    Lobster,
    Bare,
}

impl ColumnLayout {
    pub fn first_interaction_column(self) -> usize {
        match self {
            ColumnLayout::Lobster => 3,
            ColumnLayout::Bare => 1,
        }
    }

    /// `(primary, integrated)` column indices for interaction `index`.
    pub fn columns(self, index: usize) -> (usize, usize) {
        let primary = self.first_interaction_column() + 2 * index;
        (primary, primary + 1)
    }

    /// Number of complete interaction column groups in a matrix `n_cols` wide.
    pub fn column_groups(self, n_cols: usize) -> usize {
        n_cols.saturating_sub(self.first_interaction_column()) / 2
    }
}

// ---------------------------------------------------------------------------
// CurveMatrix – the numeric table
// ---------------------------------------------------------------------------

/// Row-major numeric table; column 0 is the energy axis.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CurveMatrix {
    n_rows: usize,
    n_cols: usize,
    values: Vec<f64>,
}

impl CurveMatrix {
    /// Build from parsed rows. `lines` gives the 1-based source line of each
    /// row for error reporting.
    pub fn from_rows(rows: Vec<Vec<f64>>, lines: &[usize]) -> Result<Self, FormatError> {
        let n_cols = rows.first().map_or(0, Vec::len);
        let mut values = Vec::with_capacity(rows.len() * n_cols);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n_cols {
                return Err(FormatError::RaggedRow {
                    line: lines.get(i).copied().unwrap_or(i + 1),
                    expected: n_cols,
                    found: row.len(),
                });
            }
            values.extend_from_slice(row);
        }
        Ok(CurveMatrix {
            n_rows: rows.len(),
            n_cols,
            values,
        })
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.n_rows && col < self.n_cols {
            Some(self.values[row * self.n_cols + col])
        } else {
            None
        }
    }

    /// Copy out one column, or `None` if it does not exist.
    pub fn column(&self, col: usize) -> Option<Vec<f64>> {
        if col >= self.n_cols {
            return None;
        }
        Some(
            self.values
                .chunks_exact(self.n_cols)
                .map(|row| row[col])
                .collect(),
        )
    }

    pub fn energy(&self) -> Vec<f64> {
        self.column(0).unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// ParsedFile – output of the interaction parser
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFile {
    pub energy: Vec<f64>,
    pub matrix: CurveMatrix,
    pub interactions: Vec<InteractionRecord>,
}

// ---------------------------------------------------------------------------
// Aggregated curves
// ---------------------------------------------------------------------------

/// Element-wise sums over every interaction resolving to one pair.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedPairCurve {
    pub primary_sum: Vec<f64>,
    pub integrated_sum: Vec<f64>,
}

/// All aggregated curves of one section, aligned to `energy`.
#[derive(Debug, Clone, PartialEq)]
pub struct PairCurves {
    pub kind: CurveKind,
    pub energy: Vec<f64>,
    pub curves: BTreeMap<AtomPair, AggregatedPairCurve>,
    /// Sorted distinct pairs; the stable enumeration order.
    pub pairs: Vec<AtomPair>,
    /// Number of interaction records the file declared.
    pub interaction_count: usize,
}

impl PairCurves {
    pub fn get(&self, pair: &AtomPair) -> Option<&AggregatedPairCurve> {
        self.curves.get(pair)
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Section / Dataset – one upload
// ---------------------------------------------------------------------------

/// State of one curve kind within an upload.
///
/// `Absent` (no such file) and `Loaded` with zero pairs (file present, no
/// recognised interactions) are deliberately distinct.
#[derive(Debug, Clone, PartialEq)]
pub enum Section {
    Absent,
    Failed(String),
    Loaded(PairCurves),
}

impl Section {
    pub fn curves(&self) -> Option<&PairCurves> {
        match self {
            Section::Loaded(curves) => Some(curves),
            _ => None,
        }
    }

    pub fn is_present(&self) -> bool {
        !matches!(self, Section::Absent)
    }

    /// Human-readable notice for anything short of a plottable section.
    pub fn notice(&self, kind: CurveKind) -> Option<String> {
        match self {
            Section::Absent => Some(format!(
                "No {} file found in the upload.",
                kind.member_token()
            )),
            Section::Failed(reason) => Some(format!("{kind} could not be read: {reason}")),
            Section::Loaded(curves) if curves.is_empty() => Some(format!(
                "{} contains no recognised interactions.",
                kind.member_token()
            )),
            Section::Loaded(_) => None,
        }
    }
}

/// Everything parsed from one upload. Replaced wholesale by the next one.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Display name, usually the archive stem.
    pub name: String,
    pub cohp: Section,
    pub coop: Section,
    /// Sorted union of both sections' pairs; indexes the shared pair table.
    pub pairs: Vec<AtomPair>,
}

impl Dataset {
    /// Assemble a dataset and derive the shared pair list.
    pub fn from_sections(name: String, cohp: Section, coop: Section) -> Self {
        let pairs: BTreeSet<AtomPair> = [&cohp, &coop]
            .into_iter()
            .filter_map(Section::curves)
            .flat_map(|c| c.pairs.iter().cloned())
            .collect();
        Dataset {
            name,
            cohp,
            coop,
            pairs: pairs.into_iter().collect(),
        }
    }

    pub fn section(&self, kind: CurveKind) -> &Section {
        match kind {
            CurveKind::Cohp => &self.cohp,
            CurveKind::Coop => &self.coop,
        }
    }
}
