use std::path::Path;

use anyhow::{Context, Result, bail};

use super::aggregate::aggregate;
use super::archive::{MemberText, extract_members};
use super::model::{ColumnLayout, CurveKind, Dataset, Section};
use super::parser::parse;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a dataset from disk.  Dispatch by extension.
///
/// Supported inputs:
/// * `.zip` – archive with a `COHPCAR` and/or `COOPCAR` member
/// * any file whose name contains `COHPCAR` or `COOPCAR` – that one section
pub fn load_file(path: &Path, layout: ColumnLayout, fallback_name: &str) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");

    if ext == "zip" {
        let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        return load_archive(file_name, &bytes, layout, fallback_name);
    }

    let Some(kind) = CurveKind::ALL
        .into_iter()
        .find(|k| file_name.contains(k.member_token()))
    else {
        bail!("Unsupported file: {file_name} (expected a .zip or a COHPCAR/COOPCAR file)");
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {} as UTF-8 text", path.display()))?;

    // A bare LOBSTER file is named after its calculation directory.
    let parent = path
        .parent()
        .and_then(|p| p.file_name())
        .and_then(|n| n.to_str());
    let name = dataset_name(parent, fallback_name);

    let section = load_section(kind, &text, layout);
    let (cohp, coop) = match kind {
        CurveKind::Cohp => (section, Section::Absent),
        CurveKind::Coop => (Section::Absent, section),
    };
    Ok(Dataset::from_sections(name, cohp, coop))
}

/// Load a dataset from an in-memory zip archive.
///
/// Fails only when the archive itself is unreadable; problems with one
/// member end up in that member's [`Section`].
pub fn load_archive(
    file_name: &str,
    bytes: &[u8],
    layout: ColumnLayout,
    fallback_name: &str,
) -> Result<Dataset> {
    let contents = extract_members(bytes)
        .inspect_err(|e| log::error!("{file_name}: {e}"))
        .with_context(|| format!("opening archive {file_name}"))?;

    let stem = Path::new(file_name).file_stem().and_then(|s| s.to_str());
    let name = dataset_name(stem, fallback_name);

    let cohp = member_section(CurveKind::Cohp, contents.cohp, layout);
    let coop = member_section(CurveKind::Coop, contents.coop, layout);
    Ok(Dataset::from_sections(name, cohp, coop))
}

/// Parse and aggregate the text of one file.
pub fn load_section(kind: CurveKind, text: &str, layout: ColumnLayout) -> Section {
    match parse(text) {
        Ok(parsed) => {
            let curves = aggregate(&parsed, kind, layout);
            log::info!(
                "{kind}: {} energies, {} interactions, {} pairs",
                curves.energy.len(),
                curves.interaction_count,
                curves.pairs.len()
            );
            Section::Loaded(curves)
        }
        Err(e) => {
            log::warn!("{kind}: {e}");
            Section::Failed(e.to_string())
        }
    }
}

/// Stem of the upload, or `fallback` when there is nothing usable.
pub fn dataset_name(stem: Option<&str>, fallback: &str) -> String {
    match stem.map(str::trim) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => fallback.to_string(),
    }
}

fn member_section(kind: CurveKind, member: Option<MemberText>, layout: ColumnLayout) -> Section {
    let Some(member) = member else {
        return Section::Absent;
    };
    match member.text {
        Ok(text) => {
            log::info!("{kind}: reading {}", member.name);
            load_section(kind, &text, layout)
        }
        Err(e) => Section::Failed(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_falls_back_when_missing_or_blank() {
        assert_eq!(dataset_name(Some("CeCoAl4"), "demo"), "CeCoAl4");
        assert_eq!(dataset_name(Some("  "), "demo"), "demo");
        assert_eq!(dataset_name(None, "demo"), "demo");
    }

    #[test]
    fn section_failure_keeps_the_message() {
        let section = load_section(CurveKind::Coop, "nothing here\n", ColumnLayout::Lobster);
        assert_eq!(section, Section::Failed("no data header".to_string()));
    }

    #[test]
    fn section_with_no_records_is_loaded_but_empty() {
        let text = "No.1 unlabeled\n-1.0 0.0 0.0\n0.0 0.0 0.0\n";
        let section = load_section(CurveKind::Cohp, text, ColumnLayout::Lobster);
        let curves = section.curves().unwrap();
        assert!(curves.is_empty());
        assert_eq!(curves.energy, vec![-1.0, 0.0]);
    }
}
