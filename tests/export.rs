use rusty_cohp::data::demo::{demo_archive, demo_text};
use rusty_cohp::data::export::save_csv;
use rusty_cohp::data::loader::{load_archive, load_section};
use rusty_cohp::data::model::{ColumnLayout, CurveKind};

#[test]
fn demo_archive_loads_both_sections() {
    let bytes = demo_archive("CeCoAl4").unwrap();
    let ds = load_archive("CeCoAl4.zip", &bytes, ColumnLayout::Lobster, "demo").unwrap();
    let labels: Vec<String> = ds.pairs.iter().map(|p| p.to_string()).collect();
    assert_eq!(labels, ["Al-Al", "Al-Ce", "Al-Co", "Ce-Co", "Co-Co"]);
    for kind in CurveKind::ALL {
        let curves = ds.section(kind).curves().unwrap();
        assert_eq!(curves.interaction_count, 6);
        assert_eq!(curves.pairs, ds.pairs);
    }
}

#[test]
fn demo_cohp_is_bonding_positive_after_negation() {
    let section = load_section(CurveKind::Cohp, &demo_text(CurveKind::Cohp), ColumnLayout::Lobster);
    let curves = section.curves().unwrap();
    let al_co = curves
        .pairs
        .iter()
        .find(|p| p.to_string() == "Al-Co")
        .and_then(|p| curves.get(p))
        .unwrap();
    let peak = al_co.primary_sum.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    assert!(peak > 1.0, "peak {peak}");
}

#[test]
fn csv_export_writes_header_and_rows() {
    let section = load_section(CurveKind::Coop, &demo_text(CurveKind::Coop), ColumnLayout::Lobster);
    let curves = section.curves().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("coop.csv");
    save_csv(curves, &path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let mut lines = text.lines();
    let header = lines.next().unwrap();
    assert!(header.starts_with("energy,Al-Al,ICOOP Al-Al,Al-Ce"));
    assert_eq!(header.split(',').count(), 1 + 2 * curves.pairs.len());
    assert_eq!(lines.count(), curves.energy.len());
}
