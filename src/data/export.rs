use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use super::model::PairCurves;

/// Write the aggregated curves of one section as CSV.
///
/// Columns: `energy`, then for each pair in canonical order its primary sum
/// and its integrated sum (`Fe-O`, `ICOHP Fe-O`, ...).
pub fn write_csv<W: Write>(curves: &PairCurves, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = vec![String::from("energy")];
    for pair in &curves.pairs {
        header.push(pair.to_string());
        header.push(format!("{} {pair}", curves.kind.integrated_label()));
    }
    wtr.write_record(&header).context("writing CSV header")?;

    for (row, e) in curves.energy.iter().enumerate() {
        let mut record = vec![e.to_string()];
        for pair in &curves.pairs {
            let (p, i) = curves
                .get(pair)
                .map(|c| (c.primary_sum[row], c.integrated_sum[row]))
                .unwrap_or((0.0, 0.0));
            record.push(p.to_string());
            record.push(i.to_string());
        }
        wtr.write_record(&record)
            .with_context(|| format!("writing CSV row {row}"))?;
    }
    wtr.flush().context("flushing CSV")?;
    Ok(())
}

/// [`write_csv`] into a file at `path`.
pub fn save_csv(curves: &PairCurves, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_csv(curves, file)?;
    log::info!("{} curves written to {}", curves.kind, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::data::model::{AggregatedPairCurve, AtomPair, CurveKind};

    #[test]
    fn csv_has_one_column_pair_per_atom_pair() {
        let mut curves = BTreeMap::new();
        curves.insert(
            AtomPair::new("O", "Fe"),
            AggregatedPairCurve {
                primary_sum: vec![-5.0, -7.0],
                integrated_sum: vec![-1.5, -3.5],
            },
        );
        let pc = PairCurves {
            kind: CurveKind::Cohp,
            energy: vec![-8.0, 0.0],
            pairs: curves.keys().cloned().collect(),
            curves,
            interaction_count: 2,
        };
        let mut buf = Vec::new();
        write_csv(&pc, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "energy,Fe-O,ICOHP Fe-O\n-8,-5,-1.5\n0,-7,-3.5\n");
    }
}
