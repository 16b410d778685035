use std::fmt::Write as _;
use std::io::{Cursor, Write};

use anyhow::{Context, Result};
use zip::ZipWriter;
use zip::write::FileOptions;

use super::model::CurveKind;

/// Energy grid of the synthetic files (eV, relative to E_F).
const E_MIN: f64 = -10.0;
const E_MAX: f64 = 5.0;
const N_POINTS: usize = 301;

/// `(label, bond length, strength, bonding centre, antibonding centre)`
const INTERACTIONS: [(&str, f64, f64, f64, f64); 6] = [
    ("Ce1->Al1", 3.21, 0.35, -3.0, 1.5),
    ("Ce1->Co1", 3.05, 0.50, -2.2, 1.0),
    ("Co1->Al1", 2.45, 1.10, -4.5, 0.8),
    ("Co1->Al2", 2.51, 0.90, -4.8, 1.2),
    ("Al1->Al2", 2.78, 0.70, -6.0, 2.5),
    ("Co1->Co2", 2.88, 0.40, -1.5, -0.3),
];

fn gaussian(x: f64, mu: f64, sigma: f64) -> f64 {
    (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

fn energies() -> Vec<f64> {
    let step = (E_MAX - E_MIN) / (N_POINTS - 1) as f64;
    (0..N_POINTS).map(|i| E_MIN + i as f64 * step).collect()
}

/// Bonding-positive overlap profile of one interaction.
fn profile(energy: &[f64], strength: f64, bonding: f64, antibonding: f64) -> Vec<f64> {
    energy
        .iter()
        .map(|&e| strength * (gaussian(e, bonding, 0.8) - 0.6 * gaussian(e, antibonding, 0.6)))
        .collect()
}

/// Running trapezoidal integral up to the Fermi level, held constant above.
fn integrate(energy: &[f64], values: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len());
    let mut acc = 0.0;
    for i in 0..values.len() {
        if i > 0 && energy[i] <= 0.0 {
            acc += 0.5 * (values[i] + values[i - 1]) * (energy[i] - energy[i - 1]);
        }
        out.push(acc);
    }
    out
}

/// A LOBSTER-style COHPCAR/COOPCAR text with six Ce/Co/Al interactions.
///
/// COHP values carry LOBSTER's sign (bonding negative); COOP values are
/// bonding positive.
pub fn demo_text(kind: CurveKind) -> String {
    let energy = energies();
    let sign = kind.sign();
    let columns: Vec<(Vec<f64>, Vec<f64>)> = INTERACTIONS
        .iter()
        .map(|&(_, _, strength, bonding, antibonding)| {
            // COOP magnitudes are an order of magnitude below COHP ones
            let scale = match kind {
                CurveKind::Cohp => 1.0,
                CurveKind::Coop => 0.1,
            };
            let primary: Vec<f64> = profile(&energy, strength * scale, bonding, antibonding)
                .into_iter()
                .map(|v| sign * v)
                .collect();
            let integrated = integrate(&energy, &primary);
            (primary, integrated)
        })
        .collect();

    let mut out = String::new();
    let _ = writeln!(out, "{}.lobster (synthetic demo)", kind.member_token());
    let _ = writeln!(
        out,
        "{:>8}{:>8}{:>8}{:>12.5}{:>12.5}{:>12.5}",
        INTERACTIONS.len() + 1,
        1,
        N_POINTS,
        E_MIN,
        E_MAX,
        0.0
    );
    let _ = writeln!(out, "Average");
    for (i, (label, length, ..)) in INTERACTIONS.iter().enumerate() {
        let _ = writeln!(out, "No.{}:{label}({length:.3})", i + 1);
    }

    let n = INTERACTIONS.len() as f64;
    for (row, e) in energy.iter().enumerate() {
        let avg: f64 = columns.iter().map(|(p, _)| p[row]).sum::<f64>() / n;
        let iavg: f64 = columns.iter().map(|(_, i)| i[row]).sum::<f64>() / n;
        let _ = write!(out, "{e:>12.5} {avg:>12.5} {iavg:>12.5}");
        for (p, i) in &columns {
            let _ = write!(out, " {:>12.5} {:>12.5}", p[row], i[row]);
        }
        out.push('\n');
    }
    out
}

/// Zip archive holding `<name>/COHPCAR.lobster` and `<name>/COOPCAR.lobster`.
pub fn demo_archive(name: &str) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for kind in CurveKind::ALL {
        let member = format!("{name}/{}.lobster", kind.member_token());
        zip.start_file(member.as_str(), FileOptions::default())
            .with_context(|| format!("adding {member}"))?;
        zip.write_all(demo_text(kind).as_bytes())
            .with_context(|| format!("writing {member}"))?;
    }
    let cursor = zip.finish().context("finishing demo archive")?;
    Ok(cursor.into_inner())
}
