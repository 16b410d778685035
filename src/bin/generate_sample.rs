use std::path::PathBuf;

use anyhow::{Context, Result};
use rusty_cohp::data::demo::demo_archive;

/// Write the synthetic demo archive to `<name>.zip` (default `CeCoAl4.zip`).
fn main() -> Result<()> {
    env_logger::init();

    let name = std::env::args().nth(1).unwrap_or_else(|| String::from("CeCoAl4"));
    let bytes = demo_archive(&name)?;

    let output_path = PathBuf::from(format!("{name}.zip"));
    std::fs::write(&output_path, &bytes)
        .with_context(|| format!("writing {}", output_path.display()))?;

    println!(
        "Wrote COHPCAR and COOPCAR demo files ({} bytes) to {}",
        bytes.len(),
        output_path.display()
    );
    Ok(())
}
