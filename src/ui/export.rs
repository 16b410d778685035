use std::path::Path;

use anyhow::{Context, Result, bail};
use eframe::egui::{ColorImage, Rect};

/// Crop a viewport screenshot to `rect` (in points) and save it as PNG.
pub fn save_region_png(image: &ColorImage, rect: Rect, pixels_per_point: f32, path: &Path) -> Result<()> {
    let region = image.region(&rect, Some(pixels_per_point));
    let [width, height] = region.size;
    if width == 0 || height == 0 {
        bail!("plot area is empty");
    }

    let rgba: Vec<u8> = region
        .pixels
        .iter()
        .flat_map(|c| c.to_srgba_unmultiplied())
        .collect();

    image::save_buffer(
        path,
        &rgba,
        width as u32,
        height as u32,
        image::ExtendedColorType::Rgba8,
    )
    .with_context(|| format!("writing {}", path.display()))
}
