use eframe::egui::Color32;
use palette::Srgb;

// ---------------------------------------------------------------------------
// Named colours for pair traces
// ---------------------------------------------------------------------------

/// Colour used when a pair has no usable colour name.
pub const FALLBACK_COLOR: Color32 = Color32::from_rgb(0, 0, 255);

/// Resolve a CSS/SVG colour name (`"orange"`, `"silver"`, ...).
pub fn named_color(name: &str) -> Option<Color32> {
    let rgb: Srgb<u8> = palette::named::from_str(&name.trim().to_ascii_lowercase())?;
    Some(Color32::from_rgb(rgb.red, rgb.green, rgb.blue))
}

/// [`named_color`], falling back to [`FALLBACK_COLOR`].
pub fn color_or_default(name: &str) -> Color32 {
    named_color(name).unwrap_or_else(|| {
        log::warn!("unknown colour name '{name}', using blue");
        FALLBACK_COLOR
    })
}

// ---------------------------------------------------------------------------
// Palette helpers
// ---------------------------------------------------------------------------

/// The subset of `names` that resolve to a colour, in order.
pub fn valid_names(names: &[String]) -> Vec<String> {
    names
        .iter()
        .filter(|n| named_color(n).is_some())
        .cloned()
        .collect()
}
