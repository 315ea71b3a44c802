use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use acceptance_viewer::data::model::Category;
use acceptance_viewer::state::StatusKind;

// ---------------------------------------------------------------------------
// Category colours
// ---------------------------------------------------------------------------

/// Base hue for each outcome, as sRGB bytes.
fn base_rgb(category: Category) -> Srgb<u8> {
    match category {
        Category::Oral => Srgb::new(0x58, 0x56, 0xD6),
        Category::Spotlight => Srgb::new(0x00, 0x7A, 0xFF),
        Category::Poster => Srgb::new(0x32, 0xD7, 0x4B),
        Category::Reject => Srgb::new(0xFF, 0x2D, 0x55),
    }
}

/// Fill colour for a category. Dark mode gets a lighter shade so bars keep
/// their contrast against the dark background.
pub fn category_color(category: Category, dark_mode: bool) -> Color32 {
    let base = base_rgb(category);
    if !dark_mode {
        return Color32::from_rgb(base.red, base.green, base.blue);
    }

    let mut hsl: Hsl = base.into_format::<f32>().into_color();
    hsl.lightness = (hsl.lightness + 0.12).min(0.85);
    let rgb: Srgb = hsl.into_color();
    let rgb: Srgb<u8> = rgb.into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

/// Text colour for the status line.
pub fn status_color(kind: StatusKind, dark_mode: bool) -> Color32 {
    match kind {
        StatusKind::Info if dark_mode => Color32::LIGHT_GRAY,
        StatusKind::Info => Color32::DARK_GRAY,
        StatusKind::Success => Color32::from_rgb(0x32, 0xD7, 0x4B),
        StatusKind::Warning => Color32::from_rgb(0xFF, 0x9F, 0x0A),
        StatusKind::Error => Color32::from_rgb(0xFF, 0x45, 0x3A),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brightness(c: Color32) -> u32 {
        c.r() as u32 + c.g() as u32 + c.b() as u32
    }

    #[test]
    fn test_light_mode_uses_base_hue() {
        assert_eq!(
            category_color(Category::Oral, false),
            Color32::from_rgb(0x58, 0x56, 0xD6)
        );
    }

    #[test]
    fn test_dark_mode_is_lighter() {
        for cat in Category::ALL {
            assert!(brightness(category_color(cat, true)) > brightness(category_color(cat, false)));
        }
    }
}
