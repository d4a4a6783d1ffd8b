//! Text color selection for colored page backgrounds.
//!
//! Finder windows can carry an explicit background color, which the page
//! adopts. Text on top of it picks white or black from the background's WCAG
//! relative luminance, with the threshold set low (0.1791, roughly a 46%
//! gray) so mid-tone backgrounds keep white text.

/// Luminance at or below which text stays white.
const WHITE_TEXT_MAX_LUMINANCE: f64 = 0.1791;

/// Page text color for a colored background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextColor {
    White,
    Black,
}

impl TextColor {
    /// CSS keyword for the color.
    pub fn as_css(self) -> &'static str {
        match self {
            TextColor::White => "white",
            TextColor::Black => "black",
        }
    }
}

/// WCAG relative luminance of an sRGB color, 0.0 (black) to 1.0 (white).
///
/// Channels are gamma-expanded per the WCAG 2.x definition before the
/// weighted sum, so the result tracks perceived brightness rather than raw
/// channel values.
pub fn relative_luminance(r: u8, g: u8, b: u8) -> f64 {
    0.2126 * linearize(r) + 0.7152 * linearize(g) + 0.0722 * linearize(b)
}

/// Linearize one sRGB channel.
fn linearize(channel: u8) -> f64 {
    let c = f64::from(channel) / 255.0;
    if c <= 0.03928 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Pick white or black text for the given background color.
pub fn pick_text_color(r: u8, g: u8, b: u8) -> TextColor {
    text_color_for_luminance(relative_luminance(r, g, b))
}

fn text_color_for_luminance(luminance: f64) -> TextColor {
    if luminance <= WHITE_TEXT_MAX_LUMINANCE {
        TextColor::White
    } else {
        TextColor::Black
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn black_background_gets_white_text() {
        assert_eq!(pick_text_color(0, 0, 0), TextColor::White);
    }

    #[test]
    fn white_background_gets_black_text() {
        assert_eq!(pick_text_color(255, 255, 255), TextColor::Black);
    }

    #[test]
    fn pure_blue_gets_white_text() {
        // Blue carries only 0.0722 of the luminance weight.
        assert_eq!(pick_text_color(0, 0, 255), TextColor::White);
    }

    #[test]
    fn pure_red_gets_black_text() {
        // Red luminance is 0.2126, just above the threshold.
        assert_eq!(pick_text_color(255, 0, 0), TextColor::Black);
    }

    #[test]
    fn pure_green_gets_black_text() {
        assert_eq!(pick_text_color(0, 255, 0), TextColor::Black);
    }

    #[test]
    fn maroon_gets_white_text() {
        // (128, 0, 0): luminance ≈ 0.0459
        assert_eq!(pick_text_color(128, 0, 0), TextColor::White);
    }

    #[test]
    fn gray_flips_between_117_and_118() {
        // gray(117) ≈ 0.17795 and gray(118) ≈ 0.18122; the threshold sits
        // between them.
        assert_eq!(pick_text_color(117, 117, 117), TextColor::White);
        assert_eq!(pick_text_color(118, 118, 118), TextColor::Black);
    }

    #[test]
    fn luminance_of_black_is_zero() {
        assert_eq!(relative_luminance(0, 0, 0), 0.0);
    }

    #[test]
    fn luminance_of_white_is_one() {
        assert!((relative_luminance(255, 255, 255) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn luminance_weights_sum_correctly() {
        let red = relative_luminance(255, 0, 0);
        let green = relative_luminance(0, 255, 0);
        let blue = relative_luminance(0, 0, 255);
        assert!((red + green + blue - 1.0).abs() < 1e-9);
        assert!((red - 0.2126).abs() < 1e-9);
        assert!((green - 0.7152).abs() < 1e-9);
        assert!((blue - 0.0722).abs() < 1e-9);
    }

    #[test]
    fn threshold_boundary_is_inclusive_for_white() {
        assert_eq!(
            text_color_for_luminance(WHITE_TEXT_MAX_LUMINANCE),
            TextColor::White
        );
        assert_eq!(
            text_color_for_luminance(WHITE_TEXT_MAX_LUMINANCE + 1e-6),
            TextColor::Black
        );
    }
}
