//! Freeform position normalization.
//!
//! Finder records icon positions relative to its own window. The page wants
//! them anchored to its top-left corner instead: shift everything so the
//! leftmost icon sits at x = 0 and the topmost at y = [`TOP_PADDING`], and
//! report half the original horizontal spread so the template can center the
//! icon cloud in the viewport.

use crate::types::Position;

/// Vertical padding above the topmost icon, in pixels.
const TOP_PADDING: u32 = 50;

/// A normalized freeform layout: one position per entry, in entry order, plus
/// the centering shift for the page container.
#[derive(Debug, Clone, PartialEq)]
pub struct FreeformLayout {
    pub positions: Vec<Position>,
    /// Half the horizontal spread of the recorded positions. The template
    /// shifts the container left by this much from the viewport center.
    pub center_offset: f64,
}

/// Normalize recorded icon positions for page layout.
///
/// Freeform is all or nothing: if any entry lacks a recorded position, or
/// there are no entries at all, the page falls back to the formal template
/// and this returns `None`.
pub fn normalize(recorded: &[Option<Position>]) -> Option<FreeformLayout> {
    if recorded.is_empty() {
        return None;
    }
    let mut positions = Vec::with_capacity(recorded.len());
    for position in recorded {
        positions.push((*position)?);
    }

    let min_x = positions.iter().map(|p| p.x).min()?;
    let max_x = positions.iter().map(|p| p.x).max()?;
    let min_y = positions.iter().map(|p| p.y).min()?;

    for position in &mut positions {
        position.x -= min_x;
        position.y = (position.y - min_y).saturating_add(TOP_PADDING);
    }

    Some(FreeformLayout {
        positions,
        center_offset: f64::from(max_x - min_x) / 2.0,
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: u32, y: u32) -> Option<Position> {
        Some(Position { x, y })
    }

    #[test]
    fn no_entries_is_not_freeform() {
        assert_eq!(normalize(&[]), None);
    }

    #[test]
    fn one_missing_position_disables_freeform() {
        assert_eq!(normalize(&[at(10, 10), None, at(30, 40)]), None);
    }

    #[test]
    fn single_entry_lands_at_origin_with_padding() {
        let layout = normalize(&[at(300, 120)]).unwrap();
        assert_eq!(layout.positions, vec![Position { x: 0, y: 50 }]);
        assert_eq!(layout.center_offset, 0.0);
    }

    #[test]
    fn positions_shift_by_minimums() {
        // min_x = 40, min_y = 10, max_x = 100
        let layout = normalize(&[at(100, 80), at(40, 200), at(60, 10)]).unwrap();
        assert_eq!(
            layout.positions,
            vec![
                Position { x: 60, y: 120 },
                Position { x: 0, y: 240 },
                Position { x: 20, y: 50 },
            ]
        );
        assert_eq!(layout.center_offset, 30.0);
    }

    #[test]
    fn entry_order_is_preserved() {
        let layout = normalize(&[at(50, 0), at(0, 0)]).unwrap();
        assert_eq!(layout.positions[0].x, 50);
        assert_eq!(layout.positions[1].x, 0);
    }

    #[test]
    fn already_normalized_positions_only_gain_padding() {
        let layout = normalize(&[at(0, 0), at(80, 20)]).unwrap();
        assert_eq!(
            layout.positions,
            vec![Position { x: 0, y: 50 }, Position { x: 80, y: 70 }]
        );
        assert_eq!(layout.center_offset, 40.0);
    }

    #[test]
    fn center_offset_uses_the_raw_spread() {
        // Spread 250 - 50 = 200, regardless of vertical values.
        let layout = normalize(&[at(50, 900), at(250, 3)]).unwrap();
        assert_eq!(layout.center_offset, 100.0);
    }
}
