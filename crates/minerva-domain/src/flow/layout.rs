use serde::{Deserialize, Serialize};

/// Horizontal interval between goal nodes on the top row.
pub const GOAL_SPACING: f64 = 250.0;

/// Horizontal interval between sibling prerequisites in a fan-out.
pub const FAN_SPACING: f64 = 220.0;

/// Vertical interval between a node and its prerequisites.
pub const LAYER_SPACING: f64 = 150.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Top-row slot for the i-th goal, in first-encountered order.
pub fn goal_position(index: usize) -> Position {
    Position::new(index as f64 * GOAL_SPACING, 0.0)
}

/// Top-row slot for a newly created goal, one interval after the current
/// rightmost top-row node (origin when the row is empty).
pub fn next_goal_position(rightmost_x: Option<f64>) -> Position {
    match rightmost_x {
        Some(x) => Position::new(x + GOAL_SPACING, 0.0),
        None => Position::new(0.0, 0.0),
    }
}

/// Slot for the i-th of `new_count` prerequisites added under `parent`:
/// one layer down, spread symmetrically around the parent's x.
///
/// Positions are assigned once; nodes already placed keep their slot even
/// when a later expansion would put them elsewhere.
pub fn fan_out_position(parent: Position, index: usize, new_count: usize) -> Position {
    let offset = index as f64 * FAN_SPACING - (new_count.saturating_sub(1)) as f64 * FAN_SPACING / 2.0;
    Position::new(parent.x + offset, parent.y + LAYER_SPACING)
}

/// Slot directly below `parent`, used when a single prerequisite is
/// created under it.
pub fn below(parent: Position) -> Position {
    Position::new(parent.x, parent.y + LAYER_SPACING)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_row_spacing() {
        assert_eq!(goal_position(0), Position::new(0.0, 0.0));
        assert_eq!(goal_position(1), Position::new(250.0, 0.0));
        assert_eq!(goal_position(3), Position::new(750.0, 0.0));
    }

    #[test]
    fn test_next_goal_after_rightmost() {
        assert_eq!(next_goal_position(None), Position::new(0.0, 0.0));
        assert_eq!(next_goal_position(Some(500.0)), Position::new(750.0, 0.0));
    }

    #[test]
    fn test_fan_out_is_centered() {
        let parent = Position::new(100.0, 0.0);

        // Three siblings land at x - w, x, x + w, one layer down.
        assert_eq!(
            fan_out_position(parent, 0, 3),
            Position::new(100.0 - FAN_SPACING, LAYER_SPACING)
        );
        assert_eq!(fan_out_position(parent, 1, 3), Position::new(100.0, LAYER_SPACING));
        assert_eq!(
            fan_out_position(parent, 2, 3),
            Position::new(100.0 + FAN_SPACING, LAYER_SPACING)
        );
    }

    #[test]
    fn test_fan_out_pair_straddles_parent() {
        let parent = Position::new(0.0, 150.0);
        assert_eq!(fan_out_position(parent, 0, 2), Position::new(-110.0, 300.0));
        assert_eq!(fan_out_position(parent, 1, 2), Position::new(110.0, 300.0));
    }

    #[test]
    fn test_single_prerequisite_sits_under_parent() {
        let parent = Position::new(250.0, 0.0);
        assert_eq!(fan_out_position(parent, 0, 1), Position::new(250.0, 150.0));
        assert_eq!(below(parent), Position::new(250.0, 150.0));
    }
}
