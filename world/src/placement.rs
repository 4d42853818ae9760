//! Tower placement validation.

use rampart_core::{
    PathLayout, PlacementError, Playfield, WorldPoint, BORDER_INSET, PATH_CLEARANCE, TOWER_SPACING,
};

/// Decides whether a tower costing `cost` may be placed at `at`.
///
/// All rules must hold; the first violated rule, checked in the order
/// funds → path clearance → tower spacing → playfield border, becomes the
/// rejection reason. Pure predicate, no side effects.
pub(crate) fn validate<I>(
    at: WorldPoint,
    cost: u32,
    gold: u32,
    tower_positions: I,
    path: &PathLayout,
    playfield: &Playfield,
) -> Result<(), PlacementError>
where
    I: IntoIterator<Item = WorldPoint>,
{
    if gold < cost {
        return Err(PlacementError::InsufficientGold);
    }

    if obstructs_path(at, path) {
        return Err(PlacementError::PathObstruction);
    }

    for position in tower_positions {
        if position.distance_to(at) < TOWER_SPACING {
            return Err(PlacementError::TowerOverlap);
        }
    }

    if !playfield.contains_with_inset(at, BORDER_INSET) {
        return Err(PlacementError::OutOfBounds);
    }

    Ok(())
}

/// Reports whether `at` falls inside the clearance kept free around any
/// path segment.
///
/// The clearance is each segment's axis-aligned bounding box expanded by
/// [`PATH_CLEARANCE`], not the true distance to the segment, so the
/// corner wedges of each box reject a little more than a capsule test
/// would. The box geometry is the intended placement rule.
fn obstructs_path(at: WorldPoint, path: &PathLayout) -> bool {
    path.waypoints().windows(2).any(|segment| {
        let min_x = segment[0].x().min(segment[1].x()) - PATH_CLEARANCE;
        let max_x = segment[0].x().max(segment[1].x()) + PATH_CLEARANCE;
        let min_y = segment[0].y().min(segment[1].y()) - PATH_CLEARANCE;
        let max_y = segment[0].y().max(segment[1].y()) + PATH_CLEARANCE;
        at.x() >= min_x && at.x() <= max_x && at.y() >= min_y && at.y() <= max_y
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_path() -> PathLayout {
        PathLayout::new(vec![
            WorldPoint::new(0.0, 100.0),
            WorldPoint::new(200.0, 100.0),
            WorldPoint::new(200.0, 300.0),
        ])
    }

    fn test_playfield() -> Playfield {
        Playfield::new(1000.0, 700.0)
    }

    #[test]
    fn accepts_an_open_position() {
        let result = validate(
            WorldPoint::new(500.0, 500.0),
            50,
            120,
            std::iter::empty(),
            &test_path(),
            &test_playfield(),
        );
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn rejects_when_gold_is_insufficient() {
        let result = validate(
            WorldPoint::new(500.0, 500.0),
            150,
            120,
            std::iter::empty(),
            &test_path(),
            &test_playfield(),
        );
        assert_eq!(result, Err(PlacementError::InsufficientGold));
    }

    #[test]
    fn rejects_points_inside_the_path_clearance() {
        let result = validate(
            WorldPoint::new(100.0, 140.0),
            50,
            120,
            std::iter::empty(),
            &test_path(),
            &test_playfield(),
        );
        assert_eq!(result, Err(PlacementError::PathObstruction));
    }

    #[test]
    fn corner_boxes_reject_a_little_beyond_true_distance() {
        // The box corner at (245, 55) lies 63.6 units from the nearest
        // point of the path, yet still inside the expanded box.
        let result = validate(
            WorldPoint::new(245.0, 55.0),
            50,
            120,
            std::iter::empty(),
            &test_path(),
            &test_playfield(),
        );
        assert_eq!(result, Err(PlacementError::PathObstruction));

        // One unit outside the box corner is accepted.
        let result = validate(
            WorldPoint::new(246.0, 55.0),
            50,
            120,
            std::iter::empty(),
            &test_path(),
            &test_playfield(),
        );
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn rejects_points_crowding_an_existing_tower() {
        let existing = vec![WorldPoint::new(500.0, 500.0)];
        let result = validate(
            WorldPoint::new(540.0, 500.0),
            50,
            120,
            existing.iter().copied(),
            &test_path(),
            &test_playfield(),
        );
        assert_eq!(result, Err(PlacementError::TowerOverlap));

        let result = validate(
            WorldPoint::new(560.0, 500.0),
            50,
            120,
            existing.iter().copied(),
            &test_path(),
            &test_playfield(),
        );
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn rejects_points_inside_the_border_inset() {
        let result = validate(
            WorldPoint::new(15.0, 500.0),
            50,
            120,
            std::iter::empty(),
            &test_path(),
            &test_playfield(),
        );
        assert_eq!(result, Err(PlacementError::OutOfBounds));

        let result = validate(
            WorldPoint::new(500.0, 690.0),
            50,
            120,
            std::iter::empty(),
            &test_path(),
            &test_playfield(),
        );
        assert_eq!(result, Err(PlacementError::OutOfBounds));
    }
}
