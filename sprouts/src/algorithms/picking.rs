use crate::board::Board;
use crate::geometry::math::distance_sq;
use crate::model::{DotId, Vec2};

/// Nearest non-saturated dot within `radius` of the pointer. Saturated dots
/// can never be selected, so clicks on them fall through.
pub fn pick_selectable(board: &Board, p: Vec2, radius: f32) -> Option<DotId> {
    let r2 = radius * radius;
    let mut best: Option<(DotId, f32)> = None;
    for (i, d) in board.dots().iter().enumerate() {
        let id = i as DotId;
        let d2 = distance_sq(d.pos(), p);
        if d2 < r2 && !board.is_saturated(id) && best.map_or(true, |(_, bd)| d2 < bd) {
            best = Some((id, d2));
        }
    }
    best.map(|(id, _)| id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    #[test]
    fn picks_nearest_selectable_within_radius() {
        let cfg = GameConfig::default();
        let mut b = Board::from_positions(&[Vec2::new(100.0, 100.0), Vec2::new(108.0, 100.0)], &cfg);
        assert_eq!(pick_selectable(&b, Vec2::new(106.0, 100.0), 10.0), Some(1));
        assert_eq!(pick_selectable(&b, Vec2::new(300.0, 100.0), 10.0), None);
        b.dots[1].connections = 3;
        assert_eq!(pick_selectable(&b, Vec2::new(106.0, 100.0), 10.0), Some(0));
        b.dots[0].connections = 3;
        assert_eq!(pick_selectable(&b, Vec2::new(106.0, 100.0), 10.0), None);
    }
}
