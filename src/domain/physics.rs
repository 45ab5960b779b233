/// Motion constants and the pure pieces of the per-tick integration.
///
/// Everything here is a plain function of its arguments, so the rules can
/// be exercised without a world (and without a terminal).

use super::geom::Rect;

/// Downward acceleration applied every tick, grounded or not.
pub const GRAVITY: f32 = 0.5;
/// Instant horizontal speed while a direction is held. No acceleration
/// curve: velocity snaps to ±RUN_SPEED or 0.
pub const RUN_SPEED: f32 = 5.0;
/// Vertical impulse on jump (y grows downward, hence negative).
pub const JUMP_VELOCITY: f32 = -10.0;
/// Height of the ground band at the bottom of the viewport.
pub const GROUND_HEIGHT: f32 = 80.0;
/// Patrol speeds are integers drawn from [-ENEMY_MAX_SPEED, ENEMY_MAX_SPEED].
pub const ENEMY_MAX_SPEED: i32 = 2;

/// Y of the ground line (top of the ground band) for a viewport height.
#[inline]
pub fn ground_line(view_h: f32) -> f32 {
    view_h - GROUND_HEIGHT
}

/// Snap `rect` so its bottom rests exactly on `ground_y` if it reached or
/// passed it this tick. Returns true when contact was resolved.
pub fn settle_on_ground(rect: &mut Rect, ground_y: f32) -> bool {
    if rect.bottom() >= ground_y {
        rect.y = ground_y - rect.h;
        true
    } else {
        false
    }
}

/// Clamp `rect` horizontally into [0, level_w - rect.w].
pub fn clamp_to_level(rect: &mut Rect, level_w: f32) {
    if rect.x < 0.0 {
        rect.x = 0.0;
    }
    if rect.right() > level_w {
        rect.x = level_w - rect.w;
    }
}

/// Has `rect` crossed either vertical level boundary?
#[inline]
pub fn hits_level_bounds(rect: &Rect, level_w: f32) -> bool {
    rect.x < 0.0 || rect.right() > level_w
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settles_on_exact_contact() {
        // bottom == ground line counts as contact
        let mut r = Rect::new(0.0, 330.0, 40.0, 40.0);
        assert!(settle_on_ground(&mut r, 370.0));
        assert_eq!(r.bottom(), 370.0);
    }

    #[test]
    fn settles_after_penetration() {
        let mut r = Rect::new(0.0, 340.5, 40.0, 40.0);
        assert!(settle_on_ground(&mut r, 370.0));
        assert_eq!(r.y, 330.0);
    }

    #[test]
    fn airborne_rect_is_left_alone() {
        let mut r = Rect::new(0.0, 300.0, 40.0, 40.0);
        assert!(!settle_on_ground(&mut r, 370.0));
        assert_eq!(r.y, 300.0);
    }

    #[test]
    fn clamps_both_walls() {
        let mut r = Rect::new(-3.0, 0.0, 40.0, 40.0);
        clamp_to_level(&mut r, 1000.0);
        assert_eq!(r.x, 0.0);

        let mut r = Rect::new(975.0, 0.0, 40.0, 40.0);
        clamp_to_level(&mut r, 1000.0);
        assert_eq!(r.x, 960.0);
    }

    #[test]
    fn bounds_check_uses_both_edges() {
        assert!(hits_level_bounds(&Rect::new(-0.5, 0.0, 30.0, 30.0), 1000.0));
        assert!(hits_level_bounds(&Rect::new(971.0, 0.0, 30.0, 30.0), 1000.0));
        assert!(!hits_level_bounds(&Rect::new(970.0, 0.0, 30.0, 30.0), 1000.0));
        assert!(!hits_level_bounds(&Rect::new(0.0, 0.0, 30.0, 30.0), 1000.0));
    }
}
