/// The draw pass: world state → (rectangle, color) calls on a surface.
///
/// `Surface` is the simulation's only outward-facing seam: the terminal
/// renderer implements it for real output, tests drive it with a recorder.
/// Every rectangle handed over is already in viewport space — the camera
/// offset is applied here, on the x axis only (single-layer scrolling,
/// no parallax).

use crate::domain::color::Color;
use crate::domain::geom::Rect;

use super::world::World;

/// Minimal drawing capability the simulation needs from the platform.
pub trait Surface {
    fn clear(&mut self, color: Color);
    fn fill_rect(&mut self, rect: Rect, color: Color);
}

/// Draw the whole world, back to front: background, tiles, enemies, the
/// goal flagpole, then the player.
pub fn draw(world: &World, surface: &mut impl Surface) {
    let dx = -world.camera.offset;

    surface.clear(world.background);

    for tile in &world.tiles {
        surface.fill_rect(tile.rect.translated(dx, 0.0), tile.color);
    }
    for enemy in &world.enemies {
        surface.fill_rect(enemy.rect.translated(dx, 0.0), Color::BLUE);
    }
    surface.fill_rect(world.goal.rect.translated(dx, 0.0), Color::GREEN);
    surface.fill_rect(world.player.rect.translated(dx, 0.0), Color::RED);
}
