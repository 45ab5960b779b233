/// Static terrain tiles.
///
/// A tagged variant instead of a subtype hierarchy: no kind behaves
/// differently, and the tag keeps the dispatch explicit if one ever does.

use super::color::Color;
use super::geom::Rect;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TileKind {
    /// Reserved for decorative, non-ground terrain.
    #[allow(dead_code)]
    Generic,
    Ground,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Tile {
    pub kind: TileKind,
    pub rect: Rect,
    pub color: Color,
}

impl Tile {
    pub fn new(kind: TileKind, rect: Rect, color: Color) -> Self {
        Tile { kind, rect, color }
    }

    pub fn ground(rect: Rect, color: Color) -> Self {
        Tile::new(TileKind::Ground, rect, color)
    }

    /// Terrain is static; nothing advances. Kept so the update pass
    /// treats tiles like every other entity list.
    pub fn tick(&mut self) {}
}
