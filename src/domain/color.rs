/// RGB color and the fixed palette.

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    /// Background sky.
    pub const SKY_BLUE: Color = Color::rgb(102, 191, 255);
    /// Ground slab.
    pub const BROWN: Color = Color::rgb(127, 106, 79);
    /// The player.
    pub const RED: Color = Color::rgb(230, 41, 55);
    /// Patrolling enemies.
    pub const BLUE: Color = Color::rgb(0, 121, 241);
    /// Goal flagpole.
    pub const GREEN: Color = Color::rgb(0, 228, 48);
}
