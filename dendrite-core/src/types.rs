use glam::Vec2;

/// Size of the rectangular container the graph lives in, in logical pixels.
///
/// The simulation clamps node positions to this rectangle (inset by an
/// edge padding) and the parallax mapper normalizes pointer positions
/// against its center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}
