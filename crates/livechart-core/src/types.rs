// File: crates/livechart-core/src/types.rs
// Summary: Shared render sizes and plot margins.

/// Default surface width in pixels.
pub const WIDTH: i32 = 1280;
/// Default surface height in pixels.
pub const HEIGHT: i32 = 720;

/// Screen margins, in pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Insets {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

impl Insets {
    pub const fn new(left: i32, right: i32, top: i32, bottom: i32) -> Self {
        Self { left, right, top, bottom }
    }
}

impl Default for Insets {
    fn default() -> Self {
        // Room for price labels on the left, time labels below and the title on top.
        Self::new(84, 24, 64, 48)
    }
}

/// Plot area in pixels, left/top inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlotRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl PlotRect {
    pub fn inset(width: i32, height: i32, insets: &Insets) -> Self {
        let left = insets.left.max(0);
        let top = insets.top.max(0);
        Self {
            left,
            top,
            right: (width - insets.right.max(0)).max(left + 1),
            bottom: (height - insets.bottom.max(0)).max(top + 1),
        }
    }

    pub const fn width(&self) -> i32 { self.right - self.left }
    pub const fn height(&self) -> i32 { self.bottom - self.top }
}
