//! Icon bitmaps for each [`StatusIcon`].
//!
//! A small "database" glyph (stacked disks) drawn in the state color:
//! red when not connected, white when connected, yellow while busy.

use urbackup_monitor_status::StatusIcon;

/// Width and height of the generated icons, in pixels.
pub const ICON_SIZE: u32 = 32;

const OUTLINE: [u8; 3] = [0x30, 0x30, 0x30];

// Glyph geometry, in pixels.
const CENTER_X: f32 = 16.0;
const RADIUS_X: f32 = 10.0;
const RADIUS_Y: f32 = 3.5;
const TOP_Y: f32 = 8.0;
const MIDDLE_Y: f32 = 16.0;
const BOTTOM_Y: f32 = 24.0;

/// An RGBA8 image, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconImage {
    pub rgba: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl IconImage {
    /// Draws the icon for `icon`.
    pub fn for_status(icon: StatusIcon) -> Self {
        let fill = fill_color(icon);
        let mut rgba = Vec::with_capacity((ICON_SIZE * ICON_SIZE * 4) as usize);

        for y in 0..ICON_SIZE {
            for x in 0..ICON_SIZE {
                let pixel = match classify(x, y) {
                    Pixel::Empty => [0, 0, 0, 0],
                    Pixel::Outline => [OUTLINE[0], OUTLINE[1], OUTLINE[2], 0xFF],
                    Pixel::Fill => [fill[0], fill[1], fill[2], 0xFF],
                };
                rgba.extend_from_slice(&pixel);
            }
        }

        Self {
            rgba,
            width: ICON_SIZE,
            height: ICON_SIZE,
        }
    }

    /// Returns the RGBA value at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * self.width + x) * 4) as usize;
        [
            self.rgba[i],
            self.rgba[i + 1],
            self.rgba[i + 2],
            self.rgba[i + 3],
        ]
    }
}

fn fill_color(icon: StatusIcon) -> [u8; 3] {
    match icon {
        StatusIcon::NotConnected => [0xD3, 0x2F, 0x2F],
        StatusIcon::Connected => [0xF5, 0xF5, 0xF5],
        StatusIcon::Busy => [0xF9, 0xC8, 0x0E],
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pixel {
    Empty,
    Outline,
    Fill,
}

/// Squared normalized distance from an ellipse centered on `cy`.
fn ellipse(px: f32, py: f32, cy: f32) -> f32 {
    let dx = (px - CENTER_X) / RADIUS_X;
    let dy = (py - cy) / RADIUS_Y;
    dx * dx + dy * dy
}

fn inside(px: f32, py: f32) -> bool {
    let in_body = (px - CENTER_X).abs() <= RADIUS_X && (TOP_Y..=BOTTOM_Y).contains(&py);
    in_body || ellipse(px, py, TOP_Y) <= 1.0 || ellipse(px, py, BOTTOM_Y) <= 1.0
}

fn on_rim(e: f32) -> bool {
    (0.7..=1.3).contains(&e)
}

fn classify(x: u32, y: u32) -> Pixel {
    let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);
    if !inside(px, py) {
        return Pixel::Empty;
    }

    let edge = !inside(px - 1.0, py)
        || !inside(px + 1.0, py)
        || !inside(px, py - 1.0)
        || !inside(px, py + 1.0);
    // Full rim on the lid, lower arcs between the disks.
    let seam = on_rim(ellipse(px, py, TOP_Y))
        || (py >= MIDDLE_Y && on_rim(ellipse(px, py, MIDDLE_Y)));

    if edge || seam {
        Pixel::Outline
    } else {
        Pixel::Fill
    }
}
