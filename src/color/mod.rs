mod utils;

use smart_leds::{RGB8, hsv::Hsv as HSV};
pub use utils::{fill, hsv2rgb, lerp_colors, lerp_frames, rgb_from_u32, scale_color};

pub type Rgb = RGB8;
pub type Hsv = HSV;

pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
pub const WHITE: Rgb = rgb_from_u32(0x00FF_FFFF);
pub const RED: Rgb = rgb_from_u32(0x00FF_0000);
pub const BLUE: Rgb = rgb_from_u32(0x0000_00FF);
pub const AMBER: Rgb = rgb_from_u32(0x00FF_6400);
