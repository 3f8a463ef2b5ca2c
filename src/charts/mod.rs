//! Charts module - static chart rendering

mod palette;
mod render;

pub use palette::{series_color, PALETTE};
pub use render::ChartRenderer;
