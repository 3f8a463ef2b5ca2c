//! Chart color palette.

use plotters::style::RGBColor;

pub const SKY_BLUE: RGBColor = RGBColor(135, 206, 235);
pub const LIGHT_GREEN: RGBColor = RGBColor(144, 238, 144);
pub const GREEN: RGBColor = RGBColor(0, 128, 0);

/// Series palette for overlaid curves.
pub const PALETTE: [RGBColor; 10] = [
    RGBColor(231, 76, 60),  // Red
    RGBColor(46, 204, 113), // Green
    RGBColor(155, 89, 182), // Purple
    RGBColor(243, 156, 18), // Orange
    RGBColor(26, 188, 156), // Teal
    RGBColor(233, 30, 99),  // Pink
    RGBColor(0, 188, 212),  // Cyan
    RGBColor(255, 87, 34),  // Deep Orange
    RGBColor(121, 85, 72),  // Brown
    RGBColor(96, 125, 139), // Blue Grey
];

/// Color for the n-th series, cycling through the palette.
pub fn series_color(index: usize) -> RGBColor {
    PALETTE[index % PALETTE.len()]
}
