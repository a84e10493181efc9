/// Converts a visual angle into an on-screen length in pixels.
///
/// `pixels = round(2 · distance · tan(degrees / 2) · pixels_per_cm)`, with the distance in
/// centimeters and the angle in degrees.
#[inline]
pub fn degrees_to_pixels(degrees: f64, viewing_distance_cm: f64, pixels_per_cm: f64) -> u32 {
    let size_cm = 2.0 * viewing_distance_cm * (degrees.to_radians() / 2.0).tan();
    (size_cm * pixels_per_cm).round().max(0.0) as u32
}

/// Pixels per centimeter of a display `screen_width` pixels wide and `display_width_mm` wide.
#[inline]
pub fn pixels_per_cm(screen_width: u32, display_width_mm: f64) -> f64 {
    screen_width as f64 / (display_width_mm / 10.0)
}

/// Maps a pixel coordinate into `[0, 1]` screen space, `(0, 0)` being the top-left corner.
#[inline(always)]
pub fn normalize_point(point: (f64, f64), screen_size: (u32, u32)) -> (f64, f64) {
    (point.0 / screen_size.0 as f64, point.1 / screen_size.1 as f64)
}
