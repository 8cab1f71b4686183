#![forbid(unsafe_code)]

pub type Unit = euclid::UnknownUnit;

pub type Point = euclid::Point2D<f64, Unit>;

pub fn point(x: f64, y: f64) -> Point {
    euclid::point2(x, y)
}

/// Point on a circle of `radius` around `center`, with `angle` in radians measured
/// counter-clockwise from the positive x axis (screen y grows downwards).
pub fn polar(center: Point, radius: f64, angle: f64) -> Point {
    point(
        center.x + radius * angle.cos(),
        center.y - radius * angle.sin(),
    )
}
