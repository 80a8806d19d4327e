/// 2D point type. Geographic points are `(longitude, latitude)` in degrees.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;
