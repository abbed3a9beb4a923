//! `$geoWithin` query documents for generated shapes.
use serde_json::{json, Value};

use crate::shapes::Shape;

/// Field holding the indexed coordinates.
pub const LOCATION_FIELD: &str = "loc";

/// The `$geoWithin` operand for `shape`, e.g. `{ "$box": [[x0, y0], [x1, y1]] }`.
pub fn geo_within_operand(shape: &Shape) -> Value {
    match shape {
        Shape::Box(b) => json!({
            "$box": [
                [b.bottom_left.x, b.bottom_left.y],
                [b.upper_right.x, b.upper_right.y]
            ]
        }),
        Shape::Hexagon(h) => {
            let vertices: Vec<Value> = h.vertices.iter().map(|v| json!([v.x, v.y])).collect();
            json!({ "$polygon": vertices })
        }
        Shape::Circle(c) => json!({ "$center": [[c.center.x, c.center.y], c.radius] }),
        Shape::SphericalCircle(c) => json!({
            "$centerSphere": [[c.longitude(), c.latitude()], c.radius]
        }),
    }
}

/// `{ loc: { $geoWithin: <operand> } }`.
pub fn geo_within(shape: &Shape) -> Value {
    json!({ LOCATION_FIELD: { "$geoWithin": geo_within_operand(shape) } })
}

/// `{ loc: [x, y] }` for a representative point of `shape`.
pub fn point_document(shape: &Shape) -> Value {
    let p = shape.representative_point();
    json!({ LOCATION_FIELD: [p.x, p.y] })
}
