//! Dimension decoding
//!
//! The API sends a shape's `dimensions` as a plain JSON object whose keys
//! depend on the sibling `shapeType` field. [`decode_dimensions`] turns that
//! pair back into a typed [`Dimensions`] value. It runs once for every shape
//! the server returns, before the shape reaches the caller.

use crate::model::{CubeDimensions, CylinderDimensions, Dimensions, ShapeType};
use serde_json::{Map, Value};

/// The server sent dimensions that cannot belong to the declared shape type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("unsupported shape type: {0:?}")]
    UnsupportedShapeType(String),
    #[error("dimensions for a {0} must be a JSON object")]
    NotAnObject(ShapeType),
    #[error("{shape_type} dimensions are missing {key:?}")]
    MissingKey { shape_type: ShapeType, key: &'static str },
    #[error("{key:?} is not an integer: {value}")]
    NotAnInteger { key: &'static str, value: String },
}

/// Wire keys of a cube's dimensions, in constructor order
const CUBE_KEYS: [&str; 3] = ["lengthX", "heightY", "widthZ"];

/// Wire keys of a cylinder's dimensions, in constructor order
const CYLINDER_KEYS: [&str; 2] = ["height", "radius"];

/// Decode an untyped dimensions payload using its shape type tag.
///
/// The tag is checked first, so an unknown shape type fails whatever the
/// payload contains.
pub fn decode_dimensions(payload: &Value, shape_type: &str) -> Result<Dimensions, DecodeError> {
    let shape_type: ShapeType = shape_type.parse()?;

    let Some(map) = payload.as_object() else {
        return Err(DecodeError::NotAnObject(shape_type));
    };

    let dimensions = match shape_type {
        ShapeType::Cube => {
            let [length_x, height_y, width_z] = required_ints(map, shape_type, CUBE_KEYS)?;
            Dimensions::Cube(CubeDimensions::new(length_x, height_y, width_z))
        }
        ShapeType::Cylinder => {
            let [height, radius] = required_ints(map, shape_type, CYLINDER_KEYS)?;
            Dimensions::Cylinder(CylinderDimensions::new(height, radius))
        }
    };

    tracing::debug!("decoded {} dimensions: {:?}", shape_type, dimensions);
    Ok(dimensions)
}

/// Pull every key in `keys` out of `map` as an integer
fn required_ints<const N: usize>(
    map: &Map<String, Value>,
    shape_type: ShapeType,
    keys: [&'static str; N],
) -> Result<[i64; N], DecodeError> {
    let mut out = [0i64; N];
    for (slot, key) in out.iter_mut().zip(keys) {
        let value = match map.get(key) {
            Some(Value::Null) | None => {
                return Err(DecodeError::MissingKey { shape_type, key });
            }
            Some(v) => v,
        };
        *slot = coerce_int(value).ok_or_else(|| DecodeError::NotAnInteger {
            key,
            value: value.to_string(),
        })?;
    }
    Ok(out)
}

/// Coerce a numeric-like JSON value to an integer.
///
/// Accepts integers, integral finite floats (`4.0`) and strings holding a
/// base-10 integer (`"4"`).
fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            let f = n.as_f64()?;
            let in_range = f >= i64::MIN as f64 && f < i64::MAX as f64;
            (f.is_finite() && f.fract() == 0.0 && in_range).then_some(f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_cube() {
        let d = decode_dimensions(&json!({"lengthX": 4, "heightY": 5, "widthZ": 6}), "cube").unwrap();
        assert_eq!(d, Dimensions::Cube(CubeDimensions::new(4, 5, 6)));
    }

    #[test]
    fn test_decode_cylinder() {
        let d = decode_dimensions(&json!({"height": 8, "radius": 2}), "cylinder").unwrap();
        assert_eq!(d, Dimensions::Cylinder(CylinderDimensions::new(8, 2)));
    }

    #[test]
    fn test_decode_coerces_numeric_strings_and_integral_floats() {
        let d = decode_dimensions(
            &json!({"lengthX": "10", "heightY": 5.0, "widthZ": " -3 "}),
            "cube",
        )
        .unwrap();
        assert_eq!(d, Dimensions::Cube(CubeDimensions::new(10, 5, -3)));
    }

    #[test]
    fn test_decode_ignores_extra_keys() {
        let d = decode_dimensions(&json!({"height": 1, "radius": 1, "lengthX": 9}), "cylinder")
            .unwrap();
        assert_eq!(d.shape_type(), ShapeType::Cylinder);
    }

    #[test]
    fn test_decode_missing_key() {
        let err = decode_dimensions(&json!({"lengthX": 4, "widthZ": 4}), "cube").unwrap_err();
        assert_eq!(
            err,
            DecodeError::MissingKey {
                shape_type: ShapeType::Cube,
                key: "heightY"
            }
        );
    }

    #[test]
    fn test_decode_null_counts_as_missing() {
        let err = decode_dimensions(&json!({"height": null, "radius": 2}), "cylinder").unwrap_err();
        assert!(matches!(err, DecodeError::MissingKey { key: "height", .. }));
    }

    #[test]
    fn test_decode_rejects_non_integers() {
        for bad in [json!(2.5), json!("two"), json!(true), json!([2]), json!({"v": 2})] {
            let payload = json!({"height": 8, "radius": bad});
            let err = decode_dimensions(&payload, "cylinder").unwrap_err();
            assert!(
                matches!(err, DecodeError::NotAnInteger { key: "radius", .. }),
                "{payload} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_decode_wrong_variant_keys_fail() {
        let err = decode_dimensions(&json!({"height": 8, "radius": 2}), "cube").unwrap_err();
        assert!(matches!(err, DecodeError::MissingKey { key: "lengthX", .. }));
    }

    #[test]
    fn test_decode_unknown_shape_type() {
        for tag in ["sphere", "", "CUBE"] {
            let err = decode_dimensions(&json!({"lengthX": 1, "heightY": 1, "widthZ": 1}), tag)
                .unwrap_err();
            assert_eq!(err, DecodeError::UnsupportedShapeType(tag.to_string()));
        }
    }

    #[test]
    fn test_decode_not_an_object() {
        let err = decode_dimensions(&json!([1, 2, 3]), "cube").unwrap_err();
        assert_eq!(err, DecodeError::NotAnObject(ShapeType::Cube));
        let err = decode_dimensions(&Value::Null, "cylinder").unwrap_err();
        assert_eq!(err, DecodeError::NotAnObject(ShapeType::Cylinder));
    }
}
