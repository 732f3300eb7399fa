//! Typed lookups into a JSON parameter object.
//!
//! Tunables (atlas resolution, search grid size, preview scale) travel as a
//! `serde_json::Value`. A missing key or a value of the wrong type yields the
//! caller's default, so these helpers never fail.

use serde_json::Value;

/// Reads a number (integers included) from `params[name]`.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Reads a non-negative integer from `params[name]`.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|v| usize::try_from(v).ok())
        .unwrap_or(default)
}

/// Like [`param_usize`], but raises the result to at least `min`.
pub fn param_usize_at_least(params: &Value, name: &str, default: usize, min: usize) -> usize {
    param_usize(params, name, default).max(min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn f64_accepts_floats_and_integers() {
        let params = json!({"value": 0.25, "scale": 4});
        assert_eq!(param_f64(&params, "value", 1.0), 0.25);
        assert_eq!(param_f64(&params, "scale", 1.0), 4.0);
    }

    #[test]
    fn f64_falls_back_on_missing_null_or_wrong_type() {
        let params = json!({"value": null, "axis": "l"});
        assert_eq!(param_f64(&params, "value", 0.5), 0.5);
        assert_eq!(param_f64(&params, "axis", 0.5), 0.5);
        assert_eq!(param_f64(&params, "missing", 0.5), 0.5);
    }

    #[test]
    fn f64_on_non_object_returns_default() {
        assert_eq!(param_f64(&json!("size"), "size", 7.0), 7.0);
    }

    #[test]
    fn usize_reads_integers() {
        assert_eq!(param_usize(&json!({"size": 32}), "size", 96), 32);
        assert_eq!(param_usize(&json!({}), "size", 96), 96);
    }

    #[test]
    fn usize_rejects_fractions_negatives_and_strings() {
        assert_eq!(param_usize(&json!({"slices": 2.5}), "slices", 129), 129);
        assert_eq!(param_usize(&json!({"slices": -1}), "slices", 129), 129);
        assert_eq!(param_usize(&json!({"slices": "many"}), "slices", 129), 129);
    }

    #[test]
    fn usize_at_least_clamps_from_below() {
        assert_eq!(param_usize_at_least(&json!({"slices": 1}), "slices", 129, 2), 2);
        assert_eq!(param_usize_at_least(&json!({"slices": 9}), "slices", 129, 2), 9);
        assert_eq!(param_usize_at_least(&json!({}), "slices", 129, 2), 129);
    }
}
