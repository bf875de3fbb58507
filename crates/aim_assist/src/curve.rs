//! Response curves: normalized distance (0 = center, 1 = edge of radius) → strength
//!
//! Авторские кривые из конфига. Значение всегда clamp в [0, 1].

use serde::{Deserialize, Serialize};

/// Single key of a piecewise-linear curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveKey {
    pub x: f32,
    pub y: f32,
}

impl CurveKey {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Float lookup used by friction and magnetism
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResponseCurve {
    /// Одинаковая сила по всему радиусу
    Constant { value: f32 },
    /// `1 - t`
    LinearFalloff,
    /// `1 - smoothstep(t)` — мягкий край
    SmoothFalloff,
    /// Piecewise-linear, keys sorted by `x`; clamps outside the key range
    Keys { keys: Vec<CurveKey> },
}

impl Default for ResponseCurve {
    fn default() -> Self {
        Self::LinearFalloff
    }
}

impl ResponseCurve {
    /// Evaluate at `t`, result clamped to [0, 1]. NaN input → 0.
    pub fn evaluate(&self, t: f32) -> f32 {
        if t.is_nan() {
            return 0.0;
        }

        let raw = match self {
            ResponseCurve::Constant { value } => *value,
            ResponseCurve::LinearFalloff => 1.0 - t.clamp(0.0, 1.0),
            ResponseCurve::SmoothFalloff => {
                let t = t.clamp(0.0, 1.0);
                1.0 - t * t * (3.0 - 2.0 * t)
            }
            ResponseCurve::Keys { keys } => sample_keys(keys, t),
        };

        if raw.is_finite() {
            raw.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Strength for a squared screen distance inside `radius`.
    ///
    /// 0 beyond the radius, for a malformed radius (≤ 0, non-finite) or distance.
    pub fn strength_at(&self, distance_sq: f32, radius: f32) -> f32 {
        if !radius.is_finite() || radius <= 0.0 || !distance_sq.is_finite() {
            return 0.0;
        }

        let distance = distance_sq.max(0.0).sqrt();
        if distance > radius {
            return 0.0;
        }

        self.evaluate(distance / radius)
    }

    /// Проверка ключей: конечные значения, `x` не убывает
    pub fn validate(&self) -> Result<(), String> {
        match self {
            ResponseCurve::Constant { value } if !value.is_finite() => {
                Err(format!("constant value {} is not finite", value))
            }
            ResponseCurve::Keys { keys } => {
                if let Some(key) = keys.iter().find(|k| !k.x.is_finite() || !k.y.is_finite()) {
                    return Err(format!("key ({}, {}) is not finite", key.x, key.y));
                }
                if let Some(pair) = keys.windows(2).find(|pair| pair[1].x < pair[0].x) {
                    return Err(format!(
                        "keys are not sorted by x ({} after {})",
                        pair[1].x, pair[0].x
                    ));
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

fn sample_keys(keys: &[CurveKey], t: f32) -> f32 {
    let (Some(first), Some(last)) = (keys.first(), keys.last()) else {
        return 0.0;
    };

    if t <= first.x {
        return first.y;
    }
    if t >= last.x {
        return last.y;
    }

    for pair in keys.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.x {
            let span = b.x - a.x;
            if span <= f32::EPSILON {
                return b.y;
            }
            let alpha = (t - a.x) / span;
            return a.y + (b.y - a.y) * alpha;
        }
    }

    last.y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_falloff() {
        let curve = ResponseCurve::LinearFalloff;
        assert_eq!(curve.evaluate(0.0), 1.0);
        assert_eq!(curve.evaluate(0.25), 0.75);
        assert_eq!(curve.evaluate(1.0), 0.0);
        assert_eq!(curve.evaluate(3.0), 0.0);
    }

    #[test]
    fn test_smooth_falloff_endpoints() {
        let curve = ResponseCurve::SmoothFalloff;
        assert_eq!(curve.evaluate(0.0), 1.0);
        assert_eq!(curve.evaluate(1.0), 0.0);
        assert!((curve.evaluate(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_constant_clamped() {
        assert_eq!(ResponseCurve::Constant { value: 2.5 }.evaluate(0.3), 1.0);
        assert_eq!(ResponseCurve::Constant { value: -1.0 }.evaluate(0.3), 0.0);
    }

    #[test]
    fn test_keys_interpolation() {
        let curve = ResponseCurve::Keys {
            keys: vec![
                CurveKey::new(0.0, 1.0),
                CurveKey::new(0.5, 0.8),
                CurveKey::new(1.0, 0.0),
            ],
        };

        assert_eq!(curve.evaluate(0.0), 1.0);
        assert!((curve.evaluate(0.25) - 0.9).abs() < 1e-6);
        assert!((curve.evaluate(0.75) - 0.4).abs() < 1e-6);
        // За пределами ключей — крайние значения
        assert_eq!(curve.evaluate(-1.0), 1.0);
        assert_eq!(curve.evaluate(2.0), 0.0);
    }

    #[test]
    fn test_empty_keys_evaluate_to_zero() {
        let curve = ResponseCurve::Keys { keys: Vec::new() };
        assert_eq!(curve.evaluate(0.5), 0.0);
    }

    #[test]
    fn test_strength_at_distance() {
        let curve = ResponseCurve::Constant { value: 0.8 };
        assert_eq!(curve.strength_at(0.0, 100.0), 0.8);
        assert_eq!(curve.strength_at(100.0 * 100.0, 100.0), 0.8);
        // За радиусом — 0 независимо от кривой
        assert_eq!(curve.strength_at(101.0 * 101.0, 100.0), 0.0);
    }

    #[test]
    fn test_strength_with_malformed_radius() {
        let curve = ResponseCurve::Constant { value: 1.0 };
        assert_eq!(curve.strength_at(0.0, 0.0), 0.0);
        assert_eq!(curve.strength_at(0.0, -5.0), 0.0);
        assert_eq!(curve.strength_at(0.0, f32::NAN), 0.0);
        assert_eq!(curve.strength_at(f32::INFINITY, 10.0), 0.0);
    }

    #[test]
    fn test_nan_input() {
        assert_eq!(ResponseCurve::LinearFalloff.evaluate(f32::NAN), 0.0);
    }

    #[test]
    fn test_validate_rejects_unsorted_keys() {
        let curve = ResponseCurve::Keys {
            keys: vec![CurveKey::new(0.5, 1.0), CurveKey::new(0.2, 0.0)],
        };
        assert!(curve.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        let curve = ResponseCurve::Keys {
            keys: vec![CurveKey::new(0.0, f32::INFINITY)],
        };
        assert!(curve.validate().is_err());
        assert!(ResponseCurve::LinearFalloff.validate().is_ok());
    }
}
