/// How numeric results are rounded when they exceed the configured precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RoundingMode {
    Up,
    Down,
    Ceiling,
    Floor,
    HalfUp,
    HalfDown,
    HalfEven,
    /// Rounding is an error: results must be exactly representable.
    Unnecessary,
}

impl RoundingMode {
    pub const ALL: [RoundingMode; 8] = [
        Self::Up,
        Self::Down,
        Self::Ceiling,
        Self::Floor,
        Self::HalfUp,
        Self::HalfDown,
        Self::HalfEven,
        Self::Unnecessary,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Up => "UP",
            Self::Down => "DOWN",
            Self::Ceiling => "CEILING",
            Self::Floor => "FLOOR",
            Self::HalfUp => "HALF_UP",
            Self::HalfDown => "HALF_DOWN",
            Self::HalfEven => "HALF_EVEN",
            Self::Unnecessary => "UNNECESSARY",
        }
    }

    #[must_use]
    pub fn from_name(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.as_str() == value)
    }

    /// Round `value` to `digits` fractional digits.
    ///
    /// Returns `None` for [`RoundingMode::Unnecessary`] when rounding would change the value.
    pub fn round(self, value: f64, digits: i32) -> Option<f64> {
        // Keep the scale factor an exact integer so whole-number results stay exact.
        let factor = 10f64.powi(digits.abs());
        let scaled = if digits >= 0 {
            value * factor
        } else {
            value / factor
        };
        // Already exact at this many digits (or beyond what f64 can scale).
        if !scaled.is_finite() || (digits >= 0 && scaled.abs() >= F64_EXACT_INTEGER_LIMIT) {
            return Some(value);
        }
        let truncated = scaled.trunc();
        let fraction = (scaled - truncated).abs();
        let away = truncated + scaled.signum();

        let rounded = match self {
            Self::Up => {
                if fraction == 0.0 {
                    truncated
                } else {
                    away
                }
            }
            Self::Down => truncated,
            Self::Ceiling => scaled.ceil(),
            Self::Floor => scaled.floor(),
            Self::HalfUp => {
                if fraction >= 0.5 {
                    away
                } else {
                    truncated
                }
            }
            Self::HalfDown => {
                if fraction > 0.5 {
                    away
                } else {
                    truncated
                }
            }
            Self::HalfEven => {
                if fraction > 0.5 || (fraction == 0.5 && truncated % 2.0 != 0.0) {
                    away
                } else {
                    truncated
                }
            }
            Self::Unnecessary => {
                if fraction != 0.0 {
                    return None;
                }
                truncated
            }
        };
        Some(if digits >= 0 {
            rounded / factor
        } else {
            rounded * factor
        })
    }
}

/// 2^53: every f64 at or above this magnitude is an integer.
const F64_EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0;

/// Numeric representation used when evaluating expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExpressionNumberKind {
    BigDecimal,
    Double,
}

impl ExpressionNumberKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BigDecimal => "BIG_DECIMAL",
            Self::Double => "DOUBLE",
        }
    }

    #[must_use]
    pub fn from_name(value: &str) -> Option<Self> {
        match value {
            "BIG_DECIMAL" => Some(Self::BigDecimal),
            "DOUBLE" => Some(Self::Double),
            _ => None,
        }
    }
}

/// Precision plus rounding mode, derived from the `precision` and `rounding-mode` properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MathContext {
    /// Significant digits; `0` means unlimited.
    pub precision: u32,
    pub rounding_mode: RoundingMode,
}

impl MathContext {
    pub const UNLIMITED_PRECISION: u32 = 0;

    #[must_use]
    pub fn is_unlimited(&self) -> bool {
        self.precision == Self::UNLIMITED_PRECISION
    }

    /// Round `value` to this context's significant digits.
    pub fn round(&self, value: f64) -> Option<f64> {
        if self.is_unlimited() || value == 0.0 || !value.is_finite() {
            return Some(value);
        }
        let magnitude = value.abs().log10().floor() as i32 + 1;
        let precision = i32::try_from(self.precision).unwrap_or(i32::MAX);
        let digits = precision.saturating_sub(magnitude);
        self.rounding_mode.round(value, digits)
    }
}
