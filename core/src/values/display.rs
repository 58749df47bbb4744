//! Text form of runtime values.

use std::fmt;

use crate::values::Value;

/// Format a float the way the JVM's `Double.toString` does.
///
/// Shortest round-trip digits, always with a fractional part. Magnitudes
/// below 1e-3 or from 1e7 up use scientific notation (`1.0E7`).
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let magnitude = value.abs();
    if value == 0.0 || (1e-3..1e7).contains(&magnitude) {
        let text = value.to_string();
        return if text.contains('.') {
            text
        } else {
            format!("{}.0", text)
        };
    }

    // `{:e}` gives the shortest mantissa, e.g. `1.5e-5` or `1e7`.
    let text = format!("{:e}", value);
    match text.split_once('e') {
        Some((mantissa, exponent)) if mantissa.contains('.') => {
            format!("{}E{}", mantissa, exponent)
        }
        Some((mantissa, exponent)) => format!("{}.0E{}", mantissa, exponent),
        None => text,
    }
}

/// Scalars print as program output does. Sequences show their declared
/// range only; printing their elements needs a runtime to materialize them.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(value) => write!(f, "{}", value),
            Value::Float(value) => write!(f, "{}", format_float(*value)),
            Value::Sequence(seq) => {
                write!(f, "{{{}, {}}}", seq.lower(), seq.upper())?;
                if seq.transform_count() > 0 {
                    write!(f, " with {} map(s)", seq.transform_count())?;
                }
                Ok(())
            }
        }
    }
}
