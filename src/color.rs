//! COLOR variable encoding.
use crate::classify::{format_number, round_to};
use serde_json::Value;

/// Encode a Figma `{r, g, b, a?}` color (channels in `[0, 1]`).
///
/// Opaque colors become `#rrggbb`; anything with alpha below 1 becomes
/// `rgba(r, g, b, a)`. Returns `None` when a channel is missing or not a number.
pub fn encode_color(value: &Value) -> Option<String> {
    let channel = |key: &str| value.get(key).and_then(Value::as_f64);
    let r = to_byte(channel("r")?)?;
    let g = to_byte(channel("g")?)?;
    let b = to_byte(channel("b")?)?;
    let alpha = channel("a").unwrap_or(1.0).clamp(0.0, 1.0);

    if alpha == 1.0 {
        return Some(format!("#{r:02x}{g:02x}{b:02x}"));
    }
    Some(format!(
        "rgba({r}, {g}, {b}, {})",
        format_number(round_to(alpha, 3)?)
    ))
}

fn to_byte(channel: f64) -> Option<u8> {
    round_to(channel.clamp(0.0, 1.0) * 255.0, 0).map(|byte| byte as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn opaque_colors_encode_as_hex() {
        assert_eq!(
            encode_color(&json!({"r": 1, "g": 1, "b": 1, "a": 1})).as_deref(),
            Some("#ffffff")
        );
        assert_eq!(
            encode_color(&json!({"r": 1.0, "g": 0.0, "b": 0.0})).as_deref(),
            Some("#ff0000")
        );
        assert_eq!(
            encode_color(&json!({"r": 0.0039, "g": 0.5, "b": 0.0})).as_deref(),
            Some("#018000")
        );
    }

    #[test]
    fn translucent_colors_encode_as_rgba() {
        assert_eq!(
            encode_color(&json!({"r": 0, "g": 0, "b": 0, "a": 0.5})).as_deref(),
            Some("rgba(0, 0, 0, 0.5)")
        );
        assert_eq!(
            encode_color(&json!({"r": 1, "g": 1, "b": 1, "a": 0.12345})).as_deref(),
            Some("rgba(255, 255, 255, 0.123)")
        );
    }

    #[test]
    fn channels_and_alpha_are_clamped() {
        assert_eq!(
            encode_color(&json!({"r": 2.0, "g": -1.0, "b": 0.0, "a": 3})).as_deref(),
            Some("#ff0000")
        );
        assert_eq!(
            encode_color(&json!({"r": 0, "g": 0, "b": 0, "a": -0.2})).as_deref(),
            Some("rgba(0, 0, 0, 0)")
        );
        assert_eq!(
            encode_color(&json!({"r": 1e308, "g": -1e308, "b": 0.5})).as_deref(),
            Some("#ff0080")
        );
    }

    #[test]
    fn non_numeric_channels_are_unresolvable() {
        assert!(encode_color(&json!({"r": "1", "g": 0, "b": 0})).is_none());
        assert!(encode_color(&json!({"type": "VARIABLE_ALIAS", "id": "V:2"})).is_none());
        assert!(encode_color(&json!(12)).is_none());
    }
}
