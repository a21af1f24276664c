//! Variable classification into token categories.
//!
//! FLOAT variables are matched by normalized name against [`CATEGORY_RULES`]
//! in order; the first matching rule decides the category and formatter.
use crate::color::encode_color;
use crate::schema::{ResolvedType, Variable};
use regex::Regex;
use serde_json::Value;
use std::fmt;
use std::sync::OnceLock;

/// The five top-level maps of a token tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenCategory {
    Colors,
    Spacing,
    Radii,
    BorderWidth,
    Opacity,
}

impl TokenCategory {
    pub const ALL: [TokenCategory; 5] = [
        TokenCategory::Colors,
        TokenCategory::Spacing,
        TokenCategory::Radii,
        TokenCategory::BorderWidth,
        TokenCategory::Opacity,
    ];

    pub fn key(self) -> &'static str {
        match self {
            TokenCategory::Colors => "colors",
            TokenCategory::Spacing => "spacing",
            TokenCategory::Radii => "radii",
            TokenCategory::BorderWidth => "borderWidth",
            TokenCategory::Opacity => "opacity",
        }
    }
}

pub struct CategoryRule {
    pub pattern: &'static str,
    pub category: TokenCategory,
    pub format: fn(f64) -> Option<String>,
}

/// Ordered FLOAT rules. Order is significant: `card-radius-padding` is a radius.
pub const CATEGORY_RULES: [CategoryRule; 4] = [
    CategoryRule {
        pattern: "radius|corner|round|pill",
        category: TokenCategory::Radii,
        format: format_radius,
    },
    CategoryRule {
        pattern: "border|stroke|divider|outline|line",
        category: TokenCategory::BorderWidth,
        format: format_border_width,
    },
    CategoryRule {
        pattern: "opacity|alpha|transparency",
        category: TokenCategory::Opacity,
        format: format_opacity,
    },
    CategoryRule {
        pattern: "gap|spacing|space|stack|inset|padding|margin|layout",
        category: TokenCategory::Spacing,
        format: format_spacing,
    },
];

fn rule_regexes() -> &'static [Regex] {
    static REGEXES: OnceLock<Vec<Regex>> = OnceLock::new();
    REGEXES.get_or_init(|| {
        CATEGORY_RULES
            .iter()
            .map(|rule| {
                Regex::new(&format!("(?i){}", rule.pattern)).expect("regex for category rule")
            })
            .collect()
    })
}

/// Outcome for one variable.
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    Token {
        category: TokenCategory,
        value: String,
    },
    Unresolved(Unresolved),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unresolved {
    NoValue,
    UnsupportedType(ResolvedType),
    InvalidColor,
    NonNumeric,
    NegativeUncategorized,
}

impl fmt::Display for Unresolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unresolved::NoValue => write!(f, "no value for any mode"),
            Unresolved::UnsupportedType(kind) => write!(f, "unsupported type {kind:?}"),
            Unresolved::InvalidColor => write!(f, "color channels are not numeric"),
            Unresolved::NonNumeric => write!(f, "value is not a finite number"),
            Unresolved::NegativeUncategorized => {
                write!(f, "negative value matches no category")
            }
        }
    }
}

/// Value for `mode_id`, else the first value in document order.
pub fn resolve_value<'a>(variable: &'a Variable, mode_id: &str) -> Option<&'a Value> {
    variable
        .values_by_mode
        .get(mode_id)
        .or_else(|| variable.values_by_mode.values().next())
}

/// Classify a variable whose name is already normalized to `key`.
pub fn classify_variable(variable: &Variable, key: &str, mode_id: &str) -> Classification {
    let Some(value) = resolve_value(variable, mode_id) else {
        return Classification::Unresolved(Unresolved::NoValue);
    };
    match variable.resolved_type {
        ResolvedType::Color => match encode_color(value) {
            Some(value) => Classification::Token {
                category: TokenCategory::Colors,
                value,
            },
            None => Classification::Unresolved(Unresolved::InvalidColor),
        },
        ResolvedType::Float => match value.as_f64().filter(|number| number.is_finite()) {
            Some(number) => classify_float(key, number),
            None => Classification::Unresolved(Unresolved::NonNumeric),
        },
        other => Classification::Unresolved(Unresolved::UnsupportedType(other)),
    }
}

/// Classify a numeric value by its normalized name.
///
/// A value that overflows while being scaled or rounded is unresolved.
pub fn classify_float(key: &str, value: f64) -> Classification {
    let matched = CATEGORY_RULES
        .iter()
        .zip(rule_regexes())
        .find(|(_, regex)| regex.is_match(key))
        .map(|(rule, _)| rule);
    let (category, formatted) = match matched {
        Some(rule) => (rule.category, (rule.format)(value)),
        None if value >= 0.0 => (TokenCategory::Spacing, format_spacing(value)),
        None => return Classification::Unresolved(Unresolved::NegativeUncategorized),
    };
    match formatted {
        Some(value) => Classification::Token { category, value },
        None => Classification::Unresolved(Unresolved::NonNumeric),
    }
}

pub fn format_radius(value: f64) -> Option<String> {
    Some(format!("{}px", format_number(round_to(value, 3)?)))
}

pub fn format_border_width(value: f64) -> Option<String> {
    Some(format!("{}px", format_number(round_to(value, 3)?)))
}

/// Figma stores opacity as a percentage; tokens carry a 0-1 ratio.
pub fn format_opacity(value: f64) -> Option<String> {
    Some(format_number(round_to(value / 100.0, 3)?))
}

/// Pixels to rem against a 16px root.
pub fn format_spacing(value: f64) -> Option<String> {
    Some(format!("{}rem", format_number(round_to(value / 16.0, 4)?)))
}

/// Round half toward positive infinity at `decimals` places.
///
/// `None` when the scaled value leaves the finite range.
pub fn round_to(value: f64, decimals: i32) -> Option<f64> {
    let factor = 10f64.powi(decimals);
    let rounded = (value * factor + 0.5).floor() / factor;
    rounded.is_finite().then_some(rounded)
}

/// Shortest decimal form: `1` not `1.0`, never `-0`, and exponent form
/// (`1.6e+22`) from 1e21 up, as JavaScript prints numbers.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value.abs() < 1e21 {
        return value.to_string();
    }
    let exp = format!("{value:e}");
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
        _ => exp,
    }
}
