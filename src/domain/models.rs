use std::collections::HashMap;
use serde::{Deserialize, Serialize};

/// A value produced by evaluating an expression: a number or a piece of text.
///
/// Text exists so numeral strings can be assembled and coerced (the `HEX` and
/// `BIN` macros build `"0x"`/`"0b"` prefixed numerals with `&` and force them
/// to numbers by adding 0). Arithmetic coerces text operands to numbers;
/// `&` coerces number operands to text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Number(f64),
    Text(String),
}

impl Value {
    pub fn to_number(&self) -> Result<f64, String> {
        match self {
            Value::Number(n) => Ok(*n),
            Value::Text(s) => parse_numeral(s),
        }
    }

    pub fn to_text(&self) -> String {
        match self {
            Value::Number(n) => n.to_string(),
            Value::Text(s) => s.clone(),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_text())
    }
}

/// Parses a numeral string, honoring `0x` (hexadecimal) and `0b` (binary)
/// prefixes; anything else is read as a decimal number. Unparseable text is
/// an error, never a silent zero.
pub fn parse_numeral(text: &str) -> Result<f64, String> {
    let trimmed = text.trim();
    if let Some(digits) = trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
        i64::from_str_radix(digits, 16)
            .map(|n| n as f64)
            .map_err(|_| format!("Invalid hexadecimal numeral: {}", trimmed))
    } else if let Some(digits) = trimmed.strip_prefix("0b").or_else(|| trimmed.strip_prefix("0B")) {
        i64::from_str_radix(digits, 2)
            .map(|n| n as f64)
            .map_err(|_| format!("Invalid binary numeral: {}", trimmed))
    } else {
        trimmed
            .parse::<f64>()
            .map_err(|_| format!("Cannot convert text to number: {}", text))
    }
}

/// Checks that a string is usable as a variable, macro, or parameter name.
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(ch) if ch.is_ascii_alphabetic() || ch == '_' => {}
        _ => return false,
    }
    chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}

/// Variable bindings for the calculator session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Environment {
    variables: HashMap<String, Value>,
}

impl Environment {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.variables.get(&name.to_uppercase())
    }

    pub fn set(&mut self, name: &str, value: Value) {
        self.variables.insert(name.to_uppercase(), value);
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }
}

/// One submitted line and its outcome, as shown in the history pane.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub input: String,
    pub output: String,
}

/// A user-defined macro in its persistable form. The template is re-parsed
/// from `source` when a session is restored, through the same validation as
/// a live definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroSource {
    pub name: String,
    pub params: Vec<String>,
    pub source: String,
}

/// Everything a calculator session persists: bindings, user macros, history.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    pub environment: Environment,
    pub macros: Vec<MacroSource>,
    pub history: Vec<HistoryEntry>,
}
