//! Typed setting values and their textual form.
//!
//! Settings travel as strings between the dialog, the schema file and the
//! configuration store. `SettingValue` is the typed side of that exchange:
//! it keeps its type across assignments, so writing `"abc"` into an integer
//! setting is an error rather than a silent type change.

use std::fmt;

use crate::error::ValueError;

/// The storage type of a setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Boolean,
    UInt,
    Int,
    String,
}

impl ValueType {
    /// Name used in schema files.
    pub fn name(self) -> &'static str {
        match self {
            ValueType::Boolean => "bool",
            ValueType::UInt => "uint",
            ValueType::Int => "int",
            ValueType::String => "string",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A typed setting value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingValue {
    Boolean(bool),
    UInt(u32),
    Int(i32),
    String(String),
}

impl SettingValue {
    /// The zero value of `value_type`.
    pub fn zero(value_type: ValueType) -> Self {
        match value_type {
            ValueType::Boolean => SettingValue::Boolean(false),
            ValueType::UInt => SettingValue::UInt(0),
            ValueType::Int => SettingValue::Int(0),
            ValueType::String => SettingValue::String(String::new()),
        }
    }

    pub fn value_type(&self) -> ValueType {
        match self {
            SettingValue::Boolean(_) => ValueType::Boolean,
            SettingValue::UInt(_) => ValueType::UInt,
            SettingValue::Int(_) => ValueType::Int,
            SettingValue::String(_) => ValueType::String,
        }
    }

    /// Reset to the zero value of `value_type`.
    ///
    /// When the current type differs, the value is only retyped if
    /// `overwrite` is set; otherwise the call fails and leaves it untouched.
    pub fn reset(&mut self, value_type: ValueType, overwrite: bool) -> Result<(), ValueError> {
        if self.value_type() != value_type && !overwrite {
            return Err(ValueError::TypeMismatch {
                expected: self.value_type(),
                found: value_type,
            });
        }
        *self = SettingValue::zero(value_type);
        Ok(())
    }

    /// Parse `input` as a value of `value_type`.
    pub fn parse(value_type: ValueType, input: &str) -> Result<Self, ValueError> {
        let mut value = SettingValue::zero(value_type);
        value.assign_from_str(input)?;
        Ok(value)
    }

    /// Assign from text, keeping the current type.
    ///
    /// Booleans accept anything: empty, `"0"`, `"f"`, `"F"`, `"false"` and
    /// `"FALSE"` are false, every other string is true. Integers take the
    /// leading decimal number after optional whitespace and sign, and fail
    /// only when there is no digit at all. On failure the value is left as
    /// the zero of its type.
    pub fn assign_from_str(&mut self, input: &str) -> Result<(), ValueError> {
        tracing::debug!(input, value_type = %self.value_type(), "value from string");
        let value_type = self.value_type();
        self.reset(value_type, false)?;
        match self {
            SettingValue::Boolean(b) => {
                *b = !matches!(input, "" | "0" | "f" | "F" | "false" | "FALSE");
            }
            SettingValue::UInt(u) => {
                let (negative, magnitude) = leading_integer(input).ok_or_else(|| ValueError::Parse {
                    value_type,
                    input: input.to_string(),
                })?;
                // Unsigned parsing of a negative number wraps around.
                let wide = if negative { magnitude.wrapping_neg() } else { magnitude };
                *u = wide as u32;
            }
            SettingValue::Int(i) => {
                let (negative, magnitude) = leading_integer(input).ok_or_else(|| ValueError::Parse {
                    value_type,
                    input: input.to_string(),
                })?;
                let wide = if negative {
                    i64::try_from(magnitude).map(|m| -m).unwrap_or(i64::MIN)
                } else {
                    i64::try_from(magnitude).unwrap_or(i64::MAX)
                };
                *i = wide as i32;
            }
            SettingValue::String(s) => {
                s.push_str(input);
            }
        }
        Ok(())
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_uint(&self) -> Option<u32> {
        match self {
            SettingValue::UInt(u) => Some(*u),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            SettingValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SettingValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Boolean(true) => f.write_str("1"),
            SettingValue::Boolean(false) => f.write_str("0"),
            SettingValue::UInt(u) => write!(f, "{}", u),
            SettingValue::Int(i) => write!(f, "{}", i),
            SettingValue::String(s) => f.write_str(s),
        }
    }
}

/// Leading `[ws][+-]digits` of `input`, with the magnitude saturated to
/// `u64::MAX`. `None` when no digit is present.
fn leading_integer(input: &str) -> Option<(bool, u64)> {
    let s = input.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits: &str = &rest[..rest.bytes().take_while(u8::is_ascii_digit).count()];
    if digits.is_empty() {
        return None;
    }
    let magnitude = digits.bytes().fold(0u64, |acc, d| {
        acc.saturating_mul(10).saturating_add(u64::from(d - b'0'))
    });
    Some((negative, magnitude))
}

/// Index of `needle` in `haystack`, compared as strings.
pub fn find_string<S: AsRef<str>>(haystack: &[S], needle: &str) -> Option<usize> {
    haystack.iter().position(|s| s.as_ref() == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_false_spellings() {
        for input in ["", "0", "f", "F", "false", "FALSE"] {
            let v = SettingValue::parse(ValueType::Boolean, input).unwrap();
            assert_eq!(v, SettingValue::Boolean(false), "input {:?}", input);
        }
    }

    #[test]
    fn test_bool_everything_else_is_true() {
        for input in ["1", "t", "true", "TRUE", "False", "no", "yes", " "] {
            let v = SettingValue::parse(ValueType::Boolean, input).unwrap();
            assert_eq!(v, SettingValue::Boolean(true), "input {:?}", input);
        }
    }

    #[test]
    fn test_bool_formats_as_digit() {
        assert_eq!(SettingValue::Boolean(true).to_string(), "1");
        assert_eq!(SettingValue::Boolean(false).to_string(), "0");
    }

    #[test]
    fn test_false_round_trip() {
        let v = SettingValue::parse(ValueType::Boolean, "false").unwrap();
        let back = SettingValue::parse(ValueType::Boolean, &v.to_string()).unwrap();
        assert_eq!(back.as_bool(), Some(false));
    }

    #[test]
    fn test_int_round_trip() {
        let v = SettingValue::parse(ValueType::Int, "42").unwrap();
        assert_eq!(v.as_int(), Some(42));
        let back = SettingValue::parse(ValueType::Int, &v.to_string()).unwrap();
        assert_eq!(back.as_int(), Some(42));
    }

    #[test]
    fn test_int_takes_leading_number() {
        assert_eq!(SettingValue::parse(ValueType::Int, "  -17px").unwrap().as_int(), Some(-17));
        assert_eq!(SettingValue::parse(ValueType::Int, "+8").unwrap().as_int(), Some(8));
        assert_eq!(SettingValue::parse(ValueType::Int, "0").unwrap().as_int(), Some(0));
    }

    #[test]
    fn test_int_without_digits_fails() {
        let err = SettingValue::parse(ValueType::Int, "abc").unwrap_err();
        assert_eq!(
            err,
            ValueError::Parse { value_type: ValueType::Int, input: "abc".to_string() }
        );
        assert!(SettingValue::parse(ValueType::Int, "").is_err());
        assert!(SettingValue::parse(ValueType::Int, "-").is_err());
    }

    #[test]
    fn test_uint_parse() {
        assert_eq!(SettingValue::parse(ValueType::UInt, "10").unwrap().as_uint(), Some(10));
        assert_eq!(SettingValue::parse(ValueType::UInt, "-1").unwrap().as_uint(), Some(u32::MAX));
        assert!(SettingValue::parse(ValueType::UInt, "x1").is_err());
    }

    #[test]
    fn test_string_is_verbatim() {
        let v = SettingValue::parse(ValueType::String, "asdfghjkl;").unwrap();
        assert_eq!(v.as_str(), Some("asdfghjkl;"));
        assert_eq!(v.to_string(), "asdfghjkl;");
    }

    #[test]
    fn test_assign_keeps_type() {
        let mut v = SettingValue::Int(5);
        v.assign_from_str("12").unwrap();
        assert_eq!(v, SettingValue::Int(12));
    }

    #[test]
    fn test_reset_refuses_type_change() {
        let mut v = SettingValue::Int(5);
        let err = v.reset(ValueType::Boolean, false).unwrap_err();
        assert_eq!(
            err,
            ValueError::TypeMismatch { expected: ValueType::Int, found: ValueType::Boolean }
        );
        assert_eq!(v, SettingValue::Int(5));

        v.reset(ValueType::Boolean, true).unwrap();
        assert_eq!(v, SettingValue::Boolean(false));
    }

    #[test]
    fn test_find_string() {
        let choices = ["disable", "keyboard", "ime"];
        assert_eq!(find_string(&choices, "keyboard"), Some(1));
        assert_eq!(find_string(&choices, "Keyboard"), None);
        let owned = vec!["a".to_string()];
        assert_eq!(find_string(&owned, "a"), Some(0));
    }
}
