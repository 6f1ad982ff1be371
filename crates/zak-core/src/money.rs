//! Strict monetary value parsing.
//!
//! Only two representations may cross into the kernel:
//! - a decimal string matching `^-?[0-9]+(\.[0-9]+)?$`, kept verbatim;
//! - an arbitrary-precision integer count of minor units.
//!
//! Machine numbers are refused outright, integers included, so every caller
//! converges on one canonical textual/integer form instead of silently
//! truncating a float somewhere downstream.

use std::borrow::Cow;
use std::fmt;
use std::sync::OnceLock;

use num_bigint::BigInt;
use regex::Regex;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use serde_json::Value;

use crate::error::{Result, ZakError};

/// ASCII digits only; `\d` would admit other Unicode decimal digits.
const DECIMAL_GRAMMAR: &str = r"^-?[0-9]+(\.[0-9]+)?$";

fn decimal_grammar() -> Option<&'static Regex> {
    static GRAMMAR: OnceLock<Option<Regex>> = OnceLock::new();
    GRAMMAR.get_or_init(|| Regex::new(DECIMAL_GRAMMAR).ok()).as_ref()
}

/// A monetary amount in one of the two admitted representations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonetaryValue {
    /// Decimal text, preserved exactly as received.
    Decimal(String),
    /// Integer count of minor currency units (e.g. cents).
    Minor(BigInt),
}

impl MonetaryValue {
    /// Validate a decimal string.
    pub fn decimal(s: impl Into<String>) -> Result<Self> {
        let s = s.into();
        if !is_decimal(&s) {
            return Err(ZakError::InvalidMonetaryFormat);
        }
        Ok(MonetaryValue::Decimal(s))
    }

    /// Wrap an arbitrary-precision minor-unit count.
    pub fn minor(n: impl Into<BigInt>) -> Self {
        MonetaryValue::Minor(n.into())
    }

    /// Tag used on the wire (`"decimal"` / `"minor"`).
    pub fn kind(&self) -> &'static str {
        match self {
            MonetaryValue::Decimal(_) => "decimal",
            MonetaryValue::Minor(_) => "minor",
        }
    }
}

impl fmt::Display for MonetaryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonetaryValue::Decimal(s) => f.write_str(s),
            MonetaryValue::Minor(n) => write!(f, "{n}"),
        }
    }
}

// `{"kind": "...", "value": "..."}`. Minor units go out as a string so no
// JSON number ever carries an amount.
impl Serialize for MonetaryValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut st = serializer.serialize_struct("MonetaryValue", 2)?;
        st.serialize_field("kind", self.kind())?;
        match self {
            MonetaryValue::Decimal(s) => st.serialize_field("value", s)?,
            MonetaryValue::Minor(n) => st.serialize_field("value", &n.to_string())?,
        }
        st.end()
    }
}

/// Untyped input, decoded once into an explicit shape before validation.
#[derive(Debug, Clone)]
pub enum AmountInput<'a> {
    /// Native floating-point number.
    Float(f64),
    /// Native fixed-width integer.
    Integer(i128),
    /// Text candidate for the decimal grammar.
    Text(Cow<'a, str>),
    /// Arbitrary-precision integer (minor units).
    BigInteger(BigInt),
    /// Anything else; carries the observed kind for the error message.
    Other(&'static str),
}

impl From<f64> for AmountInput<'_> {
    fn from(v: f64) -> Self {
        AmountInput::Float(v)
    }
}

impl From<f32> for AmountInput<'_> {
    fn from(v: f32) -> Self {
        AmountInput::Float(f64::from(v))
    }
}

macro_rules! native_integer_input {
    ($($t:ty),*) => {
        $(
            impl From<$t> for AmountInput<'_> {
                fn from(v: $t) -> Self {
                    AmountInput::Integer(i128::from(v))
                }
            }
        )*
    };
}

native_integer_input!(i8, i16, i32, i64, i128, u8, u16, u32, u64);

impl<'a> From<&'a str> for AmountInput<'a> {
    fn from(v: &'a str) -> Self {
        AmountInput::Text(Cow::Borrowed(v))
    }
}

impl From<String> for AmountInput<'_> {
    fn from(v: String) -> Self {
        AmountInput::Text(Cow::Owned(v))
    }
}

impl From<BigInt> for AmountInput<'_> {
    fn from(v: BigInt) -> Self {
        AmountInput::BigInteger(v)
    }
}

impl<'a> From<&'a Value> for AmountInput<'a> {
    fn from(v: &'a Value) -> Self {
        match v {
            // JSON has no big integers: every number here is a machine number.
            Value::Number(n) => match (n.as_i64(), n.as_u64()) {
                (Some(i), _) => AmountInput::Integer(i128::from(i)),
                (None, Some(u)) => AmountInput::Integer(i128::from(u)),
                _ => AmountInput::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => AmountInput::Text(Cow::Borrowed(s.as_str())),
            Value::Null => AmountInput::Other("null"),
            Value::Bool(_) => AmountInput::Other("boolean"),
            Value::Array(_) => AmountInput::Other("array"),
            Value::Object(_) => AmountInput::Other("object"),
        }
    }
}

/// Returns true when `s` matches the decimal grammar.
pub fn is_decimal(s: &str) -> bool {
    // A grammar that failed to compile admits nothing.
    decimal_grammar().map(|re| re.is_match(s)).unwrap_or(false)
}

/// Parse an untyped monetary value.
///
/// Total: every input yields either a `MonetaryValue` or one of
/// `InvalidMonetaryType`, `InvalidMonetaryFormat`, `InvalidMonetaryInput`.
pub fn parse_amount<'a>(input: impl Into<AmountInput<'a>>) -> Result<MonetaryValue> {
    match input.into() {
        AmountInput::Float(_) | AmountInput::Integer(_) => Err(ZakError::InvalidMonetaryType),
        AmountInput::Text(s) => {
            if !is_decimal(&s) {
                return Err(ZakError::InvalidMonetaryFormat);
            }
            Ok(MonetaryValue::Decimal(s.into_owned()))
        }
        AmountInput::BigInteger(n) => Ok(MonetaryValue::Minor(n)),
        AmountInput::Other(kind) => Err(ZakError::InvalidMonetaryInput(kind)),
    }
}
