use crate::{
    error::{Error, Result},
    prelude::{Int, Real},
};
use paste::paste;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Declare a closed vocabulary serialized as lowercase strings.
///
/// Generates `as_str`, `ALL`, one `is_<member>` predicate per variant and the
/// `Display`/`FromStr` pair. `$err` builds the error for unknown strings.
macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident, $err:path {
            $($(#[$vmeta:meta])* $variant:ident => $text:literal),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($(#[$vmeta])* $variant,)*
        }

        impl $name {
            /// Every member of the vocabulary.
            pub const ALL: &'static [$name] = &[$($name::$variant,)*];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text,)*
                }
            }

            paste! {
                $(
                    pub fn [<is_ $variant:lower>](self) -> bool {
                        self == $name::$variant
                    }
                )*
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                match s {
                    $($text => Ok($name::$variant),)*
                    _ => Err($err(s.to_string())),
                }
            }
        }
    };
}

vocabulary! {
    /// Value type of a parameter. Chooses the input widget and the coercion
    /// applied to raw input.
    DataType, Error::UnknownDataType {
        Int => "int",
        Float => "float",
    }
}

vocabulary! {
    /// Distribution family assumed to govern a parameter's variability.
    Distribution, Error::UnknownDistribution {
        Gamma => "gamma",
        Beta => "beta",
        /// Point value, no variability.
        Constant => "constant",
    }
}

impl DataType {
    /// Coerce raw text into a value of this type.
    ///
    /// Surrounding whitespace is ignored. Blank input yields
    /// [`Error::MissingValue`]; floats must be finite.
    pub fn parse_value(self, input: &str) -> Result<ParamValue> {
        let text = input.trim();
        if text.is_empty() {
            return Err(Error::MissingValue);
        }
        let invalid = || Error::InvalidValue {
            value: text.to_string(),
            expected: self.as_str(),
        };
        match self {
            DataType::Int => text.parse::<Int>().map(ParamValue::Int).map_err(|_| invalid()),
            DataType::Float => match text.parse::<Real>() {
                Ok(x) if x.is_finite() => Ok(ParamValue::Float(x)),
                _ => Err(invalid()),
            },
        }
    }
}

/// A raw value coerced according to a parameter's [`DataType`].
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(Int),
    Float(Real),
}

impl ParamValue {
    pub fn data_type(&self) -> DataType {
        match self {
            ParamValue::Int(_) => DataType::Int,
            ParamValue::Float(_) => DataType::Float,
        }
    }

    pub fn as_f64(&self) -> Real {
        match *self {
            ParamValue::Int(n) => n as Real,
            ParamValue::Float(x) => x,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(n) => write!(f, "{}", n),
            ParamValue::Float(x) => write!(f, "{}", x),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn vocabulary_strings() {
        assert_eq!(DataType::ALL, &[DataType::Int, DataType::Float]);
        assert_eq!("beta".parse::<Distribution>().unwrap(), Distribution::Beta);
        assert_eq!(Distribution::Constant.to_string(), "constant");
        assert!(Distribution::Gamma.is_gamma());
        assert!(!Distribution::Gamma.is_beta());
        assert!(DataType::Float.is_float());
    }

    #[test]
    fn unknown_members_are_rejected() {
        match "normal".parse::<Distribution>() {
            Err(Error::UnknownDistribution(s)) => assert_eq!(s, "normal"),
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!("Float".parse::<DataType>(), Err(Error::UnknownDataType(_))));
        assert!(serde_json::from_str::<DataType>("\"string\"").is_err());
    }

    #[test]
    fn coerce_values() {
        assert_eq!(DataType::Int.parse_value(" 42 ").unwrap(), ParamValue::Int(42));
        assert_approx_eq!(DataType::Float.parse_value("0.0075").unwrap().as_f64(), 0.0075);
        assert_eq!(DataType::Float.parse_value("3").unwrap(), ParamValue::Float(3.0));
        assert!(matches!(DataType::Int.parse_value("   "), Err(Error::MissingValue)));
        assert!(matches!(
            DataType::Int.parse_value("2.5"),
            Err(Error::InvalidValue { expected: "int", .. })
        ));
        assert!(DataType::Float.parse_value("inf").is_err());
        assert!(DataType::Float.parse_value("NaN").is_err());
    }
}
