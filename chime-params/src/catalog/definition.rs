use super::{DataType, Distribution, ParamValue};
use crate::error::Result;
use getset::{CopyGetters, Getters};
use serde::{Deserialize, Serialize};

/// Metadata describing one model input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, CopyGetters)]
#[serde(deny_unknown_fields)]
pub struct ParameterDefinition {
    /// Display name.
    #[getset(get = "pub")]
    label: String,

    /// Stable identifier, unique across the whole catalog.
    #[getset(get = "pub")]
    param_key: String,

    #[serde(rename = "dataType")]
    #[getset(get_copy = "pub")]
    data_type: DataType,

    #[getset(get_copy = "pub")]
    distribution: Distribution,

    /// Human readable description. May be empty.
    #[serde(default)]
    #[getset(get = "pub")]
    title: String,
}

impl ParameterDefinition {
    pub fn new(
        label: impl Into<String>,
        param_key: impl Into<String>,
        data_type: DataType,
        distribution: Distribution,
        title: impl Into<String>,
    ) -> Self {
        ParameterDefinition {
            label: label.into(),
            param_key: param_key.into(),
            data_type,
            distribution,
            title: title.into(),
        }
    }

    /// Coerce raw input according to this parameter's data type.
    pub fn parse_value(&self, input: &str) -> Result<ParamValue> {
        self.data_type.parse_value(input)
    }
}
