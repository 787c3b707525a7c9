pub use crate::catalog::{
    builtin, Catalog, CatalogSummary, DataType, Distribution, Entry, Issue, ParamValue,
    ParameterDefinition, ParameterGroup,
};
pub use crate::error::{Error, Result};

/// Base Real type used by this crate. Uses an alias to easily change precision
/// if necessary.
pub type Real = f64;

/// Integer values carried by `int` parameters.
pub type Int = i64;
