use super::Catalog;
use std::sync::OnceLock;

/// The catalog document shipped with this crate.
pub const BUILTIN_JSON: &str = include_str!("../../data/parameters.json");

static BUILTIN: OnceLock<Catalog> = OnceLock::new();

/// Parsed and validated shipped catalog. Parsed on first use and shared.
///
/// The embedded document is checked by the test suite, so a failure here is a
/// build defect rather than a runtime condition.
pub fn builtin() -> &'static Catalog {
    BUILTIN.get_or_init(|| match Catalog::from_json_str(BUILTIN_JSON) {
        Ok(catalog) => catalog,
        Err(e) => panic!("embedded parameter catalog is invalid: {}", e),
    })
}
