//! This module declares the parameter catalog.
//!
//! A catalog is a static document mapping group keys to parameter groups, and
//! each group maps parameter names to their definitions. It is loaded once and
//! only read afterwards: consumers enumerate groups to build sections, walk the
//! definitions of a group to build fields, and look parameters up by their
//! stable `param_key`.
mod definition;
mod embedded;
mod group;
mod vocab;

pub use definition::*;
pub use embedded::*;
pub use group::*;
pub use vocab::*;

use crate::error::{Error, Result};
use log::debug;
use serde::{
    de::{self, MapAccess, Visitor},
    Deserialize, Deserializer, Serialize,
};
use std::{
    collections::{btree_map, BTreeMap, HashMap},
    fmt, fs, io,
    path::Path,
    str::FromStr,
};

/// Group key -> parameter group.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    groups: BTreeMap<String, ParameterGroup>,
}

struct CatalogVisitor;

impl<'de> Visitor<'de> for CatalogVisitor {
    type Value = Catalog;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object of parameter groups")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Catalog, A::Error> {
        let mut groups = BTreeMap::new();
        while let Some(key) = map.next_key::<String>()? {
            match groups.entry(key) {
                btree_map::Entry::Occupied(e) => {
                    return Err(de::Error::custom(format_args!("duplicate group `{}`", e.key())));
                }
                btree_map::Entry::Vacant(e) => {
                    e.insert(map.next_value::<ParameterGroup>()?);
                }
            }
        }
        Ok(Catalog { groups })
    }
}

// Repeated group keys are an error rather than last-write-wins.
impl<'de> Deserialize<'de> for Catalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(CatalogVisitor)
    }
}

/// A definition together with its position in the catalog.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Entry<'a> {
    pub group: &'a str,
    pub name: &'a str,
    #[serde(flatten)]
    pub definition: &'a ParameterDefinition,
}

impl Entry<'_> {
    /// Dotted `group.name` path, used in reports.
    pub fn path(&self) -> String {
        format!("{}.{}", self.group, self.name)
    }
}

/// An integrity violation found in a catalog document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Issue {
    EmptyGroupLabel { group: String },
    EmptyGroup { group: String },
    EmptyLabel { path: String },
    EmptyParamKey { path: String },
    DuplicateParamKey { param_key: String, first: String, second: String },
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Issue::EmptyGroupLabel { group } => write!(f, "group {} has an empty groupLabel", group),
            Issue::EmptyGroup { group } => write!(f, "group {} has no parameters", group),
            Issue::EmptyLabel { path } => write!(f, "{} has an empty label", path),
            Issue::EmptyParamKey { path } => write!(f, "{} has an empty param_key", path),
            Issue::DuplicateParamKey {
                param_key,
                first,
                second,
            } => write!(
                f,
                "param_key {:?} is used by both {} and {}",
                param_key, first, second
            ),
        }
    }
}

/// Vocabulary counts over a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CatalogSummary {
    pub groups: usize,
    pub definitions: usize,
    pub by_data_type: BTreeMap<DataType, usize>,
    pub by_distribution: BTreeMap<Distribution, usize>,
}

#[derive(Serialize)]
struct CsvRow<'a> {
    group: &'a str,
    group_label: &'a str,
    name: &'a str,
    label: &'a str,
    param_key: &'a str,
    data_type: DataType,
    distribution: Distribution,
    title: &'a str,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a catalog document.
    pub fn from_json_str(data: &str) -> Result<Self> {
        let catalog = Self::parse_unchecked(data)?;
        catalog.validate()?;
        debug!(
            "loaded catalog with {} groups and {} parameters",
            catalog.groups.len(),
            catalog.len()
        );
        Ok(catalog)
    }

    /// Parse a catalog document without checking its integrity.
    pub fn parse_unchecked(data: &str) -> Result<Self> {
        Ok(serde_json::from_str(data)?)
    }

    /// Read, parse and validate a catalog file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("reading catalog from {}", path.display());
        let data = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_json_str(&data)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Add a group, returning the one previously stored under `key`.
    pub fn insert(&mut self, key: impl Into<String>, group: ParameterGroup) -> Option<ParameterGroup> {
        self.groups.insert(key.into(), group)
    }

    /// Groups by ascending group key.
    pub fn groups(&self) -> impl Iterator<Item = (&str, &ParameterGroup)> {
        self.groups.iter().map(|(k, g)| (k.as_str(), g))
    }

    pub fn group(&self, key: &str) -> Option<&ParameterGroup> {
        self.groups.get(key)
    }

    pub fn definition(&self, group: &str, name: &str) -> Option<&ParameterDefinition> {
        self.group(group)?.get(name)
    }

    /// Every definition, by group key and then by parameter name.
    pub fn definitions(&self) -> impl Iterator<Item = Entry<'_>> {
        self.groups.iter().flat_map(|(group, params)| {
            params.iter().map(move |(name, definition)| Entry {
                group,
                name,
                definition,
            })
        })
    }

    /// Find a definition by its stable key.
    pub fn by_param_key(&self, param_key: &str) -> Option<Entry<'_>> {
        self.definitions()
            .find(|e| e.definition.param_key() == param_key)
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Total number of definitions.
    pub fn len(&self) -> usize {
        self.groups.values().map(ParameterGroup::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Collect every integrity violation, by ascending group key and parameter name.
    pub fn issues(&self) -> Vec<Issue> {
        let mut issues = Vec::new();
        let mut seen: HashMap<&str, String> = HashMap::new();

        for (key, group) in &self.groups {
            if group.label().trim().is_empty() {
                issues.push(Issue::EmptyGroupLabel { group: key.clone() });
            }
            if group.is_empty() {
                issues.push(Issue::EmptyGroup { group: key.clone() });
            }
            for (name, def) in group {
                let path = format!("{}.{}", key, name);
                if def.label().trim().is_empty() {
                    issues.push(Issue::EmptyLabel { path: path.clone() });
                }
                let param_key = def.param_key().as_str();
                if param_key.trim().is_empty() {
                    issues.push(Issue::EmptyParamKey { path });
                    continue;
                }
                match seen.get(param_key) {
                    Some(first) => issues.push(Issue::DuplicateParamKey {
                        param_key: param_key.to_string(),
                        first: first.clone(),
                        second: path,
                    }),
                    None => {
                        seen.insert(param_key, path);
                    }
                }
            }
        }
        issues
    }

    /// Fail with the first integrity violation, if any.
    pub fn validate(&self) -> Result<()> {
        match self.issues().into_iter().next() {
            Some(issue) => Err(Error::Integrity(issue)),
            None => Ok(()),
        }
    }

    pub fn summary(&self) -> CatalogSummary {
        let mut summary = CatalogSummary {
            groups: self.group_count(),
            ..Default::default()
        };
        for entry in self.definitions() {
            summary.definitions += 1;
            *summary
                .by_data_type
                .entry(entry.definition.data_type())
                .or_insert(0) += 1;
            *summary
                .by_distribution
                .entry(entry.definition.distribution())
                .or_insert(0) += 1;
        }
        summary
    }

    /// Write one CSV row per definition, in enumeration order.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        for (key, group) in self.groups() {
            for (name, def) in group {
                wtr.serialize(CsvRow {
                    group: key,
                    group_label: group.label(),
                    name,
                    label: def.label(),
                    param_key: def.param_key(),
                    data_type: def.data_type(),
                    distribution: def.distribution(),
                    title: def.title(),
                })?;
            }
        }
        wtr.flush().map_err(csv::Error::from)?;
        Ok(())
    }
}

impl FromStr for Catalog {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Catalog::from_json_str(s)
    }
}
