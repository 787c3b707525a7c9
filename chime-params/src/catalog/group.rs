use super::ParameterDefinition;
use serde::{
    de::{self, MapAccess, Visitor},
    Deserialize, Deserializer, Serialize,
};
use std::{
    collections::{btree_map, BTreeMap},
    fmt,
};

const GROUP_LABEL: &str = "groupLabel";

/// A named category bundling related parameter definitions.
///
/// In the document the definitions are sibling keys of `groupLabel`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ParameterGroup {
    #[serde(rename = "groupLabel")]
    group_label: String,

    #[serde(flatten)]
    parameters: BTreeMap<String, ParameterDefinition>,
}

impl ParameterGroup {
    pub fn new(group_label: impl Into<String>) -> Self {
        ParameterGroup {
            group_label: group_label.into(),
            parameters: BTreeMap::new(),
        }
    }

    /// Add a definition, returning the one previously stored under `name`.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        definition: ParameterDefinition,
    ) -> Option<ParameterDefinition> {
        self.parameters.insert(name.into(), definition)
    }

    /// Builder-style variant of [`ParameterGroup::insert`].
    pub fn with(mut self, name: impl Into<String>, definition: ParameterDefinition) -> Self {
        self.insert(name, definition);
        self
    }

    pub fn label(&self) -> &str {
        &self.group_label
    }

    pub fn get(&self, name: &str) -> Option<&ParameterDefinition> {
        self.parameters.get(name)
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Definitions by ascending parameter name.
    pub fn iter(&self) -> btree_map::Iter<'_, String, ParameterDefinition> {
        self.parameters.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.parameters.keys().map(String::as_str)
    }
}

struct GroupVisitor;

impl<'de> Visitor<'de> for GroupVisitor {
    type Value = ParameterGroup;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a parameter group object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<ParameterGroup, A::Error> {
        let mut group_label: Option<String> = None;
        let mut parameters = BTreeMap::new();

        while let Some(key) = map.next_key::<String>()? {
            if key == GROUP_LABEL {
                if group_label.is_some() {
                    return Err(de::Error::duplicate_field(GROUP_LABEL));
                }
                group_label = Some(map.next_value()?);
                continue;
            }
            match parameters.entry(key) {
                btree_map::Entry::Occupied(e) => {
                    return Err(de::Error::custom(format_args!(
                        "duplicate parameter `{}`",
                        e.key()
                    )));
                }
                btree_map::Entry::Vacant(e) => {
                    e.insert(map.next_value::<ParameterDefinition>()?);
                }
            }
        }

        let group_label = group_label.ok_or_else(|| de::Error::missing_field(GROUP_LABEL))?;
        Ok(ParameterGroup {
            group_label,
            parameters,
        })
    }
}

// Repeated names are an error rather than last-write-wins.
impl<'de> Deserialize<'de> for ParameterGroup {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(GroupVisitor)
    }
}

impl<'a> IntoIterator for &'a ParameterGroup {
    type Item = (&'a String, &'a ParameterDefinition);
    type IntoIter = btree_map::Iter<'a, String, ParameterDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
