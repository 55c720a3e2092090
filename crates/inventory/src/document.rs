use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value as JsonValue;

use invdash_core::{InventoryError, InventoryResult};

/// Global counters reported by the inventory export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_hosts_with_populated_entries: u64,
    pub hosts_with_bigfix: u64,
    pub combined_hosts_empty_dns: u64,
    pub hosts_with_populated_entries_from_empty_dns: u64,
    pub percentage_with_populated_entries: f64,
    pub hosts_using_internet_routable_ips: u64,
}

/// A single inventoried host.
///
/// Records are not deeply validated: a field that is missing, `null` or of
/// the wrong type falls back to its default. A lone string where a list is
/// expected is read as a one-element list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct System {
    #[serde(default, deserialize_with = "lenient")]
    pub hostname: String,
    #[serde(default, deserialize_with = "lenient")]
    pub ip: String,
    #[serde(default, deserialize_with = "string_list")]
    pub dns_servers: Vec<String>,
    /// Presence of the BigFix management agent.
    #[serde(default, deserialize_with = "lenient")]
    pub bigfix: bool,
    #[serde(default, deserialize_with = "string_list")]
    pub issues: Vec<String>,
}

impl System {
    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }
}

/// An organizational grouping that owns a set of systems.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessUnit {
    pub hosts_with_populated_entries: u64,
    pub hosts_with_internet_routable_dns: u64,
    /// Elements that are not objects are kept as empty systems.
    #[serde(deserialize_with = "lenient_systems")]
    pub systems: Vec<System>,
}

impl BusinessUnit {
    pub fn issue_count(&self) -> usize {
        self.systems.iter().filter(|s| s.has_issues()).count()
    }
}

/// Business units keyed by name, in the order they appeared in the input.
///
/// Serializes as a JSON object so a document can be written back out in the
/// same shape it was read from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BusinessUnits(Vec<(String, BusinessUnit)>);

impl BusinessUnits {
    pub fn new(units: Vec<(String, BusinessUnit)>) -> Self {
        Self(units)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BusinessUnit)> {
        self.0.iter().map(|(name, unit)| (name.as_str(), unit))
    }

    pub fn get_index(&self, pos: usize) -> Option<(&str, &BusinessUnit)> {
        self.0.get(pos).map(|(name, unit)| (name.as_str(), unit))
    }

    pub fn system_count(&self) -> usize {
        self.0.iter().map(|(_, unit)| unit.systems.len()).sum()
    }
}

impl Serialize for BusinessUnits {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(name, unit)| (name, unit)))
    }
}

/// Root of the inventory export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryDocument {
    pub summary: Summary,
    pub business_units: BusinessUnits,
}

impl InventoryDocument {
    /// Parse and structurally validate a raw JSON document.
    ///
    /// Required: a root object with `summary` and `business_units`, where
    /// `business_units` is an object of objects whose `systems` is an array.
    /// Unknown keys are ignored at every level.
    pub fn parse(raw: &[u8]) -> InventoryResult<Self> {
        let root: JsonValue = serde_json::from_slice(raw)
            .map_err(|e| InventoryError::malformed(format!("invalid JSON: {e}")))?;

        let JsonValue::Object(mut root) = root else {
            return Err(InventoryError::malformed("document root must be an object"));
        };

        let summary = root
            .remove("summary")
            .ok_or_else(|| InventoryError::malformed("missing required key `summary`"))?;
        let units = root
            .remove("business_units")
            .ok_or_else(|| InventoryError::malformed("missing required key `business_units`"))?;

        let summary: Summary = serde_json::from_value(summary)
            .map_err(|e| InventoryError::malformed(format!("`summary`: {e}")))?;

        let JsonValue::Object(units) = units else {
            return Err(InventoryError::malformed("`business_units` must be an object"));
        };

        let mut parsed = Vec::with_capacity(units.len());
        for (name, unit) in units {
            let unit = parse_business_unit(&name, unit)?;
            parsed.push((name, unit));
        }

        Ok(Self {
            summary,
            business_units: BusinessUnits::new(parsed),
        })
    }
}

fn parse_business_unit(name: &str, unit: JsonValue) -> InventoryResult<BusinessUnit> {
    let JsonValue::Object(fields) = &unit else {
        return Err(InventoryError::malformed(format!(
            "business unit `{name}` must be an object"
        )));
    };

    match fields.get("systems") {
        Some(JsonValue::Array(_)) => {}
        Some(_) => {
            return Err(InventoryError::malformed(format!(
                "business unit `{name}`: `systems` must be an array"
            )));
        }
        None => {
            return Err(InventoryError::malformed(format!(
                "business unit `{name}`: missing required key `systems`"
            )));
        }
    }

    serde_json::from_value(unit)
        .map_err(|e| InventoryError::malformed(format!("business unit `{name}`: {e}")))
}

fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    let value = JsonValue::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match JsonValue::deserialize(deserializer)? {
        JsonValue::String(s) => vec![s],
        JsonValue::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                JsonValue::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

fn lenient_systems<'de, D>(deserializer: D) -> Result<Vec<System>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = Vec::<JsonValue>::deserialize(deserializer)?;
    Ok(items
        .into_iter()
        .map(|item| serde_json::from_value(item).unwrap_or_default())
        .collect())
}
