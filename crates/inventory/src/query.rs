//! Read-side views derived from a loaded document.

use core::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use crate::document::{BusinessUnit, System};

/// Per-business-unit statistics (the business unit listing).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BusinessUnitStats {
    pub name: String,
    pub total_systems: usize,
    pub systems_with_issues: usize,
    pub hosts_with_populated_entries: u64,
    pub hosts_with_internet_routable_dns: u64,
}

impl BusinessUnitStats {
    pub fn from_unit(name: &str, unit: &BusinessUnit) -> Self {
        Self {
            name: name.to_string(),
            total_systems: unit.systems.len(),
            systems_with_issues: unit.issue_count(),
            hosts_with_populated_entries: unit.hosts_with_populated_entries,
            hosts_with_internet_routable_dns: unit.hosts_with_internet_routable_dns,
        }
    }
}

/// A system tagged with the business unit that owns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SystemEntry {
    pub business_unit: String,
    #[serde(flatten)]
    pub system: System,
}

/// Which systems a flattened listing keeps.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum SystemFilter {
    #[default]
    All,
    /// Only systems whose `issues` is non-empty.
    WithIssues,
}

impl SystemFilter {
    pub fn matches(&self, system: &System) -> bool {
        match self {
            SystemFilter::All => true,
            SystemFilter::WithIssues => system.has_issues(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown system filter `{0}` (expected one of: all, with_issues)")]
pub struct UnknownFilter(pub String);

impl FromStr for SystemFilter {
    type Err = UnknownFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "all" => Ok(SystemFilter::All),
            "with_issues" | "withIssues" | "issues" => Ok(SystemFilter::WithIssues),
            other => Err(UnknownFilter(other.to_string())),
        }
    }
}
