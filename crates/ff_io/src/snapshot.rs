//! `Snapshot`/`Patch` JSON (de)serialization (spec.md §4.4, §4.5, §6).
//!
//! Parsing is push-validated: the wire DTOs below mirror the JSON schema
//! exactly, `serde_json` does the structural/shape checking (surfaced as
//! `ParseError::InvalidJson`/`InvalidSnapshot`), and a second pass converts
//! each wire value into its domain counterpart, validating ramp-up ranges,
//! version ranges, and declared types as it goes — one `ParseError` per
//! first offending leaf, carrying its JSON path (spec.md §9 "Serialization").

use crate::declared::DeclaredFeatures;
use crate::errors::{ParseError, ParseResult};
use crate::wire::FlagValueWire;
use ff_algo::criteria::Criteria;
use ff_algo::definition::{FlagDefinition, DEFAULT_SALT};
use ff_algo::rule::Rule;
use ff_core::ids::{LocaleTag, PlatformTag, StableId};
use ff_core::value::FlagValue;
use ff_core::version::VersionRange;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An immutable, per-namespace map from feature key to flag definition
/// (spec.md §3 "Snapshot"). Construction from JSON always goes through
/// `from_json`, which guarantees every definition it contains satisfies
/// spec.md §3's invariants.
#[derive(Clone, Default)]
pub struct Snapshot {
    flags: BTreeMap<String, FlagDefinition>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&FlagDefinition> {
        self.flags.get(key)
    }

    pub fn feature_keys(&self) -> impl Iterator<Item = &str> {
        self.flags.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// `Snapshot::with(patch)` (spec.md §4.4): removes first (idempotent on
    /// absent keys), then installs upserts, re-sorting each definition's
    /// rules at install time. The receiver is left unchanged; a new
    /// `Snapshot` is returned.
    pub fn with(&self, patch: &Patch) -> Snapshot {
        let mut flags = self.flags.clone();
        for key in &patch.removes {
            flags.remove(key);
        }
        for def in &patch.upserts {
            flags.insert(def.feature_key.clone(), def.clone());
        }
        Snapshot { flags }
    }

    pub fn to_json(&self) -> String {
        let wire = SnapshotWire {
            flags: self.flags.values().map(FlagDefinitionWire::from_domain).collect(),
        };
        serde_json::to_string(&wire).expect("snapshot wire DTOs always serialize")
    }

    /// SHA-256 over this snapshot's canonical JSON form — a content-derived
    /// identity two independently-serialized copies of the same snapshot
    /// always agree on, useful as a cache key or for audit logs. Two
    /// snapshots with the same flags hash identically regardless of
    /// serialization key order.
    pub fn content_hash(&self) -> String {
        let value: serde_json::Value = serde_json::from_str(&self.to_json()).expect("snapshot JSON always parses back");
        crate::hasher::sha256_canonical(&value)
    }

    pub fn from_json(s: &str, declared: &DeclaredFeatures) -> ParseResult<Snapshot> {
        let wire: SnapshotWire = serde_json::from_str(s).map_err(|e| ParseError::InvalidJson { message: e.to_string() })?;
        let mut flags = BTreeMap::new();
        for (i, def_wire) in wire.flags.into_iter().enumerate() {
            let path = format!("flags[{i}]");
            let def = def_wire.into_domain(&path, declared)?;
            flags.insert(def.feature_key.clone(), def);
        }
        Ok(Snapshot { flags })
    }
}

/// A set of upserts and removals applied atomically to produce the next
/// snapshot (spec.md §3 "Patch", §4.4).
#[derive(Clone, Default)]
pub struct Patch {
    pub upserts: Vec<FlagDefinition>,
    pub removes: Vec<String>,
}

impl Patch {
    pub fn to_json(&self) -> String {
        let wire = PatchWire {
            flags: self.upserts.iter().map(FlagDefinitionWire::from_domain).collect(),
            remove_keys: self.removes.clone(),
        };
        serde_json::to_string(&wire).expect("patch wire DTOs always serialize")
    }

    pub fn from_json(s: &str, declared: &DeclaredFeatures) -> ParseResult<Patch> {
        let wire: PatchWire = serde_json::from_str(s).map_err(|e| ParseError::InvalidJson { message: e.to_string() })?;
        let mut upserts = Vec::with_capacity(wire.flags.len());
        for (i, def_wire) in wire.flags.into_iter().enumerate() {
            let path = format!("flags[{i}]");
            upserts.push(def_wire.into_domain(&path, declared)?);
        }
        Ok(Patch { upserts, removes: wire.remove_keys })
    }
}

#[derive(Serialize, Deserialize)]
struct SnapshotWire {
    flags: Vec<FlagDefinitionWire>,
}

#[derive(Serialize, Deserialize)]
struct PatchWire {
    flags: Vec<FlagDefinitionWire>,
    #[serde(rename = "removeKeys", default)]
    remove_keys: Vec<String>,
}

#[derive(Serialize, Deserialize)]
struct FlagDefinitionWire {
    key: String,
    #[serde(rename = "defaultValue")]
    default_value: FlagValueWire,
    #[serde(default = "default_salt")]
    salt: String,
    #[serde(rename = "isActive", default = "default_active")]
    is_active: bool,
    #[serde(default)]
    rules: Vec<RuleWire>,
}

fn default_salt() -> String {
    DEFAULT_SALT.to_string()
}

fn default_active() -> bool {
    true
}

#[derive(Serialize, Deserialize)]
struct RuleWire {
    value: FlagValueWire,
    #[serde(rename = "rampUp", default = "default_ramp_up")]
    ramp_up: f64,
    #[serde(default)]
    note: Option<String>,
    #[serde(default)]
    platforms: Vec<String>,
    #[serde(default)]
    locales: Vec<String>,
    #[serde(rename = "versionRange", default)]
    version_range: VersionRange,
    #[serde(default)]
    axes: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    allowlist: Vec<String>,
}

fn default_ramp_up() -> f64 {
    100.0
}

impl FlagDefinitionWire {
    fn from_domain(def: &FlagDefinition) -> Self {
        FlagDefinitionWire {
            key: def.feature_key.clone(),
            default_value: def.default_value.clone().into(),
            salt: def.salt.clone(),
            is_active: def.active,
            rules: def.rules().iter().map(RuleWire::from_domain).collect(),
        }
    }

    fn into_domain(self, path: &str, declared: &DeclaredFeatures) -> ParseResult<FlagDefinition> {
        let declared_kind = declared.type_kind_of(&self.key).ok_or_else(|| ParseError::FeatureNotFound { key: self.key.clone() })?;

        let default_value: FlagValue = self.default_value.into();
        if !default_value.matches_kind(declared_kind) {
            return Err(ParseError::TypeMismatch {
                key: self.key.clone(),
                expected: declared_kind.to_string(),
                actual: default_value.kind().to_string(),
            });
        }

        let mut rules = Vec::with_capacity(self.rules.len());
        for (i, rule_wire) in self.rules.into_iter().enumerate() {
            let rule_path = format!("{path}.rules[{i}]");
            rules.push(rule_wire.into_domain(&rule_path, &self.key, declared_kind)?);
        }

        Ok(FlagDefinition::new(self.key, default_value, self.is_active, self.salt, rules))
    }
}

impl RuleWire {
    fn from_domain(rule: &Rule) -> Self {
        RuleWire {
            value: rule.value.clone().into(),
            ramp_up: rule.criteria.ramp_up.value(),
            note: rule.note.clone(),
            platforms: rule.criteria.platforms.iter().map(|p| p.as_str().to_string()).collect(),
            locales: rule.criteria.locales.iter().map(|l| l.as_str().to_string()).collect(),
            version_range: rule.criteria.version_range,
            axes: rule
                .criteria
                .axes
                .iter()
                .map(|(k, v)| (k.clone(), v.iter().cloned().collect()))
                .collect(),
            allowlist: rule.criteria.allowlist.iter().map(|s| s.as_str().to_string()).collect(),
        }
    }

    fn into_domain(self, path: &str, feature_key: &str, declared_kind: ff_core::value::TypeKind) -> ParseResult<Rule> {
        let value: FlagValue = self.value.into();
        if !value.matches_kind(declared_kind) {
            return Err(ParseError::TypeMismatch {
                key: feature_key.to_string(),
                expected: declared_kind.to_string(),
                actual: value.kind().to_string(),
            });
        }

        let platforms = self
            .platforms
            .into_iter()
            .map(|p| PlatformTag::new(p).map_err(|_| blank_tag_error(path, "platforms")))
            .collect::<ParseResult<_>>()?;
        let locales = self
            .locales
            .into_iter()
            .map(|l| LocaleTag::new(l).map_err(|_| blank_tag_error(path, "locales")))
            .collect::<ParseResult<_>>()?;
        let allowlist = self
            .allowlist
            .into_iter()
            .map(|id| StableId::new(id).map_err(|_| blank_tag_error(path, "allowlist")))
            .collect::<ParseResult<_>>()?;

        if let VersionRange::FullyBound { min, max } = self.version_range {
            if min > max {
                return Err(ParseError::InvalidRange { min, max });
            }
        }

        let ramp_up = ff_core::rampup::RampUp::new(self.ramp_up).map_err(|_| ParseError::InvalidRampUp { value: self.ramp_up })?;

        let axes = self
            .axes
            .into_iter()
            .map(|(k, v)| (k, v.into_iter().collect()))
            .collect();

        let criteria = Criteria {
            platforms,
            locales,
            version_range: self.version_range,
            axes,
            allowlist,
            ramp_up,
            extension: None,
        };

        Ok(Rule::new(value, criteria, self.note))
    }
}

fn blank_tag_error(path: &str, field: &str) -> ParseError {
    ParseError::InvalidSnapshot { message: format!("{field} entries must not be blank"), path: format!("{path}.{field}") }
}
