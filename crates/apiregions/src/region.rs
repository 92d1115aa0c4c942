//! # Region
//!
//! A named tier holding an ordered set of exports (unique by package name)
//! and a free-form property map.
//!
//! ## Contracts
//!
//! - [`Region::add`] deduplicates by name; [`Region::remove`] matches by full
//!   value. A same-named export that differs in any field is therefore not
//!   removed. Callers wanting remove-by-name go through
//!   [`Region::export_by_name`] first.
//! - [`Region::list_all_exports`] puts the root-most ancestor's exports first
//!   and this region's own last, without deduplication across tiers.
//! - The [`FEATURE_ORIGINS_KEY`] property is either absent or a non-empty,
//!   deduplicated, comma-joined list of canonical artifact ids.
//! - Equality and hashing cover name, exports and properties. Chain links
//!   are not part of a region's value.

use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use apiregions_core::{ApiExport, ArtifactId, ValidationError, FEATURE_ORIGINS_KEY};

use crate::registry::ApiRegions;

/// Name of the least restrictive region.
pub const GLOBAL_REGION: &str = "global";

/// Handle to a region owned by an [`ApiRegions`] registry.
///
/// Handles are never reused within a registry; a handle to a removed region
/// resolves to nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionId(pub(crate) usize);

impl RegionId {
    /// Position of the region in its registry's allocation order.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "region#{}", self.0)
    }
}

/// A named API region.
#[derive(Debug, Clone)]
pub struct Region {
    name: String,
    exports: Vec<ApiExport>,
    properties: BTreeMap<String, String>,
    parent: Option<RegionId>,
    child: Option<RegionId>,
}

impl Region {
    /// Create an empty, unlinked region.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            exports: Vec::new(),
            properties: BTreeMap::new(),
            parent: None,
            child: None,
        }
    }

    /// The region name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this is the conventional [`GLOBAL_REGION`].
    pub fn is_global(&self) -> bool {
        self.name == GLOBAL_REGION
    }

    /// Add an export unless one with the same name is already present.
    ///
    /// Returns `true` if the export was appended.
    pub fn add(&mut self, export: ApiExport) -> bool {
        if self.exports.iter().any(|e| e.name() == export.name()) {
            tracing::trace!(
                region = %self.name,
                export = %export.name(),
                "export already present, not added"
            );
            return false;
        }
        self.exports.push(export);
        true
    }

    /// Remove the first export equal to `export` in every field.
    ///
    /// Returns `true` if an element was removed.
    pub fn remove(&mut self, export: &ApiExport) -> bool {
        match self.exports.iter().position(|e| e == export) {
            Some(index) => {
                self.exports.remove(index);
                true
            }
            None => false,
        }
    }

    /// Whether this region has no exports of its own.
    pub fn is_empty(&self) -> bool {
        self.exports.is_empty()
    }

    /// Number of exports of this region alone.
    pub fn len(&self) -> usize {
        self.exports.len()
    }

    /// This region's own exports in insertion order.
    pub fn list_exports(&self) -> &[ApiExport] {
        &self.exports
    }

    /// Exports visible from this region: every ancestor's, root first, then
    /// this region's own.
    ///
    /// An export re-declared in a lower tier appears once per tier.
    ///
    /// `regions` must be the registry this region was added to, or a clone
    /// of it. Parent handles are resolved there and mean nothing in any
    /// other registry. A region that was never added has no parent and
    /// yields only its own exports.
    pub fn list_all_exports<'a>(&'a self, regions: &'a ApiRegions) -> Vec<&'a ApiExport> {
        let mut tiers: Vec<&'a Region> = std::iter::successors(
            self.parent.and_then(|id| regions.get(id)),
            |region| region.parent.and_then(|id| regions.get(id)),
        )
        .take(regions.len())
        .collect();
        tiers.reverse();
        tiers
            .into_iter()
            .flat_map(|region| region.exports.iter())
            .chain(self.exports.iter())
            .collect()
    }

    /// Look up one of this region's own exports by package name.
    pub fn export_by_name(&self, name: &str) -> Option<&ApiExport> {
        self.exports.iter().find(|e| e.name() == name)
    }

    /// The property map.
    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    /// Mutable access to the property map. Changes are applied in place.
    pub fn properties_mut(&mut self) -> &mut BTreeMap<String, String> {
        &mut self.properties
    }

    /// The feature artifacts this region originates from, in first-seen
    /// order without duplicates. Absent or blank property gives an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidArtifactId`] if a stored segment is
    /// not a valid artifact id.
    pub fn feature_origins(&self) -> Result<Vec<ArtifactId>, ValidationError> {
        let Some(raw) = self.properties.get(FEATURE_ORIGINS_KEY) else {
            return Ok(Vec::new());
        };
        let mut origins: Vec<ArtifactId> = Vec::new();
        for segment in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let id = ArtifactId::parse(segment)?;
            if !origins.contains(&id) {
                origins.push(id);
            }
        }
        Ok(origins)
    }

    /// Record the feature artifacts this region originates from.
    ///
    /// Duplicates are dropped keeping the first occurrence. An empty list
    /// removes the property instead of storing an empty string.
    pub fn set_feature_origins<'a, I>(&mut self, origins: I)
    where
        I: IntoIterator<Item = &'a ArtifactId>,
    {
        let mut ids: Vec<String> = Vec::new();
        for origin in origins {
            let id = origin.to_mvn_id();
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        if ids.is_empty() {
            self.properties.remove(FEATURE_ORIGINS_KEY);
        } else {
            self.properties
                .insert(FEATURE_ORIGINS_KEY.to_string(), ids.join(","));
        }
    }

    /// The parent region, towards the root.
    pub fn parent(&self) -> Option<RegionId> {
        self.parent
    }

    /// The child region, away from the root.
    pub fn child(&self) -> Option<RegionId> {
        self.child
    }

    pub(crate) fn set_parent(&mut self, parent: Option<RegionId>) {
        self.parent = parent;
    }

    pub(crate) fn set_child(&mut self, child: Option<RegionId>) {
        self.child = child;
    }
}

impl PartialEq for Region {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.exports == other.exports
            && self.properties == other.properties
    }
}

impl Eq for Region {}

impl Hash for Region {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.exports.hash(state);
        self.properties.hash(state);
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Region [name={}, exports=[", self.name)?;
        for (i, export) in self.exports.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{export}")?;
        }
        f.write_str("], properties={")?;
        for (i, (key, value)) in self.properties.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}={value}")?;
        }
        f.write_str("}]")
    }
}
