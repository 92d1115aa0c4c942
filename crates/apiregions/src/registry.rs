//! # Region Registry
//!
//! [`ApiRegions`] owns a set of uniquely named regions and the links between
//! them. It is the only place parent/child links change, which lets it keep
//! two guarantees every traversal relies on:
//!
//! 1. **Reciprocity.** `a.child() == Some(b)` iff `b.parent() == Some(a)`.
//! 2. **Acyclicity.** A link that would close a loop is rejected, so walking
//!    towards the root always ends.
//!
//! Regions are stored in allocation slots indexed by [`RegionId`]. Removing a
//! region empties its slot; the handle is never handed out again.
//!
//! A stored region is only ever handed out mutably as a [`RegionMut`]. The
//! handle edits exports and properties but cannot replace the region, rename
//! it or touch its links, so neither guarantee can be broken from outside.
//!
//! ```compile_fail
//! use apiregions::{ApiRegions, Region};
//!
//! let mut regions = ApiRegions::new();
//! let id = regions.add(Region::new("global")).unwrap();
//! *regions.get_mut(id).unwrap() = Region::new("other");
//! ```

use std::collections::BTreeMap;
use std::ops::Deref;

use apiregions_core::{ApiExport, ArtifactId};

use crate::config::RegistryConfig;
use crate::error::{LinkKind, RegionError, RegionResult};
use crate::region::{Region, RegionId};

/// An ordered collection of uniquely named, chain-linked regions.
#[derive(Debug, Clone, Default)]
pub struct ApiRegions {
    config: RegistryConfig,
    slots: Vec<Option<Region>>,
    order: Vec<RegionId>,
}

impl ApiRegions {
    /// Create an empty registry with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry with the given configuration.
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            config,
            slots: Vec::new(),
            order: Vec::new(),
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Take ownership of `region`.
    ///
    /// Returns `None` without storing anything if a region of the same name
    /// exists. Links the region carried in are discarded. With
    /// [`RegistryConfig::auto_link`] the region becomes the child of the
    /// most recently added region, provided that one has no child yet.
    pub fn add(&mut self, mut region: Region) -> Option<RegionId> {
        if self.id_of(region.name()).is_some() {
            tracing::debug!(region = %region.name(), "region name already registered, not added");
            return None;
        }

        let id = RegionId(self.slots.len());
        region.set_parent(None);
        region.set_child(None);

        if self.config.auto_link {
            let tail = self
                .order
                .last()
                .copied()
                .filter(|tail| self.get(*tail).is_some_and(|r| r.child().is_none()));
            if let Some(tail) = tail {
                region.set_parent(Some(tail));
                if let Some(tail_region) = self.slot_mut(tail) {
                    tail_region.set_child(Some(id));
                }
                tracing::debug!(parent = %tail, child = %id, region = %region.name(), "appended region to chain");
            }
        }

        self.slots.push(Some(region));
        self.order.push(id);
        Some(id)
    }

    /// Make `child` the child of `parent`.
    ///
    /// # Errors
    ///
    /// - [`RegionError::UnknownRegion`] if either handle is stale.
    /// - [`RegionError::SelfLink`] if both handles are the same.
    /// - [`RegionError::AlreadyLinked`] if `parent` has a child or `child`
    ///   has a parent.
    /// - [`RegionError::CycleDetected`] if `child` is an ancestor of `parent`.
    pub fn link(&mut self, parent: RegionId, child: RegionId) -> RegionResult<()> {
        if let Err(e) = self.check_link(parent, child) {
            tracing::warn!(%parent, %child, error = %e, "rejected region link");
            return Err(e);
        }
        if let Some(region) = self.slot_mut(parent) {
            region.set_child(Some(child));
        }
        if let Some(region) = self.slot_mut(child) {
            region.set_parent(Some(parent));
        }
        tracing::debug!(%parent, %child, "linked regions");
        Ok(())
    }

    fn check_link(&self, parent: RegionId, child: RegionId) -> RegionResult<()> {
        let parent_region = self.region(parent)?;
        let child_region = self.region(child)?;
        if parent == child {
            return Err(RegionError::SelfLink {
                region: parent_region.name().to_string(),
            });
        }
        if parent_region.child().is_some() {
            return Err(RegionError::AlreadyLinked {
                region: parent_region.name().to_string(),
                link: LinkKind::Child,
            });
        }
        if child_region.parent().is_some() {
            return Err(RegionError::AlreadyLinked {
                region: child_region.name().to_string(),
                link: LinkKind::Parent,
            });
        }
        if self.ancestors(parent).any(|ancestor| ancestor == child) {
            return Err(RegionError::CycleDetected {
                parent: parent_region.name().to_string(),
                child: child_region.name().to_string(),
            });
        }
        Ok(())
    }

    /// Detach `child` from its parent, clearing both sides of the link.
    ///
    /// Returns the former parent, if there was one.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::UnknownRegion`] if the handle is stale.
    pub fn unlink(&mut self, child: RegionId) -> RegionResult<Option<RegionId>> {
        let parent = self.region(child)?.parent();
        if let Some(parent) = parent {
            if let Some(region) = self.slot_mut(parent) {
                region.set_child(None);
            }
            if let Some(region) = self.slot_mut(child) {
                region.set_parent(None);
            }
            tracing::debug!(%parent, %child, "unlinked regions");
        }
        Ok(parent)
    }

    /// Remove the named region and hand it back without links.
    ///
    /// Its parent and child, if both exist, are linked to each other so the
    /// chain stays contiguous.
    pub fn remove(&mut self, name: &str) -> Option<Region> {
        let id = self.id_of(name)?;
        let mut region = self.slots.get_mut(id.0)?.take()?;
        self.order.retain(|other| *other != id);

        let parent = region.parent();
        let child = region.child();
        if let Some(parent) = parent {
            if let Some(p) = self.slot_mut(parent) {
                p.set_child(child);
            }
        }
        if let Some(child) = child {
            if let Some(c) = self.slot_mut(child) {
                c.set_parent(parent);
            }
        }
        region.set_parent(None);
        region.set_child(None);

        tracing::debug!(region = %name, %id, "removed region");
        Some(region)
    }

    /// Resolve a handle.
    pub fn get(&self, id: RegionId) -> Option<&Region> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    /// Resolve a handle for editing exports and properties.
    ///
    /// The name and chain links stay under the registry's control.
    pub fn get_mut(&mut self, id: RegionId) -> Option<RegionMut<'_>> {
        self.slot_mut(id).map(|region| RegionMut { region })
    }

    fn slot_mut(&mut self, id: RegionId) -> Option<&mut Region> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    fn region(&self, id: RegionId) -> RegionResult<&Region> {
        self.get(id).ok_or(RegionError::UnknownRegion(id))
    }

    /// Handle of the named region.
    pub fn id_of(&self, name: &str) -> Option<RegionId> {
        self.order
            .iter()
            .copied()
            .find(|id| self.get(*id).is_some_and(|r| r.name() == name))
    }

    /// The named region.
    pub fn by_name(&self, name: &str) -> Option<&Region> {
        self.id_of(name).and_then(|id| self.get(id))
    }

    /// The region named by [`RegistryConfig::global_region`].
    pub fn global(&self) -> Option<&Region> {
        self.by_name(&self.config.global_region)
    }

    /// Number of regions.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the registry holds no regions.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Region names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.iter().map(|(_, region)| region.name())
    }

    /// Regions in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (RegionId, &Region)> + '_ {
        self.order
            .iter()
            .filter_map(|id| self.get(*id).map(|region| (*id, region)))
    }

    /// Parent of the region, if it has one.
    pub fn parent_of(&self, id: RegionId) -> Option<RegionId> {
        self.get(id).and_then(Region::parent)
    }

    /// Child of the region, if it has one.
    pub fn child_of(&self, id: RegionId) -> Option<RegionId> {
        self.get(id).and_then(Region::child)
    }

    /// Ancestors of the region, nearest first. Empty for unknown handles.
    pub fn ancestors(&self, id: RegionId) -> impl Iterator<Item = RegionId> + '_ {
        std::iter::successors(self.parent_of(id), move |current| self.parent_of(*current))
            .take(self.len())
    }

    /// Root of the chain containing the region (the region itself if it has
    /// no parent).
    pub fn root_of(&self, id: RegionId) -> Option<RegionId> {
        self.get(id)?;
        Some(self.ancestors(id).last().unwrap_or(id))
    }

    /// Regions without a parent, in insertion order.
    pub fn roots(&self) -> Vec<RegionId> {
        self.iter()
            .filter(|(_, region)| region.parent().is_none())
            .map(|(id, _)| id)
            .collect()
    }

    /// The chain containing the region, from its root to its leaf.
    pub fn chain(&self, id: RegionId) -> Vec<RegionId> {
        let Some(root) = self.root_of(id) else {
            return Vec::new();
        };
        std::iter::successors(Some(root), |current| self.child_of(*current))
            .take(self.len())
            .collect()
    }

    /// Exports visible from the region, root-most ancestor first.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::UnknownRegion`] if the handle is stale.
    pub fn list_all_exports(&self, id: RegionId) -> RegionResult<Vec<&ApiExport>> {
        Ok(self.region(id)?.list_all_exports(self))
    }

    /// Find the declaration of a package visible from the region, closest
    /// tier first.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::UnknownRegion`] if the handle is stale.
    pub fn resolve_export(&self, id: RegionId, name: &str) -> RegionResult<Option<&ApiExport>> {
        self.region(id)?;
        Ok(std::iter::once(id)
            .chain(self.ancestors(id))
            .filter_map(|tier| self.get(tier))
            .find_map(|region| region.export_by_name(name)))
    }

    /// Feature origins recorded on the region.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::UnknownRegion`] for a stale handle and
    /// [`RegionError::Validation`] for a malformed stored origin.
    pub fn feature_origins(&self, id: RegionId) -> RegionResult<Vec<ArtifactId>> {
        Ok(self.region(id)?.feature_origins()?)
    }
}

/// Mutable view of a region stored in an [`ApiRegions`] registry.
///
/// Reads go through [`Deref`] to the whole [`Region`]. Writes are limited to
/// exports and properties.
#[derive(Debug)]
pub struct RegionMut<'a> {
    region: &'a mut Region,
}

impl RegionMut<'_> {
    /// See [`Region::add`].
    pub fn add(&mut self, export: ApiExport) -> bool {
        self.region.add(export)
    }

    /// See [`Region::remove`].
    pub fn remove(&mut self, export: &ApiExport) -> bool {
        self.region.remove(export)
    }

    /// See [`Region::properties_mut`].
    pub fn properties_mut(&mut self) -> &mut BTreeMap<String, String> {
        self.region.properties_mut()
    }

    /// See [`Region::set_feature_origins`].
    pub fn set_feature_origins<'b, I>(&mut self, origins: I)
    where
        I: IntoIterator<Item = &'b ArtifactId>,
    {
        self.region.set_feature_origins(origins);
    }
}

impl Deref for RegionMut<'_> {
    type Target = Region;

    fn deref(&self) -> &Region {
        &*self.region
    }
}
