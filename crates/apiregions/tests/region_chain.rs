//! # Region Chain Behaviour
//!
//! End-to-end checks of the region contracts through the public API: a
//! registry assembles a `global -> internal -> private` chain the way a
//! model loader would, and the tests observe aggregation, equality and the
//! feature-origins property from the outside.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use apiregions::{
    ApiExport, ApiRegions, ArtifactId, Region, RegionId, RegistryConfig, FEATURE_ORIGINS_KEY,
};

fn export(name: &str) -> ApiExport {
    ApiExport::new(name).unwrap()
}

fn hash_of(region: &Region) -> u64 {
    let mut hasher = DefaultHasher::new();
    region.hash(&mut hasher);
    hasher.finish()
}

/// Build `global(org.api) -> internal(org.spi) -> private(org.impl)`.
fn three_tier_chain() -> (ApiRegions, [RegionId; 3]) {
    let mut regions = ApiRegions::new();
    let mut ids = Vec::new();
    for (name, package) in [
        ("global", "org.api"),
        ("internal", "org.spi"),
        ("private", "org.impl"),
    ] {
        let mut region = Region::new(name);
        assert!(region.add(export(package)));
        ids.push(regions.add(region).unwrap());
    }
    (regions, [ids[0], ids[1], ids[2]])
}

fn names<'a>(exports: &[&'a ApiExport]) -> Vec<&'a str> {
    exports.iter().map(|e| e.name()).collect()
}

// =========================================================================
// Aggregation across the chain
// =========================================================================

#[test]
fn list_all_exports_orders_root_first() {
    let (regions, [global, internal, private]) = three_tier_chain();

    let leaf = regions.get(private).unwrap();
    assert_eq!(
        names(&leaf.list_all_exports(&regions)),
        ["org.api", "org.spi", "org.impl"]
    );
    assert_eq!(
        names(&regions.list_all_exports(internal).unwrap()),
        ["org.api", "org.spi"]
    );
    assert_eq!(names(&regions.list_all_exports(global).unwrap()), ["org.api"]);
}

#[test]
fn list_exports_is_own_tier_only() {
    let (regions, [_, _, private]) = three_tier_chain();
    let leaf = regions.get(private).unwrap();
    assert_eq!(leaf.list_exports().len(), 1);
    assert_eq!(leaf.list_exports()[0].name(), "org.impl");
    assert!(leaf.export_by_name("org.api").is_none());
}

#[test]
fn redeclared_export_appears_once_per_tier() {
    let (mut regions, [_, _, private]) = three_tier_chain();
    let shadow = export("org.api").with_toggle("beta");
    assert!(regions.get_mut(private).unwrap().add(shadow.clone()));

    let all = regions.list_all_exports(private).unwrap();
    assert_eq!(names(&all), ["org.api", "org.spi", "org.impl", "org.api"]);

    // Closest-wins resolution is a separate, explicit query.
    assert_eq!(regions.resolve_export(private, "org.api").unwrap(), Some(&shadow));
}

#[test]
fn removing_middle_tier_exposes_grandparent() {
    let (mut regions, [global, _, private]) = three_tier_chain();
    let internal = regions.remove("internal").unwrap();
    assert_eq!(internal.list_exports()[0].name(), "org.spi");

    assert_eq!(regions.parent_of(private), Some(global));
    assert_eq!(
        names(&regions.list_all_exports(private).unwrap()),
        ["org.api", "org.impl"]
    );
}

#[test]
fn is_empty_ignores_ancestors() {
    let mut regions = ApiRegions::new();
    let mut global = Region::new("global");
    global.add(export("org.api"));
    regions.add(global).unwrap();
    let leaf = regions.add(Region::new("leaf")).unwrap();

    let leaf = regions.get(leaf).unwrap();
    assert!(leaf.is_empty());
    assert_eq!(leaf.list_all_exports(&regions).len(), 1);
}

#[test]
fn copied_region_resolves_against_its_registry() {
    let (regions, [_, _, private]) = three_tier_chain();
    let snapshot = regions.clone();
    let leaf = regions.get(private).unwrap().clone();

    assert_eq!(
        names(&leaf.list_all_exports(&regions)),
        ["org.api", "org.spi", "org.impl"]
    );
    assert_eq!(
        names(&leaf.list_all_exports(&snapshot)),
        ["org.api", "org.spi", "org.impl"]
    );

    // Never added anywhere: no parent, so only its own tier.
    let mut detached = Region::new("private");
    detached.add(export("org.impl"));
    assert_eq!(names(&detached.list_all_exports(&regions)), ["org.impl"]);
}

// =========================================================================
// Equality is local to the region
// =========================================================================

#[test]
fn linked_and_standalone_regions_compare_equal() {
    let (regions, [_, internal, _]) = three_tier_chain();
    let linked = regions.get(internal).unwrap();
    assert!(linked.parent().is_some());
    assert!(linked.child().is_some());

    let mut standalone = Region::new("internal");
    standalone.add(export("org.spi"));

    assert_eq!(linked, &standalone);
    assert_eq!(hash_of(linked), hash_of(&standalone));
}

// =========================================================================
// Feature origins
// =========================================================================

#[test]
fn feature_origins_round_trip_through_registry() {
    let (mut regions, [global, ..]) = three_tier_chain();
    let a = ArtifactId::parse("org.example:base:1.0").unwrap();
    let b = ArtifactId::parse("mvn:org.example/extra/2.0/slingosgifeature").unwrap();

    regions
        .get_mut(global)
        .unwrap()
        .set_feature_origins([&a, &a, &b]);

    let stored = &regions.get(global).unwrap().properties()[FEATURE_ORIGINS_KEY];
    assert_eq!(stored, "org.example:base:1.0,org.example:extra:slingosgifeature:2.0");
    assert_eq!(regions.feature_origins(global).unwrap(), vec![a, b]);
}

#[test]
fn clearing_feature_origins_removes_property() {
    let mut region = Region::new("global");
    region.set_feature_origins([&ArtifactId::parse("g:a:1").unwrap()]);
    region.set_feature_origins(std::iter::empty());
    assert!(region.properties().get(FEATURE_ORIGINS_KEY).is_none());
    assert!(region.feature_origins().unwrap().is_empty());
}

// =========================================================================
// Configuration
// =========================================================================

#[test]
fn registry_from_yaml_config() {
    let config = RegistryConfig::from_yaml_str("global_region: platform\nauto_link: false\n").unwrap();
    let mut regions = ApiRegions::with_config(config);
    let platform = regions.add(Region::new("platform")).unwrap();
    let tenant = regions.add(Region::new("tenant")).unwrap();

    assert_eq!(regions.global().map(Region::name), Some("platform"));
    assert_eq!(regions.parent_of(tenant), None);

    regions.link(platform, tenant).unwrap();
    assert_eq!(regions.chain(tenant), vec![platform, tenant]);
}

// =========================================================================
// Sharing
// =========================================================================

#[test]
fn built_registry_is_readable_across_threads() {
    let (regions, [_, _, private]) = three_tier_chain();
    let regions = std::sync::Arc::new(regions);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let regions = std::sync::Arc::clone(&regions);
            std::thread::spawn(move || regions.list_all_exports(private).unwrap().len())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 3);
    }
}
