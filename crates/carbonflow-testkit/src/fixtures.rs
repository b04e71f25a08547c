//! Well-known identities and project specs.

use carbonflow_core::{BoundingBox, Identity, ProjectSpec};

/// Identity that deploys (and initially administers) every test engine.
pub fn deployer() -> Identity {
    Identity::new("deployer")
}

/// Numbered user wallet: `wallet_1`, `wallet_2`, ...
pub fn wallet(n: u32) -> Identity {
    Identity::new(format!("wallet_{n}"))
}

/// Conventional oracle identity.
pub fn oracle() -> Identity {
    wallet(4)
}

/// 5,000 m² forest in the South Island, micro-degree coordinates.
pub fn forest_spec() -> ProjectSpec {
    ProjectSpec::new(
        BoundingBox::new(-45_000_000, -44_000_000, 170_000_000, 171_000_000),
        5_000,
        "forest",
    )
}

/// Forest spec shifted by `i` micro-degrees, for distinct batch entries.
pub fn offset_spec(i: i64) -> ProjectSpec {
    let base = forest_spec();
    ProjectSpec::new(base.bounds.offset(i), base.area, base.project_type)
}

/// Spec whose latitude range is inverted.
pub fn inverted_spec() -> ProjectSpec {
    let mut spec = forest_spec();
    spec.bounds = BoundingBox::new(-44_000_000, -45_000_000, 170_000_000, 171_000_000);
    spec
}
