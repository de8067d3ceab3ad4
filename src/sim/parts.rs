//! Named sub-part registry
//!
//! The host loads ship and turret models and answers name lookups. The core
//! resolves every name it needs once, at construction, and afterwards only
//! holds opaque handles plus the hit volume reported for each part.

use std::collections::HashMap;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{SetupError, SetupResult};

/// Opaque reference to a piece of host geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartHandle(pub u32);

/// What the host reports for a named sub-part
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PartInfo {
    pub handle: PartHandle,
    /// Offset from the owning model's origin, in model space
    pub offset: Vec3,
    /// Bounding sphere radius used as the hit volume
    pub radius: f32,
}

/// Named lookup over a loaded model
pub trait PartLookup {
    fn find(&self, name: &str) -> Option<PartInfo>;
}

/// Part names a ship model must provide
pub const SHIP_PART_NAMES: [&str; 3] = ["base", "cabin", "turret"];
/// Part names a turret model must provide
pub const BARREL_PART_NAMES: [&str; 3] = ["barrel1", "barrel2", "barrel3"];

fn resolve(model: &dyn PartLookup, name: &'static str) -> SetupResult<PartInfo> {
    model
        .find(name)
        .ok_or(SetupError::MissingPart { part: name })
}

/// Hit-able parts of a ship hull
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipParts {
    pub base: PartInfo,
    pub cabin: PartInfo,
    pub turret: PartInfo,
}

impl ShipParts {
    pub fn resolve(model: &dyn PartLookup) -> SetupResult<Self> {
        Ok(Self {
            base: resolve(model, SHIP_PART_NAMES[0])?,
            cabin: resolve(model, SHIP_PART_NAMES[1])?,
            turret: resolve(model, SHIP_PART_NAMES[2])?,
        })
    }

    /// Parts in stable registry order
    pub fn hit_parts(&self) -> [PartInfo; 3] {
        [self.base, self.cabin, self.turret]
    }
}

/// The three barrels of a turret
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurretParts {
    pub barrels: [PartHandle; 3],
}

impl TurretParts {
    pub fn resolve(model: &dyn PartLookup) -> SetupResult<Self> {
        Ok(Self {
            barrels: [
                resolve(model, BARREL_PART_NAMES[0])?.handle,
                resolve(model, BARREL_PART_NAMES[1])?.handle,
                resolve(model, BARREL_PART_NAMES[2])?.handle,
            ],
        })
    }
}

/// In-memory model: a name → part map
#[derive(Debug, Clone, Default)]
pub struct StaticModel {
    parts: HashMap<String, PartInfo>,
}

impl StaticModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_part(mut self, name: &str, handle: u32, offset: Vec3, radius: f32) -> Self {
        self.parts.insert(
            name.to_string(),
            PartInfo {
                handle: PartHandle(handle),
                offset,
                radius,
            },
        );
        self
    }

    pub fn without_part(mut self, name: &str) -> Self {
        self.parts.remove(name);
        self
    }

    /// Stock hull: base, cabin and a turret mount on the foredeck
    pub fn default_ship() -> Self {
        Self::new()
            .with_part("base", 1, Vec3::new(0.0, 0.5, 0.0), 2.0)
            .with_part("cabin", 2, Vec3::new(0.0, 2.0, 1.5), 1.2)
            .with_part("turret", 3, Vec3::new(0.0, 2.0, -2.0), 1.0)
    }

    /// Stock turret: three barrels side by side
    pub fn default_turret() -> Self {
        Self::new()
            .with_part("barrel1", 11, Vec3::new(-0.3, 0.0, -1.0), 0.2)
            .with_part("barrel2", 12, Vec3::new(0.0, 0.0, -1.0), 0.2)
            .with_part("barrel3", 13, Vec3::new(0.3, 0.0, -1.0), 0.2)
    }
}

impl PartLookup for StaticModel {
    fn find(&self, name: &str) -> Option<PartInfo> {
        self.parts.get(name).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolves_stock_models() {
        let ship = ShipParts::resolve(&StaticModel::default_ship()).unwrap();
        assert_eq!(ship.base.handle, PartHandle(1));
        let turret = TurretParts::resolve(&StaticModel::default_turret()).unwrap();
        assert_eq!(turret.barrels, [PartHandle(11), PartHandle(12), PartHandle(13)]);
    }

    #[test]
    fn test_missing_barrel_is_fatal() {
        let model = StaticModel::default_turret().without_part("barrel2");
        let err = TurretParts::resolve(&model).unwrap_err();
        assert_eq!(err, SetupError::MissingPart { part: "barrel2" });
    }

    #[test]
    fn test_missing_cabin_is_fatal() {
        let model = StaticModel::default_ship().without_part("cabin");
        assert_eq!(
            ShipParts::resolve(&model).unwrap_err(),
            SetupError::MissingPart { part: "cabin" }
        );
    }
}
