//! Fluid catalog - material presets and pair mixing rules
//!
//! Records are built first, then the paired-state table is filled in a
//! separate step. A fluid never stores a reference to its partner; the
//! table answers `paired(id)` instead.

use std::collections::HashMap;

use serde::Deserialize;

use crate::core::color::abgr;
use crate::error::{Result, SimError};

pub type FluidId = u8;

pub const FLUID_WATER: FluidId = 0;
pub const FLUID_STEAM: FluidId = 1;
pub const FLUID_OIL: FluidId = 2;
pub const FLUID_GAS: FluidId = 3;

/// Material descriptor. Shared read-only once the table is built.
#[derive(Clone, Debug, PartialEq)]
pub struct FluidProps {
    pub key: String,
    /// Separation at which a pair exerts no force
    pub natural_distance: f64,
    /// Spring constant applied to stress
    pub strength: f64,
    /// Pairs stretched further than this do not interact
    pub max_stress: f64,
    /// Spawn chance per unit of tension
    pub elasticity: f64,
    pub is_sticky: bool,
    /// Fraction of the particle/cell temperature gap closed per tick, in [0, 1]
    pub heat_transfer_rate: f64,
    pub boiling_point: f64,
    /// true: turns into its pair above `boiling_point`; false: below it
    pub vaporizes: bool,
    pub brownian_scale: f64,
    /// ABGR
    pub color: u32,
}

#[derive(Clone, Debug)]
pub struct FluidTable {
    fluids: Vec<FluidProps>,
    paired: Vec<FluidId>,
    key_to_id: HashMap<String, FluidId>,
}

impl FluidTable {
    /// Water/steam and oil/gas presets
    pub fn from_builtin() -> Self {
        let fluids = vec![
            preset("water", 10.0, 0.02, 12.0, 0.0, 0.01, 373.0, true, 0.1, abgr(64, 64, 255)),
            preset("steam", 100.0, 0.1, 20.0, 0.0, 0.04, 373.0, false, 1.0, abgr(255, 255, 255)),
            preset("oil", 20.0, 0.02, 5.0, 0.0, 0.02, 450.0, true, 0.05, abgr(127, 64, 0)),
            preset("gas", 100.0, 0.1, 20.0, 0.0, 0.04, 450.0, false, 1.0, abgr(255, 255, 64)),
        ];

        let mut paired = vec![0; fluids.len()];
        paired[FLUID_WATER as usize] = FLUID_STEAM;
        paired[FLUID_STEAM as usize] = FLUID_WATER;
        paired[FLUID_OIL as usize] = FLUID_GAS;
        paired[FLUID_GAS as usize] = FLUID_OIL;

        let key_to_id = index_keys(&fluids);
        Self { fluids, paired, key_to_id }
    }

    pub fn from_catalog_json(json: &str) -> Result<Self> {
        let catalog: CatalogRoot = serde_json::from_str(json)?;
        Self::from_catalog(catalog)
    }

    pub(crate) fn from_catalog(catalog: CatalogRoot) -> Result<Self> {
        if catalog.fluids.is_empty() {
            return Err(SimError::InvalidConfig("fluid catalog is empty".to_string()));
        }
        if catalog.fluids.len() > (FluidId::MAX as usize) + 1 {
            return Err(SimError::InvalidConfig(format!(
                "too many fluids for u8 ids: {}",
                catalog.fluids.len()
            )));
        }

        // Pass 1: records
        let mut fluids = Vec::with_capacity(catalog.fluids.len());
        let mut key_to_id = HashMap::new();
        for (idx, entry) in catalog.fluids.iter().enumerate() {
            if key_to_id.insert(entry.key.clone(), idx as FluidId).is_some() {
                return Err(SimError::InvalidFluid {
                    key: entry.key.clone(),
                    reason: "duplicate key".to_string(),
                });
            }
            let [r, g, b] = entry.color;
            let props = FluidProps {
                key: entry.key.clone(),
                natural_distance: entry.natural_distance,
                strength: entry.strength,
                max_stress: entry.max_stress,
                elasticity: entry.elasticity,
                is_sticky: entry.is_sticky,
                heat_transfer_rate: entry.heat_transfer_rate,
                boiling_point: entry.boiling_point,
                vaporizes: entry.vaporizes,
                brownian_scale: entry.brownian_scale,
                color: abgr(r, g, b),
            };
            validate_props(&props)?;
            fluids.push(props);
        }

        // Pass 2: pairing table
        let mut paired = Vec::with_capacity(fluids.len());
        for entry in catalog.fluids.iter() {
            let partner = key_to_id
                .get(&entry.paired_state)
                .copied()
                .ok_or_else(|| SimError::UnknownFluid(entry.paired_state.clone()))?;
            paired.push(partner);
        }
        validate_pairing(&fluids, &paired)?;

        Ok(Self { fluids, paired, key_to_id })
    }

    pub fn len(&self) -> usize {
        self.fluids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fluids.is_empty()
    }

    pub fn is_valid_id(&self, id: FluidId) -> bool {
        (id as usize) < self.fluids.len()
    }

    pub fn props(&self, id: FluidId) -> Option<&FluidProps> {
        self.fluids.get(id as usize)
    }

    /// Unchecked lookup for ids handed out by this table
    #[inline]
    pub(crate) fn fluid(&self, id: FluidId) -> &FluidProps {
        &self.fluids[id as usize]
    }

    pub fn id_by_key(&self, key: &str) -> Option<FluidId> {
        self.key_to_id.get(key).copied()
    }

    pub fn paired(&self, id: FluidId) -> FluidId {
        self.paired.get(id as usize).copied().unwrap_or(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FluidId, &FluidProps)> {
        self.fluids.iter().enumerate().map(|(i, p)| (i as FluidId, p))
    }

    /// Geometric mean of the two natural distances
    #[inline]
    pub fn natural_distance(&self, a: FluidId, b: FluidId) -> f64 {
        geometric_mix(self.fluid(a).natural_distance, self.fluid(b).natural_distance)
    }

    /// Geometric mean of the two strengths
    #[inline]
    pub fn strength(&self, a: FluidId, b: FluidId) -> f64 {
        geometric_mix(self.fluid(a).strength, self.fluid(b).strength)
    }

    /// The more fragile fluid sets the cutoff
    #[inline]
    pub fn max_stress(&self, a: FluidId, b: FluidId) -> f64 {
        self.fluid(a).max_stress.min(self.fluid(b).max_stress)
    }

    /// Paired state when `(temp > boiling_point) == vaporizes`, otherwise unchanged
    #[inline]
    pub fn appropriate_fluid_for_temperature(&self, id: FluidId, temp: f64) -> FluidId {
        let props = self.fluid(id);
        if (temp > props.boiling_point) == props.vaporizes {
            self.paired(id)
        } else {
            id
        }
    }
}

impl Default for FluidTable {
    fn default() -> Self {
        Self::from_builtin()
    }
}

#[inline]
fn geometric_mix(a: f64, b: f64) -> f64 {
    if a != b {
        (a * b).sqrt()
    } else {
        a
    }
}

#[allow(clippy::too_many_arguments)]
fn preset(
    key: &str,
    natural_distance: f64,
    strength: f64,
    max_stress: f64,
    elasticity: f64,
    heat_transfer_rate: f64,
    boiling_point: f64,
    vaporizes: bool,
    brownian_scale: f64,
    color: u32,
) -> FluidProps {
    FluidProps {
        key: key.to_string(),
        natural_distance,
        strength,
        max_stress,
        elasticity,
        is_sticky: false,
        heat_transfer_rate,
        boiling_point,
        vaporizes,
        brownian_scale,
        color,
    }
}

fn index_keys(fluids: &[FluidProps]) -> HashMap<String, FluidId> {
    fluids
        .iter()
        .enumerate()
        .map(|(i, p)| (p.key.clone(), i as FluidId))
        .collect()
}

fn invalid(props: &FluidProps, reason: &str) -> SimError {
    SimError::InvalidFluid {
        key: props.key.clone(),
        reason: reason.to_string(),
    }
}

pub(crate) fn validate_props(props: &FluidProps) -> Result<()> {
    if !(props.natural_distance.is_finite() && props.natural_distance > 0.0) {
        return Err(invalid(props, "natural_distance must be finite and > 0"));
    }
    if !(props.max_stress.is_finite() && props.max_stress > 0.0) {
        return Err(invalid(props, "max_stress must be finite and > 0"));
    }
    if !(props.strength.is_finite() && props.strength >= 0.0) {
        return Err(invalid(props, "strength must be finite and >= 0"));
    }
    if !(props.elasticity.is_finite() && props.elasticity >= 0.0) {
        return Err(invalid(props, "elasticity must be finite and >= 0"));
    }
    if !(props.heat_transfer_rate.is_finite() && (0.0..=1.0).contains(&props.heat_transfer_rate)) {
        return Err(invalid(props, "heat_transfer_rate must be within [0, 1]"));
    }
    if !props.boiling_point.is_finite() {
        return Err(invalid(props, "boiling_point must be finite"));
    }
    if !(props.brownian_scale.is_finite() && props.brownian_scale >= 0.0) {
        return Err(invalid(props, "brownian_scale must be finite and >= 0"));
    }
    Ok(())
}

pub(crate) fn validate_pairing(fluids: &[FluidProps], paired: &[FluidId]) -> Result<()> {
    for (idx, &partner) in paired.iter().enumerate() {
        let key = &fluids[idx].key;
        if partner as usize == idx {
            return Err(SimError::Pairing(format!("{key} is paired with itself")));
        }
        let back = paired.get(partner as usize).copied();
        if back != Some(idx as FluidId) {
            return Err(SimError::Pairing(format!(
                "{key} -> {} does not pair back",
                fluids[partner as usize].key
            )));
        }
    }
    Ok(())
}

/// JSON fluid catalog: `{ "fluids": [ ... ] }`
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogRoot {
    fluids: Vec<CatalogFluid>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogFluid {
    key: String,
    natural_distance: f64,
    strength: f64,
    max_stress: f64,
    #[serde(default)]
    elasticity: f64,
    #[serde(default)]
    is_sticky: bool,
    heat_transfer_rate: f64,
    boiling_point: f64,
    vaporizes: bool,
    #[serde(default)]
    brownian_scale: f64,
    color: [u8; 3],
    paired_state: String,
}
