//! Shipping container estimation from quoted volume.

use crate::config::{
    float_cmp, CONTAINER_20FT_CBM, CONTAINER_40FT_CBM, CONTAINER_40HQ_CBM, DOCUMENT_LOAD_CBM,
};

/// Standard container sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerType {
    Twenty,
    Forty,
    FortyHighCube,
}

impl ContainerType {
    /// All container types, smallest first.
    pub fn all() -> &'static [ContainerType] {
        &[
            ContainerType::Twenty,
            ContainerType::Forty,
            ContainerType::FortyHighCube,
        ]
    }

    /// Usable capacity in m³.
    pub fn capacity_cbm(&self) -> f64 {
        match self {
            ContainerType::Twenty => CONTAINER_20FT_CBM,
            ContainerType::Forty => CONTAINER_40FT_CBM,
            ContainerType::FortyHighCube => CONTAINER_40HQ_CBM,
        }
    }

    /// Short label.
    pub fn label(&self) -> &'static str {
        match self {
            ContainerType::Twenty => "20' Container",
            ContainerType::Forty => "40' Container",
            ContainerType::FortyHighCube => "40' HQ",
        }
    }
}

impl std::fmt::Display for ContainerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (~{} CBM)", self.label(), self.capacity_cbm())
    }
}

/// Containers required for a given volume.
///
/// `None` when the volume is zero, negative, or not finite.
pub fn containers_required(total_cbm: f64, capacity_cbm: f64) -> Option<u64> {
    if !float_cmp::is_positive(total_cbm) || !float_cmp::is_positive(capacity_cbm) {
        return None;
    }
    Some((total_cbm / capacity_cbm).ceil() as u64)
}

/// Container counts for each standard size.
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerEstimate {
    pub total_cbm: f64,
    /// Count per container type, smallest type first.
    pub counts: Vec<(ContainerType, u64)>,
}

impl ContainerEstimate {
    /// Estimate containers for a total volume. `None` when there is nothing to ship.
    pub fn for_volume(total_cbm: f64) -> Option<Self> {
        if !float_cmp::is_positive(total_cbm) {
            return None;
        }
        let counts = ContainerType::all()
            .iter()
            .filter_map(|kind| {
                containers_required(total_cbm, kind.capacity_cbm()).map(|n| (*kind, n))
            })
            .collect();
        Some(Self { total_cbm, counts })
    }

    /// Count for one container type.
    pub fn count(&self, kind: ContainerType) -> u64 {
        self.counts
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }

    /// Fill percentage against the document load volume.
    pub fn fill_percentage(&self) -> f64 {
        fill_percentage(self.total_cbm)
    }
}

/// Units of a single product that fit one document-load container.
///
/// `None` when the unit volume is not strictly positive.
pub fn units_per_container(unit_cbm: f64) -> Option<u64> {
    if !float_cmp::is_positive(unit_cbm) {
        return None;
    }
    Some((DOCUMENT_LOAD_CBM / unit_cbm).floor() as u64)
}

/// Total volume as a percentage of the document load volume.
pub fn fill_percentage(total_cbm: f64) -> f64 {
    if !total_cbm.is_finite() || total_cbm <= 0.0 {
        return 0.0;
    }
    total_cbm / DOCUMENT_LOAD_CBM * 100.0
}
