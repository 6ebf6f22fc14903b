//! Conversions between pH, concentration (mol/L) and quantity (mol).
//!
//! Every function that has no meaningful answer for an empty system returns
//! `None` instead of `NaN`; callers are expected to propagate it.

use crate::{constants::AVOGADROS_NUMBER, water::WATER};

/// pH of `solute_volume` liters of a solute with `solute_ph` mixed with `water_volume` liters of water.
///
/// Acids are blended in H3O+ space and bases in OH- space, so that the
/// dominant ion of each is what gets averaged by volume.
pub fn compute_ph(solute_ph: f64, solute_volume: f64, water_volume: f64) -> Option<f64> {
    let total_volume = solute_volume + water_volume;
    if total_volume == 0.0 {
        None
    } else if water_volume == 0.0 {
        Some(solute_ph)
    } else if solute_volume == 0.0 || solute_ph == WATER.ph {
        Some(WATER.ph)
    } else if solute_ph < WATER.ph {
        let h3o = (10f64.powf(-solute_ph) * solute_volume + 10f64.powf(-WATER.ph) * water_volume)
            / total_volume;
        Some(-h3o.log10())
    } else {
        let oh = (10f64.powf(solute_ph - 14.0) * solute_volume
            + 10f64.powf(WATER.ph - 14.0) * water_volume)
            / total_volume;
        Some(14.0 + oh.log10())
    }
}

pub fn concentration_h3o_to_ph(concentration: f64) -> Option<f64> {
    // Non-positive concentrations have no logarithm.
    if concentration <= 0.0 {
        None
    } else {
        Some(-concentration.log10())
    }
}

pub fn concentration_oh_to_ph(concentration: f64) -> Option<f64> {
    concentration_h3o_to_ph(concentration).map(|poh| 14.0 - poh)
}

pub fn moles_h3o_to_ph(moles: f64, volume: f64) -> Option<f64> {
    if moles == 0.0 || volume == 0.0 {
        None
    } else {
        concentration_h3o_to_ph(moles / volume)
    }
}

pub fn moles_oh_to_ph(moles: f64, volume: f64) -> Option<f64> {
    if moles == 0.0 || volume == 0.0 {
        None
    } else {
        concentration_oh_to_ph(moles / volume)
    }
}

pub fn ph_to_concentration_h3o(ph: Option<f64>) -> Option<f64> {
    ph.map(|ph| 10f64.powf(-ph))
}

pub fn ph_to_concentration_oh(ph: Option<f64>) -> Option<f64> {
    ph_to_concentration_h3o(ph.map(|ph| 14.0 - ph))
}

/// Water's concentration is unaffected by dilution, so this is constant for any non-empty volume.
pub fn volume_to_concentration_h2o(volume: f64) -> Option<f64> {
    if volume == 0.0 {
        None
    } else {
        Some(WATER.concentration)
    }
}

pub fn compute_moles(concentration: Option<f64>, volume: f64) -> f64 {
    concentration.map_or(0.0, |c| c * volume)
}

pub fn compute_particle_count(concentration: Option<f64>, volume: f64) -> f64 {
    compute_moles(concentration, volume) * AVOGADROS_NUMBER
}
