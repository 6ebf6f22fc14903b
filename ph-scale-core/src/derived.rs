//! Quantities derived from a solution's pH and total volume.
//!
//! The cascade is concentration → quantity → particle count. An empty solution
//! has no pH and therefore no concentrations; every quantity below follows from
//! that without a separate emptiness check.

use crate::ph_model;
use ph_scale_schemas::graph::{GraphUnits, IndicatorSpecies};

/// The three species tracked for a solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Species {
    H2O,
    H3O,
    OH,
}

impl From<IndicatorSpecies> for Species {
    fn from(species: IndicatorSpecies) -> Self {
        match species {
            IndicatorSpecies::H3O => Species::H3O,
            IndicatorSpecies::OH => Species::OH,
        }
    }
}

/// One value per tracked species.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SpeciesValues<T> {
    pub h2o: T,
    pub h3o: T,
    pub oh: T,
}

impl<T: Copy> SpeciesValues<T> {
    pub fn get(&self, species: Species) -> T {
        match species {
            Species::H2O => self.h2o,
            Species::H3O => self.h3o,
            Species::OH => self.oh,
        }
    }

    fn map<U>(&self, f: impl Fn(T) -> U) -> SpeciesValues<U> {
        SpeciesValues {
            h2o: f(self.h2o),
            h3o: f(self.h3o),
            oh: f(self.oh),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolutionDerivedProperties {
    pub ph: Option<f64>,
    pub total_volume: f64,
    /// mol/L; `None` when the solution is empty.
    pub concentration: SpeciesValues<Option<f64>>,
    /// mol
    pub quantity: SpeciesValues<f64>,
    pub particle_count: SpeciesValues<f64>,
}

impl SolutionDerivedProperties {
    pub fn new(ph: Option<f64>, total_volume: f64) -> Self {
        let concentration = SpeciesValues {
            h2o: ph_model::volume_to_concentration_h2o(total_volume),
            h3o: ph_model::ph_to_concentration_h3o(ph),
            oh: ph_model::ph_to_concentration_oh(ph),
        };
        let quantity = concentration.map(|c| ph_model::compute_moles(c, total_volume));
        let particle_count =
            concentration.map(|c| ph_model::compute_particle_count(c, total_volume));

        Self {
            ph,
            total_volume,
            concentration,
            quantity,
            particle_count,
        }
    }

    /// The value plotted for `species` on a graph showing `units`.
    pub fn graph_value(&self, species: Species, units: GraphUnits) -> Option<f64> {
        let concentration = self.concentration.get(species);
        match units {
            GraphUnits::Concentration => concentration,
            GraphUnits::Quantity => concentration.map(|_| self.quantity.get(species)),
        }
    }
}
