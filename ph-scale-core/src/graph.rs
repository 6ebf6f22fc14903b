//! Mapping between the logarithmic graph's vertical pixel offsets and the
//! concentration or quantity they represent, plus the policy that turns a
//! dragged indicator position back into a pH.

use crate::{
    constants::{clamp_ph, to_fixed},
    derived::{Species, SolutionDerivedProperties},
    ph_model,
    solution::Solution,
};
use ph_scale_schemas::graph::{GraphUnits, IndicatorSpecies};

/// Mantissa digits shown after the decimal point on the graph's value labels.
pub const MANTISSA_DECIMAL_PLACES: u32 = 1;

/// A vertical log10 scale. `y` grows downwards from the top of the scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogarithmicScale {
    /// Exponent of the bottom tick.
    pub min_exponent: i32,
    /// Exponent of the top tick.
    pub max_exponent: i32,
    pub scale_height: f64,
    /// Space between the scale's ends and its outermost ticks.
    pub y_margin: f64,
}

impl Default for LogarithmicScale {
    fn default() -> Self {
        Self {
            min_exponent: -16,
            max_exponent: 2,
            scale_height: 500.0,
            y_margin: 30.0,
        }
    }
}

impl LogarithmicScale {
    pub fn with_height(scale_height: f64) -> Self {
        Self {
            scale_height,
            ..Self::default()
        }
    }

    fn tick_span(&self) -> f64 {
        self.scale_height - 2.0 * self.y_margin
    }

    fn exponent_span(&self) -> f64 {
        f64::from(self.max_exponent - self.min_exponent)
    }

    /// Offset of the position used for a zero or missing value, halfway into the bottom margin.
    pub fn below_bottom_tick(&self) -> f64 {
        self.scale_height - 0.5 * self.y_margin
    }

    pub fn value_to_y(&self, value: Option<f64>) -> f64 {
        match value {
            Some(value) if value > 0.0 => {
                let from_top = f64::from(self.max_exponent) - value.log10();
                self.y_margin + self.tick_span() * from_top / self.exponent_span()
            }
            _ => self.below_bottom_tick(),
        }
    }

    /// Clamps `y` onto the span between the top and bottom ticks.
    pub fn clamp_to_ticks(&self, y: f64) -> f64 {
        y.max(self.y_margin).min(self.scale_height - self.y_margin)
    }

    pub fn y_to_value(&self, y: f64) -> f64 {
        let from_top = self.exponent_span() * (y - self.y_margin) / self.tick_span();
        10f64.powf(f64::from(self.max_exponent) - from_top)
    }
}

/// Splits a positive `value` into `(mantissa, exponent)` with the mantissa
/// rounded to `mantissa_decimal_places` and kept in `[1, 10)`.
pub fn to_scientific_notation(value: f64, mantissa_decimal_places: u32) -> (f64, i32) {
    if value <= 0.0 || !value.is_finite() {
        return (0.0, 0);
    }
    let mut exponent = value.log10().floor() as i32;
    let mut mantissa = to_fixed(value / 10f64.powi(exponent), mantissa_decimal_places);
    if mantissa >= 10.0 {
        mantissa = to_fixed(mantissa / 10.0, mantissa_decimal_places);
        exponent += 1;
    } else if mantissa < 1.0 {
        exponent -= 1;
        mantissa = to_fixed(value / 10f64.powi(exponent), mantissa_decimal_places);
    }
    // 10^exponent underflows to zero for the smallest subnormals.
    if !mantissa.is_finite() {
        return (0.0, 0);
    }
    (mantissa, exponent)
}

/// Rounds `value` to the precision its scientific-notation label displays.
pub fn snap_to_displayed_precision(value: f64, mantissa_decimal_places: u32) -> f64 {
    let (mantissa, exponent) = to_scientific_notation(value, mantissa_decimal_places);
    if mantissa == 0.0 {
        return value;
    }
    let digits = (mantissa * 10f64.powi(mantissa_decimal_places as i32)).round();
    // Scale by exact powers of ten so that e.g. 99 steps of 1e-9 land on the literal 9.9e-8.
    let decimal_shift = mantissa_decimal_places as i32 - exponent;
    let scale = 10f64.powi(decimal_shift.abs());
    if !scale.is_finite() {
        mantissa * 10f64.powi(exponent)
    } else if decimal_shift >= 0 {
        digits / scale
    } else {
        digits * scale
    }
}

/// pH implied by dragging `species`' indicator to `y`, or `None` if the beaker is empty.
///
/// Positions past either end of the scale are treated as the nearest tick.
pub fn drag_to_ph(
    scale: &LogarithmicScale,
    y: f64,
    species: IndicatorSpecies,
    units: GraphUnits,
    total_volume: f64,
) -> Option<f64> {
    if total_volume == 0.0 || !y.is_finite() {
        return None;
    }
    let y = scale.clamp_to_ticks(y);
    let mut value = snap_to_displayed_precision(scale.y_to_value(y), MANTISSA_DECIMAL_PLACES);

    // 9.9e-8 mol/L is displayed as neutral while its pH is not; pin it to neutral.
    if units == GraphUnits::Concentration && value == 9.9e-8 {
        value = 1e-7;
    }

    let ph = match (units, species) {
        (GraphUnits::Concentration, IndicatorSpecies::H3O) => ph_model::concentration_h3o_to_ph(value),
        (GraphUnits::Concentration, IndicatorSpecies::OH) => ph_model::concentration_oh_to_ph(value),
        (GraphUnits::Quantity, IndicatorSpecies::H3O) => ph_model::moles_h3o_to_ph(value, total_volume),
        (GraphUnits::Quantity, IndicatorSpecies::OH) => ph_model::moles_oh_to_ph(value, total_volume),
    };
    ph.map(clamp_ph)
}

/// Applies a drag of `species`' indicator to `solution`. Returns the applied pH.
pub fn apply_indicator_drag(
    solution: &mut Solution,
    scale: &LogarithmicScale,
    y: f64,
    species: IndicatorSpecies,
    units: GraphUnits,
) -> Option<f64> {
    let ph = drag_to_ph(scale, y, species, units, solution.total_volume())?;
    log::debug!("indicator {species:?} dragged to y={y:.1}, pH {ph:.3}");
    solution.apply_ph(ph).then_some(ph)
}

/// Where `species`' indicator sits for the given derived properties.
pub fn indicator_y(
    scale: &LogarithmicScale,
    derived: &SolutionDerivedProperties,
    species: Species,
    units: GraphUnits,
) -> f64 {
    scale.value_to_y(derived.graph_value(species, units))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{constants::BEAKER_MAX_VOLUME, solute::Solute};
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn value_to_y_spans_ticks() {
        let scale = LogarithmicScale::default();
        assert_abs_diff_eq!(scale.value_to_y(Some(1e2)), 30.0, epsilon = 1e-9);
        assert_abs_diff_eq!(scale.value_to_y(Some(1e-16)), 470.0, epsilon = 1e-9);
        assert_eq!(scale.value_to_y(Some(0.0)), 485.0);
        assert_eq!(scale.value_to_y(None), 485.0);
    }

    #[test]
    fn mapping_is_an_inverse_pair() {
        let scale = LogarithmicScale::with_height(420.0);
        for exponent in -16..=2 {
            for mantissa in [1.0, 2.5, 7.3, 9.9] {
                let value = mantissa * 10f64.powi(exponent);
                if value > 1e2 {
                    continue;
                }
                let y = scale.value_to_y(Some(value));
                assert_relative_eq!(scale.y_to_value(y), value, max_relative = 1e-9);
            }
        }
        let mut y = scale.y_margin;
        while y <= scale.scale_height - scale.y_margin {
            assert_abs_diff_eq!(scale.value_to_y(Some(scale.y_to_value(y))), y, epsilon = 1e-9);
            y += 7.5;
        }
    }

    #[test]
    fn scientific_notation_carries_rounded_mantissa() {
        assert_eq!(to_scientific_notation(9.96e-8, 1), (1.0, -7));
        assert_eq!(to_scientific_notation(9.94e-8, 1), (9.9, -8));
        assert_eq!(to_scientific_notation(3.14159e3, 1), (3.1, 3));
        assert_eq!(to_scientific_notation(0.0, 1), (0.0, 0));
    }

    #[test]
    fn snapping_matches_displayed_precision() {
        assert_eq!(snap_to_displayed_precision(9.912e-8, 1), 9.9e-8);
        assert_eq!(snap_to_displayed_precision(1.049e-7, 1), 1.0e-7);
        assert_eq!(snap_to_displayed_precision(9.97e-8, 1), 1.0e-7);
        assert_eq!(snap_to_displayed_precision(2.345e1, 1), 23.0);
    }

    #[test]
    fn neutral_workaround_applies_to_concentration_only() {
        let scale = LogarithmicScale::default();
        let y = scale.value_to_y(Some(9.9e-8));

        let ph = drag_to_ph(&scale, y, IndicatorSpecies::H3O, GraphUnits::Concentration, 1.0);
        assert_abs_diff_eq!(ph.unwrap(), 7.0, epsilon = 1e-12);

        let ph = drag_to_ph(&scale, y, IndicatorSpecies::H3O, GraphUnits::Quantity, 1.0).unwrap();
        assert_ne!(ph, 7.0);
        assert_abs_diff_eq!(ph, -(9.9e-8f64).log10(), epsilon = 1e-12);
    }

    #[test]
    fn oh_drag_produces_complementary_ph() {
        let scale = LogarithmicScale::default();
        let y = scale.value_to_y(Some(1e-3));
        let ph = drag_to_ph(&scale, y, IndicatorSpecies::OH, GraphUnits::Concentration, 0.5).unwrap();
        assert_abs_diff_eq!(ph, 11.0, epsilon = 1e-9);
    }

    #[test]
    fn drag_clamps_to_ph_range() {
        let scale = LogarithmicScale::default();
        let y = scale.value_to_y(Some(1e2));
        let ph = drag_to_ph(&scale, y, IndicatorSpecies::H3O, GraphUnits::Concentration, 1.0);
        assert_eq!(ph, Some(-1.0));

        // 1e2 mol of OH- in 0.1 L is 1e3 mol/L, pH 17 before clamping.
        let ph = drag_to_ph(&scale, y, IndicatorSpecies::OH, GraphUnits::Quantity, 0.1);
        assert_eq!(ph, Some(15.0));
    }

    #[test]
    fn snapping_survives_values_below_the_scale() {
        for value in [1e-300, 1e-310, f64::MIN_POSITIVE] {
            assert!(snap_to_displayed_precision(value, 1).is_finite());
        }
    }

    #[test]
    fn drag_past_the_bottom_clamps_to_range_limit() {
        let scale = LogarithmicScale::default();
        for y in [scale.scale_height, 7700.0, 9000.0, 1e12] {
            let h3o = drag_to_ph(&scale, y, IndicatorSpecies::H3O, GraphUnits::Concentration, 0.5);
            assert_eq!(h3o, Some(15.0), "y={y}");
            let oh = drag_to_ph(&scale, y, IndicatorSpecies::OH, GraphUnits::Concentration, 0.5);
            assert_eq!(oh, Some(-1.0), "y={y}");
        }
    }

    #[test]
    fn drag_past_the_top_clamps_to_range_limit() {
        let scale = LogarithmicScale::default();
        for y in [0.0, -25.0, -1e6] {
            let ph = drag_to_ph(&scale, y, IndicatorSpecies::H3O, GraphUnits::Quantity, 0.5);
            assert_eq!(ph, Some(-1.0), "y={y}");
        }
    }

    #[test]
    fn non_finite_drag_is_ignored() {
        let scale = LogarithmicScale::default();
        for y in [f64::NAN, f64::INFINITY] {
            assert_eq!(drag_to_ph(&scale, y, IndicatorSpecies::H3O, GraphUnits::Concentration, 0.5), None);
        }
    }

    #[test]
    fn far_drag_applies_a_limit_ph() {
        let scale = LogarithmicScale::default();
        let mut solution = Solution::new(Solute::coffee(), 0.2, 0.3, BEAKER_MAX_VOLUME).unwrap();
        for y in [7700.0, 9000.0] {
            let applied = apply_indicator_drag(
                &mut solution,
                &scale,
                y,
                IndicatorSpecies::H3O,
                GraphUnits::Concentration,
            );
            assert_eq!(applied, Some(15.0));
            assert_eq!(solution.ph(), Some(15.0));
            assert_relative_eq!(solution.total_volume(), 0.5, max_relative = 1e-12);
        }
    }

    #[test]
    fn drag_on_empty_beaker_is_ignored() {
        let scale = LogarithmicScale::default();
        let mut solution = Solution::new(Solute::coffee(), 0.0, 0.0, BEAKER_MAX_VOLUME).unwrap();
        let before = solution.snapshot();
        let applied = apply_indicator_drag(
            &mut solution,
            &scale,
            200.0,
            IndicatorSpecies::H3O,
            GraphUnits::Concentration,
        );
        assert_eq!(applied, None);
        assert_eq!(solution.snapshot(), before);
    }

    #[test]
    fn drag_applies_custom_solute() {
        let scale = LogarithmicScale::default();
        let mut solution = Solution::new(Solute::coffee(), 0.2, 0.3, BEAKER_MAX_VOLUME).unwrap();
        let y = scale.value_to_y(Some(1e-4));
        let applied = apply_indicator_drag(
            &mut solution,
            &scale,
            y,
            IndicatorSpecies::H3O,
            GraphUnits::Concentration,
        )
        .unwrap();
        assert_abs_diff_eq!(applied, 4.0, epsilon = 1e-9);
        assert!(solution.solute().is_custom());
        assert_eq!(solution.ph(), Some(applied));

        let derived = solution.derived();
        let y_after = indicator_y(&scale, &derived, Species::H3O, GraphUnits::Concentration);
        assert_abs_diff_eq!(y_after, y, epsilon = 1e-6);
    }
}
