//! A single beaker's worth of solute mixed with water.
//!
//! Volumes are the only stored state; pH, total volume and color are
//! recomputed on every read. Observers are notified with a [`SolutionSnapshot`]
//! whenever a mutation changes what they would see. Mutations that touch more
//! than one field run inside [`Solution::batch`], which defers notification
//! until every field holds its new value.

use crate::{
    constants::{clamp_ph, to_fixed, MIN_VOLUME, PH_METER_DECIMAL_PLACES},
    derived::SolutionDerivedProperties,
    error::PhScaleError,
    ph_model,
    solute::Solute,
    water::WATER,
};
use palette::Srgb;

/// Volumes closer than this to the beaker's capacity count as full.
const VOLUME_TOLERANCE: f64 = 1e-9;

/// Everything a display of the solution depends on, captured at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct SolutionSnapshot {
    pub solute_id: String,
    pub solute_volume: f64,
    pub water_volume: f64,
    pub total_volume: f64,
    pub ph: Option<f64>,
    pub color: Srgb<u8>,
}

impl SolutionSnapshot {
    pub fn derived(&self) -> SolutionDerivedProperties {
        SolutionDerivedProperties::new(self.ph, self.total_volume)
    }
}

pub trait SolutionObserver {
    fn solution_changed(&mut self, snapshot: &SolutionSnapshot);
}

impl<F: FnMut(&SolutionSnapshot)> SolutionObserver for F {
    fn solution_changed(&mut self, snapshot: &SolutionSnapshot) {
        self(snapshot)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObserverId(usize);

struct InitialState {
    solute: Solute,
    solute_volume: f64,
    water_volume: f64,
}

pub struct Solution {
    solute: Solute,
    solute_volume: f64,
    water_volume: f64,
    max_volume: f64,
    initial: InitialState,
    observers: Vec<(ObserverId, Box<dyn SolutionObserver>)>,
    next_observer_id: usize,
    batch_depth: usize,
    published: SolutionSnapshot,
}

impl Solution {
    /// # Errors
    ///
    /// Returns `ConfigError` if a volume is negative or the volumes do not fit in `max_volume`.
    pub fn new(
        solute: Solute,
        solute_volume: f64,
        water_volume: f64,
        max_volume: f64,
    ) -> Result<Self, PhScaleError> {
        if max_volume <= 0.0 {
            return Err(PhScaleError::ConfigError(format!(
                "beaker max volume must be positive, got {max_volume} L"
            )));
        }
        if solute_volume < 0.0 || water_volume < 0.0 {
            return Err(PhScaleError::ConfigError(format!(
                "volumes must be non-negative, got solute {solute_volume} L and water {water_volume} L"
            )));
        }
        if solute_volume + water_volume > max_volume {
            return Err(PhScaleError::ConfigError(format!(
                "initial volume {} L exceeds beaker capacity {max_volume} L",
                solute_volume + water_volume
            )));
        }

        let initial = InitialState {
            solute: solute.clone(),
            solute_volume,
            water_volume,
        };
        let mut solution = Self {
            solute,
            solute_volume,
            water_volume,
            max_volume,
            initial,
            observers: Vec::new(),
            next_observer_id: 0,
            batch_depth: 0,
            published: SolutionSnapshot {
                solute_id: String::new(),
                solute_volume: 0.0,
                water_volume: 0.0,
                total_volume: 0.0,
                ph: None,
                color: Srgb::new(0, 0, 0),
            },
        };
        solution.published = solution.snapshot();
        Ok(solution)
    }

    pub fn solute(&self) -> &Solute {
        &self.solute
    }

    pub fn solute_volume(&self) -> f64 {
        self.solute_volume
    }

    pub fn water_volume(&self) -> f64 {
        self.water_volume
    }

    pub fn max_volume(&self) -> f64 {
        self.max_volume
    }

    pub fn total_volume(&self) -> f64 {
        self.solute_volume + self.water_volume
    }

    pub fn ph(&self) -> Option<f64> {
        ph_model::compute_ph(self.solute.ph(), self.solute_volume, self.water_volume)
    }

    /// pH rounded to the precision the meter shows.
    pub fn displayed_ph(&self) -> Option<f64> {
        self.ph().map(|ph| to_fixed(ph, PH_METER_DECIMAL_PLACES))
    }

    pub fn color(&self) -> Srgb<u8> {
        let total_volume = self.total_volume();
        if total_volume <= 0.0 {
            Srgb::new(0, 0, 0)
        } else if self.solute.is_water() || self.solute_volume == 0.0 {
            WATER.srgb()
        } else {
            self.solute.compute_color(self.solute_volume / total_volume)
        }
    }

    pub fn derived(&self) -> SolutionDerivedProperties {
        SolutionDerivedProperties::new(self.ph(), self.total_volume())
    }

    pub fn snapshot(&self) -> SolutionSnapshot {
        SolutionSnapshot {
            solute_id: self.solute.id().to_string(),
            solute_volume: self.solute_volume,
            water_volume: self.water_volume,
            total_volume: self.total_volume(),
            ph: self.ph(),
            color: self.color(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_volume() == 0.0
    }

    pub fn is_full(&self) -> bool {
        self.total_volume() >= self.max_volume - VOLUME_TOLERANCE
    }

    pub fn free_volume(&self) -> f64 {
        (self.max_volume - self.total_volume()).max(0.0)
    }

    /// True when the meter would read exactly the pH of water and the beaker holds some water.
    ///
    /// A solution that is not quite neutral but rounds to 7.00 counts as water.
    pub fn is_equivalent_to_water(&self) -> bool {
        self.displayed_ph() == Some(WATER.ph) && self.water_volume > 0.0
    }

    pub fn subscribe(&mut self, observer: impl SolutionObserver + 'static) -> ObserverId {
        let id = ObserverId(self.next_observer_id);
        self.next_observer_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(observer_id, _)| *observer_id != id);
        self.observers.len() != before
    }

    /// Runs `update` with notifications held back, then notifies at most once.
    pub fn batch<R>(&mut self, update: impl FnOnce(&mut Self) -> R) -> R {
        self.batch_depth += 1;
        let result = update(self);
        self.batch_depth -= 1;
        self.notify();
        result
    }

    fn notify(&mut self) {
        if self.batch_depth > 0 {
            return;
        }
        debug_assert!(
            self.total_volume() <= self.max_volume + VOLUME_TOLERANCE,
            "solution overflowed: {} L in a {} L beaker",
            self.total_volume(),
            self.max_volume
        );
        let snapshot = self.snapshot();
        if snapshot == self.published {
            return;
        }
        for (_, observer) in self.observers.iter_mut() {
            observer.solution_changed(&snapshot);
        }
        self.published = snapshot;
    }

    fn set_solute_volume(&mut self, volume: f64) {
        self.solute_volume = volume;
        self.notify();
    }

    fn set_water_volume(&mut self, volume: f64) {
        self.water_volume = volume;
        self.notify();
    }

    /// Replaces the solute and refills the beaker to its initial volumes.
    pub fn set_solute(&mut self, solute: Solute) {
        log::debug!("solute changed to '{}' (pH {})", solute.id(), solute.ph());
        let (solute_volume, water_volume) = (self.initial.solute_volume, self.initial.water_volume);
        self.batch(|s| {
            s.solute = solute;
            s.set_water_volume(water_volume);
            s.set_solute_volume(solute_volume);
        });
    }

    /// Adds up to `delta_volume` liters, limited by the free volume.
    ///
    /// Any non-zero addition leaves at least `MIN_VOLUME` so the result is measurable.
    pub fn add_solute(&mut self, delta_volume: f64) {
        if let Some(volume) = self.added_volume(self.solute_volume, self.water_volume, delta_volume) {
            self.set_solute_volume(volume);
        }
    }

    pub fn add_water(&mut self, delta_volume: f64) {
        if let Some(volume) = self.added_volume(self.water_volume, self.solute_volume, delta_volume) {
            self.set_water_volume(volume);
        }
    }

    fn added_volume(&self, current: f64, other: f64, delta_volume: f64) -> Option<f64> {
        if delta_volume <= 0.0 || self.is_full() {
            return None;
        }
        let volume = if delta_volume >= self.free_volume() {
            self.max_volume - other
        } else {
            current + delta_volume
        };
        Some(volume.max(MIN_VOLUME).min(self.max_volume - other))
    }

    /// Removes `delta_volume` liters, taking the same fraction of solute and water.
    ///
    /// If less than `MIN_VOLUME` would remain, the beaker is emptied completely.
    pub fn drain_solution(&mut self, delta_volume: f64) {
        let total_volume = self.total_volume();
        if delta_volume <= 0.0 || total_volume <= 0.0 {
            return;
        }
        if total_volume - delta_volume < MIN_VOLUME {
            log::debug!("draining remaining {total_volume} L");
            self.set_volume_atomic(0.0, 0.0);
        } else {
            let remaining = 1.0 - delta_volume / total_volume;
            self.set_volume_atomic(
                (self.water_volume * remaining).max(0.0),
                (self.solute_volume * remaining).max(0.0),
            );
        }
    }

    /// Sets both volumes as a single observable change.
    pub fn set_volume_atomic(&mut self, water_volume: f64, solute_volume: f64) {
        self.batch(|s| {
            s.set_water_volume(water_volume);
            s.set_solute_volume(solute_volume);
        });
    }

    /// Replaces the contents with an undiluted custom solute of the given pH,
    /// keeping the total volume. Unlike [`Solution::set_solute`], the beaker is not refilled.
    ///
    /// Returns `false` (and does nothing) when the beaker is empty or `ph` is not finite.
    pub fn apply_ph(&mut self, ph: f64) -> bool {
        let total_volume = self.total_volume();
        if total_volume <= 0.0 || !ph.is_finite() {
            return false;
        }
        let ph = clamp_ph(ph);
        self.batch(|s| {
            s.solute = Solute::custom(ph);
            s.set_water_volume(0.0);
            s.set_solute_volume(total_volume);
        });
        true
    }

    /// Restores the solute and volumes the solution was constructed with.
    pub fn reset(&mut self) {
        let InitialState {
            solute,
            solute_volume,
            water_volume,
        } = &self.initial;
        let (solute, solute_volume, water_volume) = (solute.clone(), *solute_volume, *water_volume);
        self.batch(|s| {
            s.solute = solute;
            s.set_water_volume(water_volume);
            s.set_solute_volume(solute_volume);
        });
    }
}
