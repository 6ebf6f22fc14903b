use crate::{
    flow::{Dropper, Faucet},
    solution::Solution,
};

/// A solution together with the dropper and faucets that fill and drain it.
pub struct Beaker {
    pub solution: Solution,
    pub dropper: Dropper,
    pub water_faucet: Faucet,
    pub drain_faucet: Faucet,
}

impl Beaker {
    pub fn new(solution: Solution, dropper: Dropper, water_faucet: Faucet, drain_faucet: Faucet) -> Self {
        let mut beaker = Self {
            solution,
            dropper,
            water_faucet,
            drain_faucet,
        };
        beaker.update_enabled();
        beaker
    }

    /// Advances all flows by `dt` seconds.
    pub fn step(&mut self, dt: f64) {
        self.solution.add_solute(self.dropper.volume_delta(dt));
        self.solution.add_water(self.water_faucet.volume_delta(dt));
        self.solution.drain_solution(self.drain_faucet.volume_delta(dt));
        self.update_enabled();
    }

    /// Nothing can be added to a full beaker and nothing drained from an empty one.
    fn update_enabled(&mut self) {
        let full = self.solution.is_full();
        let empty = self.solution.is_empty();
        if self.dropper.enabled() == full {
            self.dropper.set_enabled(!full);
        }
        if self.water_faucet.enabled() == full {
            self.water_faucet.set_enabled(!full);
        }
        if self.drain_faucet.enabled() == empty {
            self.drain_faucet.set_enabled(!empty);
        }
    }

    pub fn reset(&mut self) {
        self.solution.reset();
        self.dropper.set_dispensing(false);
        self.water_faucet.set_flow_rate(0.0);
        self.drain_faucet.set_flow_rate(0.0);
        self.update_enabled();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solute::Solute;
    use approx::assert_relative_eq;

    fn beaker(solute_volume: f64, water_volume: f64) -> Beaker {
        let solution = Solution::new(Solute::battery_acid(), solute_volume, water_volume, 1.2).unwrap();
        Beaker::new(solution, Dropper::new(0.05), Faucet::new(0.25), Faucet::new(0.25))
    }

    #[test]
    fn water_faucet_fills_until_full_then_disables() {
        let mut beaker = beaker(0.5, 0.0);
        beaker.water_faucet.set_flow_rate(0.25);
        for _ in 0..40 {
            beaker.step(0.1);
        }
        assert!(beaker.solution.is_full());
        assert!(!beaker.water_faucet.enabled());
        assert!(!beaker.dropper.enabled());
        assert_relative_eq!(beaker.solution.total_volume(), 1.2, max_relative = 1e-9);
    }

    #[test]
    fn drain_faucet_empties_and_disables() {
        let mut beaker = beaker(0.2, 0.3);
        beaker.drain_faucet.set_flow_rate(0.25);
        for _ in 0..30 {
            beaker.step(0.1);
        }
        assert!(beaker.solution.is_empty());
        assert!(!beaker.drain_faucet.enabled());
        assert!(beaker.water_faucet.enabled());
    }

    #[test]
    fn dropper_adds_solute() {
        let mut beaker = beaker(0.0, 0.5);
        beaker.dropper.set_dispensing(true);
        beaker.step(1.0);
        assert_relative_eq!(beaker.solution.solute_volume(), 0.05);
        assert!(beaker.solution.ph().unwrap() < 7.0);
    }

    #[test]
    fn reset_stops_flows() {
        let mut beaker = beaker(0.5, 0.0);
        beaker.water_faucet.set_flow_rate(0.25);
        beaker.dropper.set_dispensing(true);
        beaker.step(0.5);
        beaker.reset();
        assert_eq!(beaker.water_faucet.flow_rate(), 0.0);
        assert!(!beaker.dropper.dispensing());
        assert_eq!(beaker.solution.solute_volume(), 0.5);
        assert_eq!(beaker.solution.water_volume(), 0.0);
    }
}
