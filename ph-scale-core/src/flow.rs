//! Rate-times-time flow sources feeding volume into (or out of) a beaker.

/// A faucet with an adjustable flow rate, in L/s.
#[derive(Debug, Clone, PartialEq)]
pub struct Faucet {
    max_flow_rate: f64,
    flow_rate: f64,
    enabled: bool,
}

impl Faucet {
    pub fn new(max_flow_rate: f64) -> Self {
        Self {
            max_flow_rate: max_flow_rate.max(0.0),
            flow_rate: 0.0,
            enabled: true,
        }
    }

    pub fn max_flow_rate(&self) -> f64 {
        self.max_flow_rate
    }

    pub fn flow_rate(&self) -> f64 {
        self.flow_rate
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Sets the flow rate, clamped to `[0, max_flow_rate]`. Ignored while disabled.
    pub fn set_flow_rate(&mut self, flow_rate: f64) {
        if self.enabled {
            self.flow_rate = flow_rate.clamp(0.0, self.max_flow_rate);
        }
    }

    /// Disabling a faucet also shuts it off.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.flow_rate = 0.0;
        }
    }

    /// Liters delivered over `dt` seconds.
    pub fn volume_delta(&self, dt: f64) -> f64 {
        if self.enabled {
            self.flow_rate * dt
        } else {
            0.0
        }
    }
}

/// A dropper that dispenses solute at a fixed rate while squeezed.
#[derive(Debug, Clone, PartialEq)]
pub struct Dropper {
    flow_rate: f64,
    dispensing: bool,
    enabled: bool,
}

impl Dropper {
    pub fn new(flow_rate: f64) -> Self {
        Self {
            flow_rate: flow_rate.max(0.0),
            dispensing: false,
            enabled: true,
        }
    }

    pub fn flow_rate(&self) -> f64 {
        self.flow_rate
    }

    pub fn dispensing(&self) -> bool {
        self.dispensing
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_dispensing(&mut self, dispensing: bool) {
        self.dispensing = dispensing && self.enabled;
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.dispensing = false;
        }
    }

    pub fn volume_delta(&self, dt: f64) -> f64 {
        if self.enabled && self.dispensing {
            self.flow_rate * dt
        } else {
            0.0
        }
    }
}
