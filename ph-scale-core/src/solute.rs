//! Immutable solute values and the catalog they are looked up in.

use crate::{
    constants::{PH_MAX, PH_MIN},
    error::PhScaleError,
    water::WATER,
};
use palette::{Mix, Srgb};
use ph_scale_schemas::{color::RgbColor, solute::SoluteDefinition};

pub const WATER_ID: &str = "water";
pub const CUSTOM_ID: &str = "custom";

/// An intermediate color reached at `ratio` while diluting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub color: Srgb<u8>,
    pub ratio: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Solute {
    id: String,
    name: String,
    ph: f64,
    stock_color: Srgb<u8>,
    diluted_color: Srgb<u8>,
    color_stop: Option<ColorStop>,
}

fn srgb(color: RgbColor) -> Srgb<u8> {
    Srgb::new(color.r, color.g, color.b)
}

impl Solute {
    /// Validates a solute read from a definition file.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSolutePh` if the pH lies outside `[PH_MIN, PH_MAX]`, and
    /// `InvalidColorStop` if a color stop ratio is not strictly inside (0, 1).
    pub fn new(definition: &SoluteDefinition) -> Result<Self, PhScaleError> {
        if !(PH_MIN..=PH_MAX).contains(&definition.ph) {
            return Err(PhScaleError::InvalidSolutePh {
                name: definition.name.clone(),
                ph: definition.ph,
                min: PH_MIN,
                max: PH_MAX,
            });
        }
        let color_stop = match &definition.color_stop {
            Some(stop) if stop.ratio > 0.0 && stop.ratio < 1.0 => Some(ColorStop {
                color: srgb(stop.color),
                ratio: stop.ratio,
            }),
            Some(_) => return Err(PhScaleError::InvalidColorStop(definition.name.clone())),
            None => None,
        };

        Ok(Self {
            id: definition.solute_id.clone(),
            name: definition.name.clone(),
            ph: definition.ph,
            stock_color: srgb(definition.stock_color),
            diluted_color: srgb(definition.diluted_color.unwrap_or(WATER.color)),
            color_stop,
        })
    }

    /// A solute with an arbitrary pH, created whenever the user sets pH directly.
    ///
    /// # Panics
    ///
    /// Panics if `ph` has not been clamped to the valid range first.
    pub fn custom(ph: f64) -> Self {
        assert!(
            (PH_MIN..=PH_MAX).contains(&ph),
            "custom solute pH {ph} outside [{PH_MIN}, {PH_MAX}]"
        );
        Self {
            id: CUSTOM_ID.to_string(),
            name: "Custom".to_string(),
            ph,
            stock_color: WATER.srgb(),
            diluted_color: WATER.srgb(),
            color_stop: None,
        }
    }

    fn builtin(
        id: &str,
        name: &str,
        ph: f64,
        stock_color: (u8, u8, u8),
        color_stop: Option<((u8, u8, u8), f64)>,
    ) -> Self {
        let rgb = |(r, g, b): (u8, u8, u8)| Srgb::new(r, g, b);
        Self {
            id: id.to_string(),
            name: name.to_string(),
            ph,
            stock_color: rgb(stock_color),
            diluted_color: WATER.srgb(),
            color_stop: color_stop.map(|(color, ratio)| ColorStop {
                color: rgb(color),
                ratio,
            }),
        }
    }

    pub fn battery_acid() -> Self {
        Self::builtin("battery_acid", "Battery Acid", 1.0, (255, 255, 0), None)
    }

    pub fn vomit() -> Self {
        Self::builtin("vomit", "Vomit", 2.0, (255, 171, 120), Some(((255, 233, 210), 0.1)))
    }

    pub fn soda() -> Self {
        Self::builtin("soda", "Soda Pop", 2.5, (204, 255, 102), Some(((238, 255, 204), 0.25)))
    }

    pub fn orange_juice() -> Self {
        Self::builtin("orange_juice", "Orange Juice", 3.5, (255, 180, 0), Some(((255, 242, 157), 0.1)))
    }

    pub fn coffee() -> Self {
        Self::builtin("coffee", "Coffee", 5.0, (164, 99, 7), Some(((255, 240, 218), 0.05)))
    }

    pub fn chicken_soup() -> Self {
        Self::builtin("chicken_soup", "Chicken Soup", 5.8, (255, 240, 104), Some(((255, 250, 209), 0.1)))
    }

    pub fn milk() -> Self {
        Self::builtin("milk", "Milk", 6.5, (250, 250, 250), None)
    }

    pub fn water() -> Self {
        let color = (WATER.color.r, WATER.color.g, WATER.color.b);
        Self::builtin(WATER_ID, "Water", WATER.ph, color, None)
    }

    pub fn blood() -> Self {
        Self::builtin("blood", "Blood", 7.4, (211, 79, 68), Some(((255, 207, 204), 0.05)))
    }

    pub fn spit() -> Self {
        Self::builtin("spit", "Spit", 7.4, (202, 240, 239), None)
    }

    pub fn hand_soap() -> Self {
        Self::builtin("hand_soap", "Hand Soap", 10.0, (224, 141, 242), Some(((232, 204, 255), 0.05)))
    }

    pub fn drain_cleaner() -> Self {
        Self::builtin("drain_cleaner", "Drain Cleaner", 13.0, (255, 255, 0), None)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ph(&self) -> f64 {
        self.ph
    }

    pub fn stock_color(&self) -> Srgb<u8> {
        self.stock_color
    }

    pub fn is_water(&self) -> bool {
        self.id == WATER_ID
    }

    pub fn is_custom(&self) -> bool {
        self.id == CUSTOM_ID
    }

    /// Color of the solute diluted to `ratio` = solute volume / total volume.
    pub fn compute_color(&self, ratio: f64) -> Srgb<u8> {
        let ratio = ratio.clamp(0.0, 1.0);
        match self.color_stop {
            Some(stop) if ratio > stop.ratio => interpolate(
                stop.color,
                self.stock_color,
                (ratio - stop.ratio) / (1.0 - stop.ratio),
            ),
            Some(stop) => interpolate(self.diluted_color, stop.color, ratio / stop.ratio),
            None => interpolate(self.diluted_color, self.stock_color, ratio),
        }
    }
}

fn interpolate(from: Srgb<u8>, to: Srgb<u8>, distance: f64) -> Srgb<u8> {
    let from: Srgb<f32> = from.into_format();
    let to: Srgb<f32> = to.into_format();
    from.mix(to, distance as f32).into_format()
}

/// The solutes available to a session, looked up by id.
#[derive(Debug, Clone)]
pub struct SoluteCatalog {
    solutes: Vec<Solute>,
}

impl Default for SoluteCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SoluteCatalog {
    pub fn builtin() -> Self {
        Self {
            solutes: vec![
                Solute::battery_acid(),
                Solute::vomit(),
                Solute::soda(),
                Solute::orange_juice(),
                Solute::coffee(),
                Solute::chicken_soup(),
                Solute::milk(),
                Solute::water(),
                Solute::blood(),
                Solute::spit(),
                Solute::hand_soap(),
                Solute::drain_cleaner(),
            ],
        }
    }

    /// Adds validated definitions, replacing any solute that already has the same id.
    pub fn extend(&mut self, definitions: &[SoluteDefinition]) -> Result<(), PhScaleError> {
        for definition in definitions {
            let solute = Solute::new(definition)?;
            match self.solutes.iter_mut().find(|s| s.id == solute.id) {
                Some(existing) => *existing = solute,
                None => self.solutes.push(solute),
            }
        }
        Ok(())
    }

    pub fn get(&self, solute_id: &str) -> Result<&Solute, PhScaleError> {
        self.solutes
            .iter()
            .find(|s| s.id == solute_id)
            .ok_or_else(|| PhScaleError::SoluteNotFound(solute_id.to_string()))
    }

    pub fn solutes(&self) -> &[Solute] {
        &self.solutes
    }
}
