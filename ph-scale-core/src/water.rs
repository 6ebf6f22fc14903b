use palette::Srgb;
use ph_scale_schemas::color::RgbColor;

/// The solvent every solution is diluted with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Water {
    pub ph: f64,
    /// Concentration of water in itself, mol/L.
    pub concentration: f64,
    pub color: RgbColor,
}

pub const WATER: Water = Water {
    ph: 7.0,
    concentration: 55.0,
    color: RgbColor::new(224, 244, 255),
};

impl Water {
    pub fn srgb(&self) -> Srgb<u8> {
        Srgb::new(self.color.r, self.color.g, self.color.b)
    }
}
