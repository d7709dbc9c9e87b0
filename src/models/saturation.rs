/// Color band of a saturation level, used to tint roster rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SaturationBand {
    /// Level <= 0.3
    Green,
    /// 0.3 < level <= 0.5
    Yellow,
    /// 0.5 < level <= 0.8
    Orange,
    /// Level > 0.8
    Red,
}

impl SaturationBand {
    /// Classify a saturation level.
    ///
    /// Bands are closed on their upper bound: exactly 0.5 is yellow, not
    /// orange. Anything that fails every comparison (including NaN) is green.
    pub fn for_level(level: f64) -> Self {
        if level > 0.8 {
            SaturationBand::Red
        } else if level > 0.5 {
            SaturationBand::Orange
        } else if level > 0.3 {
            SaturationBand::Yellow
        } else {
            SaturationBand::Green
        }
    }

    /// Color name for this band
    pub fn as_str(&self) -> &'static str {
        match self {
            SaturationBand::Green => "green",
            SaturationBand::Yellow => "yellow",
            SaturationBand::Orange => "orange",
            SaturationBand::Red => "red",
        }
    }
}

impl std::fmt::Display for SaturationBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
