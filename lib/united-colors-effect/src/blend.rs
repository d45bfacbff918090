use crate::{DeltaMatrix, Effect, Image, UnitedColorsError, UnitedColorsResult};
use derivative::Derivative;
use derive_setters::Setters;

pub const INTENSITY_MAX: u8 = 100;

/// Effect strength in percent, always within `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Intensity(u8);

impl Intensity {
    pub const NONE: Intensity = Intensity(0);
    pub const FULL: Intensity = Intensity(INTENSITY_MAX);

    /// Out of range values are clamped.
    pub fn new(percent: i32) -> Self {
        Self(percent.clamp(0, INTENSITY_MAX as i32) as u8)
    }

    pub fn percent(self) -> u8 {
        self.0
    }

    pub fn fraction(self) -> f64 {
        self.0 as f64 / INTENSITY_MAX as f64
    }
}

impl From<u8> for Intensity {
    fn from(percent: u8) -> Self {
        Self::new(percent as i32)
    }
}

/// How a blended value outside `0..=255` is stored.
///
/// Both policies truncate the floating point result toward zero first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overflow {
    /// Keep the low 8 bits, so 260 becomes 4 and -1 becomes 255.
    #[default]
    Wrap,
    /// Clamp into `0..=255`.
    Saturate,
}

impl Overflow {
    #[inline]
    fn store(self, value: f64) -> u8 {
        let value = value as i32;
        match self {
            Overflow::Wrap => value as u8,
            Overflow::Saturate => value.clamp(0, 255) as u8,
        }
    }
}

/// Computes `original + intensity * delta` for every value.
pub fn blend(
    original: &Image,
    delta: &DeltaMatrix,
    intensity: Intensity,
    overflow: Overflow,
) -> UnitedColorsResult<Image> {
    if !delta.matches(original) {
        return Err(UnitedColorsError::ShapeMismatch {
            expected: original.shape(),
            actual: delta.shape(),
        });
    }

    let multiplier = intensity.fraction();
    let data = original
        .as_raw()
        .iter()
        .zip(delta.as_raw())
        .map(|(&value, &offset)| overflow.store(value as f64 + multiplier * offset as f64))
        .collect::<Vec<u8>>();

    Image::from_raw(original.width(), original.height(), original.channels(), data)
}

/// One-shot United Colors effect at a fixed intensity.
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct UnitedColorsConfig {
    #[derivative(Default(value = "Intensity::FULL"))]
    intensity: Intensity,

    overflow: Overflow,
}

impl UnitedColorsConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Effect for UnitedColorsConfig {
    fn apply(&self, image: Image) -> UnitedColorsResult<Image> {
        let delta = DeltaMatrix::build(&image)?;
        blend(&image, &delta, self.intensity, self.overflow)
    }
}
