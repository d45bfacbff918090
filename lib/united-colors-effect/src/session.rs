//! Interactive effect session
//!
//! A session owns the loaded image, its delta matrix and the image currently
//! on screen. It is `Ready` as soon as it exists, re-renders on every
//! intensity change and becomes `Saved` after the one final write.

use crate::{
    DeltaMatrix, Image, Intensity, Overflow, UnitedColorsError, UnitedColorsResult,
    blend::blend,
    codec,
};
use derivative::Derivative;
use derive_setters::Setters;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct EffectConfig {
    pub overflow: Overflow,

    /// Slider position when the preview opens.
    pub intensity: Intensity,

    #[setters(into)]
    #[derivative(Default(value = "\"United Colors Effect\".to_string()"))]
    pub window_title: String,

    #[setters(into)]
    #[derivative(Default(value = "\"Effect\".to_string()"))]
    pub slider_label: String,
}

impl EffectConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Ready,
    Saved,
}

#[derive(Debug)]
pub struct EffectSession {
    original: Image,
    delta: DeltaMatrix,
    output: Image,
    intensity: Intensity,
    overflow: Overflow,
    state: SessionState,
}

impl EffectSession {
    /// Builds the delta matrix for `original` and renders the first frame at
    /// the configured intensity.
    pub fn new(original: Image, config: &EffectConfig) -> UnitedColorsResult<Self> {
        let delta = DeltaMatrix::build(&original)?;
        let output = blend(&original, &delta, config.intensity, config.overflow)?;

        Ok(Self {
            original,
            delta,
            output,
            intensity: config.intensity,
            overflow: config.overflow,
            state: SessionState::Ready,
        })
    }

    /// Re-renders the whole output from the original and the delta matrix.
    pub fn set_intensity(&mut self, percent: i32) -> UnitedColorsResult<&Image> {
        if self.state == SessionState::Saved {
            return Err(UnitedColorsError::InvalidState(
                "session is already saved".to_string(),
            ));
        }

        self.intensity = Intensity::new(percent);
        self.output = blend(&self.original, &self.delta, self.intensity, self.overflow)?;
        log::debug!("intensity {}%", self.intensity.percent());

        Ok(&self.output)
    }

    /// Writes the current output once. Returns the path actually written.
    pub fn save(&mut self, path: impl AsRef<Path>) -> UnitedColorsResult<PathBuf> {
        if self.state == SessionState::Saved {
            return Err(UnitedColorsError::InvalidState(
                "session is already saved".to_string(),
            ));
        }

        let path = codec::encode(path, &self.output)?;
        self.state = SessionState::Saved;

        Ok(path)
    }

    pub fn original(&self) -> &Image {
        &self.original
    }

    pub fn delta(&self) -> &DeltaMatrix {
        &self.delta
    }

    pub fn output(&self) -> &Image {
        &self.output
    }

    pub fn intensity(&self) -> Intensity {
        self.intensity
    }

    pub fn overflow(&self) -> Overflow {
        self.overflow
    }

    pub fn state(&self) -> SessionState {
        self.state
    }
}

/// Shows a session to the user and drives its intensity until the user
/// confirms, then hands the session back for saving.
pub trait Previewer {
    fn preview(&mut self, session: EffectSession) -> UnitedColorsResult<EffectSession>;
}
