//! 8-bit interleaved image storage
//!
//! Pixels are kept row-major in one flat buffer. Channel order is whatever the
//! codec stored, which for decoded files is B, G, R[, A].

use crate::{UnitedColorsError, UnitedColorsResult};

pub const MAX_CHANNELS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    channels: usize,
    data: Vec<u8>,
}

impl Image {
    /// Creates a zero-filled image.
    pub fn new(width: u32, height: u32, channels: usize) -> UnitedColorsResult<Self> {
        check_channels(channels)?;
        let len = buffer_len(width, height, channels)?;

        Ok(Self {
            width,
            height,
            channels,
            data: vec![0; len],
        })
    }

    /// Wraps an existing buffer. Fails when `data` does not hold exactly
    /// `width * height * channels` values.
    pub fn from_raw(
        width: u32,
        height: u32,
        channels: usize,
        data: Vec<u8>,
    ) -> UnitedColorsResult<Self> {
        check_channels(channels)?;
        let len = buffer_len(width, height, channels)?;

        if data.len() != len {
            return Err(UnitedColorsError::InvalidParameter(format!(
                "buffer holds {} values, {width}x{height}x{channels} needs {len}",
                data.len()
            )));
        }

        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn rows(&self) -> usize {
        self.height as usize
    }

    pub fn cols(&self) -> usize {
        self.width as usize
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn has_alpha(&self) -> bool {
        self.channels == 4
    }

    /// Number of values in one row.
    pub fn stride(&self) -> usize {
        self.cols() * self.channels
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    pub fn pixel(&self, row: usize, col: usize) -> Option<&[u8]> {
        if row >= self.rows() || col >= self.cols() {
            return None;
        }

        let start = row * self.stride() + col * self.channels;
        Some(&self.data[start..start + self.channels])
    }

    pub fn pixels(&self) -> impl Iterator<Item = &[u8]> {
        self.data.chunks_exact(self.channels)
    }

    pub fn same_shape(&self, other: &Image) -> bool {
        self.width == other.width && self.height == other.height && self.channels == other.channels
    }

    pub fn shape(&self) -> String {
        format!("{}x{}x{}", self.height, self.width, self.channels)
    }
}

fn check_channels(channels: usize) -> UnitedColorsResult<()> {
    if channels == 0 || channels > MAX_CHANNELS {
        return Err(UnitedColorsError::InvalidParameter(format!(
            "channel count must be between 1 and {MAX_CHANNELS}, got {channels}"
        )));
    }

    Ok(())
}

fn buffer_len(width: u32, height: u32, channels: usize) -> UnitedColorsResult<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(channels))
        .ok_or_else(|| {
            UnitedColorsError::InvalidParameter(format!("image {width}x{height} is too large"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_length_check() {
        assert!(Image::from_raw(2, 2, 3, vec![0; 12]).is_ok());
        assert!(Image::from_raw(2, 2, 3, vec![0; 11]).is_err());
        assert!(Image::from_raw(2, 2, 5, vec![0; 20]).is_err());
    }

    #[test]
    fn test_pixel_access() {
        let data = (0..24).collect::<Vec<u8>>();
        let img = Image::from_raw(3, 2, 4, data).unwrap();

        assert_eq!(img.stride(), 12);
        assert_eq!(img.pixel(0, 0), Some(&[0, 1, 2, 3][..]));
        assert_eq!(img.pixel(1, 2), Some(&[20, 21, 22, 23][..]));
        assert_eq!(img.pixel(2, 0), None);
        assert_eq!(img.pixel(0, 3), None);
        assert_eq!(img.pixels().count(), 6);
    }

    #[test]
    fn test_shape() {
        let a = Image::new(4, 3, 3).unwrap();
        let b = Image::new(4, 3, 4).unwrap();

        assert_eq!(a.shape(), "3x4x3");
        assert!(!a.same_shape(&b));
        assert!(b.has_alpha());
    }
}
