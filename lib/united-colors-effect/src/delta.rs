use crate::{Image, UnitedColorsError, UnitedColorsResult};

/// Signed per-channel offsets, one for every value of the source image.
///
/// Laid out exactly like [`Image`]: row-major, `cols * channels` values per row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeltaMatrix {
    rows: usize,
    cols: usize,
    channels: usize,
    data: Vec<i16>,
}

impl DeltaMatrix {
    /// Computes the United Colors deltas for `original`.
    ///
    /// Per pixel, in storage order:
    ///
    /// | channel | delta       |
    /// |---------|-------------|
    /// | 0       | `-c0`       |
    /// | 1       | `c2 - c1`   |
    /// | 2       | `255 - c2`  |
    /// | 3       | `0`         |
    ///
    /// Only 3 and 4 channel images are accepted.
    pub fn build(original: &Image) -> UnitedColorsResult<Self> {
        let channels = original.channels();
        if channels != 3 && channels != 4 {
            return Err(UnitedColorsError::UnsupportedFormat { channels });
        }

        let mut data = Vec::with_capacity(original.as_raw().len());
        for pixel in original.pixels() {
            let (c0, c1, c2) = (pixel[0] as i16, pixel[1] as i16, pixel[2] as i16);

            data.push(-c0);
            data.push(c2 - c1);
            data.push(255 - c2);

            // alpha
            if channels == 4 {
                data.push(0);
            }
        }

        log::debug!(
            "built delta matrix {}x{}x{}",
            original.rows(),
            original.cols(),
            channels
        );

        Ok(Self {
            rows: original.rows(),
            cols: original.cols(),
            channels,
            data,
        })
    }

    /// Wraps hand-made deltas, checking the buffer length against the shape.
    pub fn from_raw(
        rows: usize,
        cols: usize,
        channels: usize,
        data: Vec<i16>,
    ) -> UnitedColorsResult<Self> {
        let expected = rows
            .checked_mul(cols)
            .and_then(|n| n.checked_mul(channels))
            .ok_or_else(|| {
                UnitedColorsError::InvalidParameter(format!("delta {rows}x{cols} is too large"))
            })?;

        if data.len() != expected {
            return Err(UnitedColorsError::InvalidParameter(format!(
                "delta buffer holds {} values, {rows}x{cols}x{channels} needs {expected}",
                data.len()
            )));
        }

        Ok(Self {
            rows,
            cols,
            channels,
            data,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn get(&self, row: usize, col: usize, channel: usize) -> Option<i16> {
        if row >= self.rows || col >= self.cols || channel >= self.channels {
            return None;
        }

        self.data
            .get((row * self.cols + col) * self.channels + channel)
            .copied()
    }

    pub fn as_raw(&self) -> &[i16] {
        &self.data
    }

    pub fn matches(&self, image: &Image) -> bool {
        self.rows == image.rows() && self.cols == image.cols() && self.channels == image.channels()
    }

    pub fn shape(&self) -> String {
        format!("{}x{}x{}", self.rows, self.cols, self.channels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_pixel_deltas() {
        let img = Image::from_raw(1, 1, 3, vec![10, 100, 200]).unwrap();
        let delta = DeltaMatrix::build(&img).unwrap();

        assert_eq!(delta.as_raw(), &[-10, 100, 55]);
    }

    #[test]
    fn test_alpha_delta_is_zero() {
        let img = Image::from_raw(2, 1, 4, vec![0, 0, 0, 0, 255, 255, 255, 255]).unwrap();
        let delta = DeltaMatrix::build(&img).unwrap();

        assert_eq!(delta.as_raw(), &[0, 0, 255, 0, -255, 0, 0, 0]);
    }

    #[test]
    fn test_shape_follows_image() {
        for channels in [3, 4] {
            let img = Image::new(7, 5, channels).unwrap();
            let delta = DeltaMatrix::build(&img).unwrap();

            assert_eq!(delta.rows(), 5);
            assert_eq!(delta.cols(), 7);
            assert_eq!(delta.channels(), channels);
            assert!(delta.matches(&img));
        }
    }

    #[test]
    fn test_formula_every_pixel() {
        let data = (0..=255u8).flat_map(|v| [v, 255 - v, v / 2]).collect::<Vec<_>>();
        let img = Image::from_raw(16, 16, 3, data).unwrap();
        let delta = DeltaMatrix::build(&img).unwrap();

        for row in 0..16 {
            for col in 0..16 {
                let px = img.pixel(row, col).unwrap();
                let (c0, c1, c2) = (px[0] as i16, px[1] as i16, px[2] as i16);

                assert_eq!(delta.get(row, col, 0), Some(-c0));
                assert_eq!(delta.get(row, col, 1), Some(c2 - c1));
                assert_eq!(delta.get(row, col, 2), Some(255 - c2));
            }
        }
    }

    #[test]
    fn test_channel_order_matters() {
        let bgr = Image::from_raw(1, 1, 3, vec![10, 100, 200]).unwrap();
        let rgb = Image::from_raw(1, 1, 3, vec![200, 100, 10]).unwrap();

        assert_ne!(
            DeltaMatrix::build(&bgr).unwrap().as_raw(),
            DeltaMatrix::build(&rgb).unwrap().as_raw()
        );
    }

    #[test]
    fn test_unsupported_channels() {
        for channels in [1, 2] {
            let img = Image::new(3, 3, channels).unwrap();

            assert!(matches!(
                DeltaMatrix::build(&img),
                Err(UnitedColorsError::UnsupportedFormat { channels: c }) if c == channels
            ));
        }
    }

    #[test]
    fn test_get_out_of_bounds() {
        let delta = DeltaMatrix::from_raw(1, 2, 3, vec![1, 2, 3, 4, 5, 6]).unwrap();

        assert_eq!(delta.get(0, 1, 2), Some(6));
        assert_eq!(delta.get(0, 2, 0), None);
        assert_eq!(delta.get(0, 0, 3), None);
        assert!(DeltaMatrix::from_raw(1, 2, 3, vec![0; 5]).is_err());
    }
}
