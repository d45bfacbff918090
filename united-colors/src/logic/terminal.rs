use std::io::{BufRead, Write};
use united_colors_effect::{
    EffectConfig, EffectSession, Image, Previewer, UnitedColorsResult, blend::INTENSITY_MAX,
};

/// Line based previewer: every number read sets the intensity, an empty line,
/// `s`, `q` or end of input confirms.
pub struct TerminalPreviewer<R, W> {
    input: R,
    output: W,
    slider_label: String,
}

impl<R: BufRead, W: Write> TerminalPreviewer<R, W> {
    pub fn new(input: R, output: W, config: &EffectConfig) -> Self {
        Self {
            input,
            output,
            slider_label: config.slider_label.clone(),
        }
    }

    fn show(&mut self, session: &EffectSession) -> std::io::Result<()> {
        let means = channel_means(session.output())
            .iter()
            .map(|m| format!("{m:.1}"))
            .collect::<Vec<_>>()
            .join(", ");

        writeln!(
            self.output,
            "{}: {}% (channel means: {means})",
            self.slider_label,
            session.intensity().percent()
        )
    }

    fn run(&mut self, session: &mut EffectSession) -> UnitedColorsResult<()> {
        writeln!(
            self.output,
            "{} [0-{}], empty line to save:",
            self.slider_label, INTENSITY_MAX
        )?;
        self.show(session)?;

        let mut line = String::new();
        loop {
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }

            let text = line.trim();
            if text.is_empty() || text.eq_ignore_ascii_case("s") || text.eq_ignore_ascii_case("q")
            {
                break;
            }

            match text.parse::<i32>() {
                Ok(percent) => {
                    session.set_intensity(percent)?;
                    self.show(session)?;
                }
                Err(_) => writeln!(self.output, "Not a number: {text}")?,
            }
        }

        self.output.flush()?;
        Ok(())
    }
}

impl<R: BufRead, W: Write> Previewer for TerminalPreviewer<R, W> {
    fn preview(&mut self, mut session: EffectSession) -> UnitedColorsResult<EffectSession> {
        self.run(&mut session)?;

        Ok(session)
    }
}

fn channel_means(image: &Image) -> Vec<f64> {
    let mut sums = vec![0u64; image.channels()];
    for pixel in image.pixels() {
        for (sum, &value) in sums.iter_mut().zip(pixel) {
            *sum += value as u64;
        }
    }

    let count = (image.rows() * image.cols()).max(1) as f64;
    sums.into_iter().map(|sum| sum as f64 / count).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn session() -> EffectSession {
        let img = Image::from_raw(1, 1, 3, vec![10, 100, 200]).unwrap();
        EffectSession::new(img, &EffectConfig::new()).unwrap()
    }

    fn preview(script: &str) -> (EffectSession, String) {
        let mut out = Vec::new();
        let session = TerminalPreviewer::new(Cursor::new(script), &mut out, &EffectConfig::new())
            .preview(session())
            .unwrap();

        (session, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_applies_each_line() {
        let (session, out) = preview("20\n50\n\n100\n");

        // stops at the empty line
        assert_eq!(session.intensity().percent(), 50);
        assert_eq!(session.output().as_raw(), &[5, 150, 227]);
        assert!(out.contains("Effect: 20%"));
        assert!(out.contains("Effect: 50% (channel means: 5.0, 150.0, 227.0)"));
        assert!(!out.contains("Effect: 100%"));
    }

    #[test]
    fn test_end_of_input_confirms() {
        let (session, _) = preview("75");
        assert_eq!(session.intensity().percent(), 75);
    }

    #[test]
    fn test_bad_lines() {
        let (session, out) = preview("abc\n250\nq\n");

        assert!(out.starts_with("Effect [0-100], empty line to save:\n"));
        assert!(out.contains("Not a number: abc"));
        assert_eq!(session.intensity().percent(), 100);
        assert!(out.contains("Effect: 100%"));
    }

    #[test]
    fn test_channel_means() {
        let img = Image::from_raw(2, 1, 3, vec![0, 10, 255, 100, 20, 255]).unwrap();
        assert_eq!(channel_means(&img), vec![50.0, 15.0, 255.0]);
    }
}
