use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use united_colors_effect::{ChannelMode, EffectConfig, Intensity, Overflow};

/// Preview the United Colors effect on an image and save the result.
#[derive(Parser, Debug)]
#[command(name = "united-colors")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Input image path.
    #[arg(value_name = "INPUT", required_unless_present = "prompt")]
    pub input: Option<PathBuf>,

    /// Output image path. Defaults to `<input stem>-1.jpg`, or `.png` for images with alpha.
    #[arg(value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Channel count to process: 3 drops alpha, 4 keeps it.
    #[arg(value_name = "CHANNELS", value_parser = clap::value_parser!(u8).range(3..=4))]
    pub channels: Option<u8>,

    /// Initial effect strength in percent.
    #[arg(short, long, default_value_t = 0, value_name = "0-100")]
    #[arg(value_parser = clap::value_parser!(u8).range(0..=100))]
    pub intensity: u8,

    /// What happens to blended values outside 0-255.
    #[arg(long, value_enum, default_value_t = OverflowArg::Wrap)]
    pub overflow: OverflowArg,

    /// Drive the effect from the terminal instead of a window.
    #[arg(long)]
    pub terminal: bool,

    /// Ask for the input path on standard input.
    #[arg(long, conflicts_with = "input")]
    pub prompt: bool,

    /// Enable debug logging.
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OverflowArg {
    /// Keep the low 8 bits.
    Wrap,
    /// Clamp to 0-255.
    Saturate,
}

impl From<OverflowArg> for Overflow {
    fn from(arg: OverflowArg) -> Self {
        match arg {
            OverflowArg::Wrap => Overflow::Wrap,
            OverflowArg::Saturate => Overflow::Saturate,
        }
    }
}

impl Args {
    pub fn channel_mode(&self) -> ChannelMode {
        match self.channels {
            Some(4) => ChannelMode::Unchanged,
            Some(_) => ChannelMode::Color,
            // prompted paths keep alpha when the file has it
            None if self.prompt => ChannelMode::Unchanged,
            None => ChannelMode::Color,
        }
    }

    pub fn effect_config(&self) -> EffectConfig {
        EffectConfig::new()
            .with_overflow(self.overflow.into())
            .with_intensity(Intensity::from(self.intensity))
    }
}
