//! United Colors desktop application
//!
//! Loads one image, lets the user pick the effect strength in a preview and
//! writes the result once the preview is confirmed.

pub mod cli;
pub mod logic;

use anyhow::{Context, Result};
use cli::Args;
use std::{
    io,
    path::{Path, PathBuf},
};
use united_colors_effect::{EffectSession, Image, UnitedColorsError, decode, default_output_path};

pub const ARGS_MESSAGE: &str = "You should write path to input & output files.";
pub const DECODE_MESSAGE: &str = "Wrong input file path.";
pub const ENCODE_MESSAGE: &str = "Can't save changed image. Check output file path.";
pub const FORMAT_MESSAGE: &str = "Unsupported image: only 3 or 4 channel images can be processed.";
pub const PREVIEW_MESSAGE: &str = "Effect preview failed.";

/// Initializes the logger.
///
/// Sets up a custom logger format with timestamp, log level, file name, line number,
/// and log message. `RUST_LOG` overrides the default level.
pub fn init_logger(verbose: bool) {
    use std::io::Write;

    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format(|buf, record| {
            let style = buf.default_level_style(record.level());
            let ts = chrono::Local::now().format("%H:%M:%S");

            writeln!(
                buf,
                "[{} {style}{}{style:#} {} {}] {}",
                ts,
                record.level(),
                record
                    .file()
                    .unwrap_or("None")
                    .split('/')
                    .next_back()
                    .unwrap_or("None"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .init();
}

/// Runs one effect session: load, preview, save. Returns the written path.
pub fn run(args: &Args) -> Result<PathBuf> {
    let mode = args.channel_mode();
    let (input, original) = if args.prompt {
        logic::prompt::load_prompted(&mut io::stdin().lock(), &mut io::stdout(), mode)?
    } else {
        let input = args.input.clone().ok_or(UnitedColorsError::MissingInput)?;
        let original = decode(&input, mode)?;
        (input, original)
    };

    let output = output_path(args, &input, &original);
    let config = args.effect_config();

    let session = EffectSession::new(original, &config).context("prepare effect")?;
    let mut session = logic::previewer(args, &config)
        .preview(session)
        .context("preview effect")?;

    let written = session.save(&output)?;
    log::info!(
        "saved {} at {}% intensity",
        written.display(),
        session.intensity().percent()
    );

    Ok(written)
}

fn output_path(args: &Args, input: &Path, original: &Image) -> PathBuf {
    args.output
        .clone()
        .unwrap_or_else(|| default_output_path(input, original))
}

/// Message shown to the user for a failed run.
pub fn user_message(err: &anyhow::Error) -> &'static str {
    match err.downcast_ref::<UnitedColorsError>() {
        Some(UnitedColorsError::MissingInput) => ARGS_MESSAGE,
        Some(UnitedColorsError::Decode { .. }) => DECODE_MESSAGE,
        Some(UnitedColorsError::Encode { .. } | UnitedColorsError::Write { .. }) => ENCODE_MESSAGE,
        Some(UnitedColorsError::UnsupportedFormat { .. }) => FORMAT_MESSAGE,
        _ => PREVIEW_MESSAGE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_user_messages() {
        let decode_err: anyhow::Error = UnitedColorsError::Decode {
            path: "a.png".into(),
            source: image::ImageError::IoError(io::Error::from(io::ErrorKind::NotFound)),
        }
        .into();
        assert_eq!(user_message(&decode_err), DECODE_MESSAGE);

        let write_err = anyhow::Error::from(UnitedColorsError::Write {
            path: "out.png".into(),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        })
        .context("save");
        assert_eq!(user_message(&write_err), ENCODE_MESSAGE);

        let format_err = anyhow::Error::from(UnitedColorsError::UnsupportedFormat { channels: 2 });
        assert_eq!(user_message(&format_err), FORMAT_MESSAGE);

        assert_eq!(user_message(&anyhow::anyhow!("closed")), PREVIEW_MESSAGE);
    }

    #[test]
    fn test_missing_input_message() {
        let mut output = Vec::<u8>::new();
        let err = logic::prompt::load_prompted(
            &mut io::Cursor::new("\n"),
            &mut output,
            united_colors_effect::ChannelMode::Color,
        )
        .unwrap_err();
        assert_eq!(user_message(&err), ARGS_MESSAGE);

        let err = anyhow::Error::from(UnitedColorsError::MissingInput).context("load input");
        assert_eq!(user_message(&err), ARGS_MESSAGE);
    }

    #[test]
    fn test_run_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("missing.png");
        let args =
            Args::try_parse_from(["united-colors", input.to_str().unwrap(), "--terminal"]).unwrap();

        let err = run(&args).unwrap_err();
        assert_eq!(user_message(&err), DECODE_MESSAGE);
    }

    #[test]
    fn test_output_path() {
        let args = Args::try_parse_from(["united-colors", "dir/in.png"]).unwrap();
        let bgra = Image::new(1, 1, 4).unwrap();
        assert_eq!(
            output_path(&args, Path::new("dir/in.png"), &bgra),
            PathBuf::from("dir/in-1.png")
        );

        let args = Args::try_parse_from(["united-colors", "dir/in.png", "x/out.jpg"]).unwrap();
        assert_eq!(
            output_path(&args, Path::new("dir/in.png"), &bgra),
            PathBuf::from("x/out.jpg")
        );
    }
}
