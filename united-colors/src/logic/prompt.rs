use anyhow::{Context, Result};
use std::{
    io::{BufRead, Write},
    path::PathBuf,
};
use united_colors_effect::{ChannelMode, Image, UnitedColorsError, decode};

/// Failed decodes are re-prompted this many times before giving up.
const MAX_REPROMPTS: usize = 1;

fn prompt_path(input: &mut impl BufRead, output: &mut impl Write) -> Result<PathBuf> {
    writeln!(output, "Input file path:")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;

    let path = line.trim();
    if path.is_empty() {
        return Err(UnitedColorsError::MissingInput.into());
    }

    writeln!(output, "Modified image will be saved in the same directory.")?;
    Ok(PathBuf::from(path))
}

/// Asks for an input path and decodes it, asking once more if the first file
/// cannot be loaded.
pub fn load_prompted(
    input: &mut impl BufRead,
    output: &mut impl Write,
    mode: ChannelMode,
) -> Result<(PathBuf, Image)> {
    let mut reprompts = 0;

    loop {
        let path = prompt_path(input, output)?;

        match decode(&path, mode) {
            Ok(image) => return Ok((path, image)),
            Err(e) if reprompts < MAX_REPROMPTS => {
                log::warn!("{e}");
                writeln!(output, "Error : Image cannot be loaded.....")?;
                reprompts += 1;
            }
            Err(e) => {
                return Err(e).with_context(|| format!("load {} failed", path.display()));
            }
        }
    }
}
