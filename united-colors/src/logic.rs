//! Previewers and input handling
//!
//! The window previewer needs the `gui` feature; the terminal previewer is
//! always available and is the fallback without it.

pub mod prompt;
pub mod terminal;

#[cfg(feature = "gui")]
pub mod window;

use crate::cli::Args;
use std::io;
use united_colors_effect::{EffectConfig, Previewer};

/// Picks the previewer for this run.
pub fn previewer(args: &Args, config: &EffectConfig) -> Box<dyn Previewer> {
    #[cfg(feature = "gui")]
    if !args.terminal {
        return Box::new(window::WindowPreviewer::new(config.clone()));
    }

    if !args.terminal {
        log::info!("built without a window, using the terminal previewer");
    }

    Box::new(terminal::TerminalPreviewer::new(
        io::stdin().lock(),
        io::stdout(),
        config,
    ))
}
