use std::{path::PathBuf, time::Duration};

use clap::Parser;

use crate::error::{Error, Result};

pub const DEFAULT_HEIGHT: usize = 32;
pub const DEFAULT_FPS: u32 = 15;
/// Largest height or width accepted; the terminal addresses rows and
/// columns as `u16`.
pub const MAX_DIMENSION: usize = u16::MAX as usize;
const MAX_FPS: u32 = 1000;

#[derive(Parser, Debug)]
#[command(author, version, about = "Conway's Game of Life on a bounded grid, drawn in the terminal", long_about = None)]
pub struct Args {
    /// Seed grid, '.' for dead and '#' for live cells. Read from stdin when omitted
    pub file: Option<PathBuf>,

    /// Field height in cells
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    pub height: usize,

    /// Field width in cells [default: twice the height]
    #[arg(long)]
    pub width: Option<usize>,

    /// Frames per second
    #[arg(long, default_value_t = DEFAULT_FPS)]
    pub fps: u32,

    /// Stop after this many generations even if the field keeps changing
    #[arg(long)]
    pub max_generations: Option<u64>,

    /// Run without drawing and print only the final grid
    #[arg(long)]
    pub headless: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub seed: Option<PathBuf>,
    pub height: usize,
    pub width: usize,
    pub fps: u32,
    pub max_generations: Option<u64>,
    pub headless: bool,
}

impl Args {
    pub fn into_config(self) -> Result<Config> {
        let width = self.width.unwrap_or(self.height.saturating_mul(2));

        if self.height == 0 || width == 0 {
            return Err(Error::config(format!(
                "field must be at least 1x1, got {}x{width}",
                self.height
            )));
        }
        if self.height > MAX_DIMENSION
            || width > MAX_DIMENSION
            || self.height.checked_mul(width).is_none()
        {
            return Err(Error::config(format!(
                "field may be at most {MAX_DIMENSION}x{MAX_DIMENSION}, got {}x{width}",
                self.height
            )));
        }
        if !(1..=MAX_FPS).contains(&self.fps) {
            return Err(Error::config(format!(
                "fps must be between 1 and {MAX_FPS}, got {}",
                self.fps
            )));
        }

        Ok(Config {
            seed: self.file,
            height: self.height,
            width,
            fps: self.fps,
            max_generations: self.max_generations,
            headless: self.headless,
        })
    }
}

impl Config {
    #[inline]
    pub fn frame_delay(&self) -> Duration {
        Duration::from_secs(1) / self.fps
    }
}
