//! Command line options

use clap::{ArgAction, Parser};
use region::SizePreset;

#[derive(Debug, Parser)]
#[command(
    name = "ultrashare",
    version,
    about = "Pin a window to a fixed-size screen region for screen sharing"
)]
pub struct Args {
    /// Content resolution at startup: teams, full-hd or compact
    #[arg(long, default_value = "teams")]
    pub preset: SizePreset,

    /// Overlay left edge in screen pixels
    #[arg(long, default_value_t = 100, allow_negative_numbers = true)]
    pub x: i32,

    /// Overlay top edge in screen pixels
    #[arg(long, default_value_t = 100, allow_negative_numbers = true)]
    pub y: i32,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
