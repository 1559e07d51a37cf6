//! Target content resolutions offered to the user

use crate::RegionError;
use std::str::FromStr;

/// Named content resolution
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SizePreset {
    /// 1280x720, the size meeting apps stream without rescaling
    #[default]
    Teams,
    FullHd,
    Compact,
}

impl SizePreset {
    pub const ALL: [SizePreset; 3] = [SizePreset::Teams, SizePreset::FullHd, SizePreset::Compact];

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            SizePreset::Teams => "Teams Optimized (1280x720)",
            SizePreset::FullHd => "Full HD (1920x1080)",
            SizePreset::Compact => "Compact (800x600)",
        }
    }

    /// Content size as (width, height)
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            SizePreset::Teams => (1280, 720),
            SizePreset::FullHd => (1920, 1080),
            SizePreset::Compact => (800, 600),
        }
    }

    /// Name accepted on the command line
    pub fn name(&self) -> &'static str {
        match self {
            SizePreset::Teams => "teams",
            SizePreset::FullHd => "full-hd",
            SizePreset::Compact => "compact",
        }
    }
}

impl FromStr for SizePreset {
    type Err = RegionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        SizePreset::ALL
            .into_iter()
            .find(|preset| preset.name() == wanted)
            .ok_or_else(|| RegionError::UnknownPreset(s.to_string()))
    }
}
