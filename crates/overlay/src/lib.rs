//! Overlay module for UltraShare
//!
//! Keeps a target window glued to the overlay's content area and notices when
//! someone else moves it away.

pub mod align;
pub mod drift;
pub mod session;

#[cfg(windows)]
pub mod render;
#[cfg(windows)]
pub mod window;

#[cfg(test)]
pub(crate) mod testing;

pub use align::Aligner;
pub use drift::{DetachReason, DriftCheck, DRIFT_TOLERANCE};
pub use session::Session;

#[cfg(windows)]
pub use window::OverlayWindow;

use region::RegionError;
use thiserror::Error;
use winctl::WinCtlError;

#[derive(Error, Debug)]
pub enum OverlayError {
    #[cfg(windows)]
    #[error("Windows API error: {0}")]
    Windows(#[from] windows::core::Error),

    #[error(transparent)]
    Window(#[from] WinCtlError),

    #[error("Invalid overlay geometry: {0}")]
    Region(#[from] RegionError),

    #[error("Overlay window has not been created")]
    NotCreated,

    #[error("Overlay is busy handling another event")]
    Busy,
}

pub type OverlayResult<T> = Result<T, OverlayError>;
