#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod board;
#[cfg(feature = "std")]
pub mod command;
mod common;
mod config;
#[cfg(feature = "std")]
mod logging;
mod placement;
#[cfg(feature = "std")]
pub mod preferences;
pub mod prelude;
#[cfg(feature = "std")]
pub mod render;
mod session;
mod ship;

pub use board::*;
pub use common::*;
pub use config::*;
#[cfg(feature = "std")]
pub use logging::{init_logging, LOG_ENV};
pub use placement::*;
pub use session::*;
pub use ship::*;
