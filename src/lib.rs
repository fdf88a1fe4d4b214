pub mod config;
pub mod control;
pub mod events;
#[cfg(feature = "gtk")]
pub mod gui;
mod macros;
#[cfg(feature = "gtk")]
pub mod sys;
