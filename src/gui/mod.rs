pub mod app;
pub mod control;
pub mod theme;
