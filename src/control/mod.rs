use std::time::Duration;

pub mod appearance;
pub mod geometry;
pub mod model;
pub mod spring;

pub use appearance::{Appearance, ColorParseError, HexColor, LabelText};
pub use geometry::{Bounds, PanelLayout, Point};
pub use model::{ControlAction, ControlConfig, ControlState, SettleKind, SlideControl};
pub use spring::{SpringAnimation, SpringProfile};

pub const TRIGGER_AREA_FRACTION: f64 = 0.25; // press must start in the leading quarter
pub const CONFIRM_THRESHOLD_FRACTION: f64 = 0.75; // drag distance that confirms
pub const DEFAULT_LABEL: &str = ">> SLIDE TO CONTINUE";

pub const SPRING_DURATION: Duration = Duration::from_millis(300);
pub const SPRING_DAMPING: f64 = 0.5;
pub const SPRING_INITIAL_VELOCITY: f64 = 0.7;

// Stock rendering metrics
pub const CORNER_RADIUS: f64 = 5.0;
pub const CONTENT_INSET: f64 = 15.0; // label and icon distance from the panel's left edge
pub const ICON_SIZE: i32 = 20;
pub const LABEL_FONT_SIZE: f64 = 18.0;
