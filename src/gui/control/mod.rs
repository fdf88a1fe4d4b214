pub mod view;

pub use view::{draw, load_icon};
