mod app;
pub use app::*;

pub mod cleanup;
pub mod screen;
