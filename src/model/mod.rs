pub mod action;
pub mod config;
pub mod keymap;
pub mod sort;
pub mod task;

pub use action::*;
pub use config::*;
pub use keymap::*;
pub use sort::*;
pub use task::*;
