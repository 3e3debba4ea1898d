pub mod backend;
pub mod config_io;
pub mod keymap_io;
pub mod taskwarrior;
