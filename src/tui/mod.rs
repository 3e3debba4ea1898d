pub mod app;
pub mod console;
pub mod render;
pub mod review;
pub mod session;
pub mod shell;
pub mod terminal;
pub mod theme;

pub use app::run;
