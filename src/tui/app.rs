use std::error::Error;
use std::io::{self, Stdout};

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use log::{info, warn};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::backend::Backend;
use crate::io::config_io::default_keymap_path;
use crate::io::keymap_io::KeymapError;
use crate::io::taskwarrior::TaskwarriorBackend;
use crate::model::{Keymap, Settings, UiConfig};
use crate::ops::bindings;
use crate::ops::filter::Filter;

use super::console::ConsoleError;
use super::render::RenderConfig;
use super::review::ReviewError;
use super::session::Session;
use super::shell::Shell;
use super::terminal::TerminalConsole;

type Console = TerminalConsole<CrosstermBackend<Stdout>>;

/// Run the review console until the user quits
pub fn run(settings: &Settings, filter: &str) -> Result<(), Box<dyn Error>> {
    let keymap_path = settings
        .keys
        .path
        .clone()
        .unwrap_or_else(default_keymap_path);
    let mut keymap = Keymap::load(&keymap_path);

    let mut backend = TaskwarriorBackend::new(settings.backend.program.clone());
    let vocabulary = backend.export(&[])?;
    bindings::generate(&mut keymap, &vocabulary);
    info!("keymap ready: {} bindings", keymap.entries().count());

    enable_raw_mode()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        reset_terminal();
        original_hook(panic_info);
    }));

    let mut console = match enter_terminal(&settings.ui) {
        Ok(console) => console,
        Err(e) => {
            reset_terminal();
            return Err(e.into());
        }
    };

    let mut session = Session::new(settings);
    let result = Shell {
        console: &mut console,
        backend: &mut backend,
        keymap: &keymap,
        session: &mut session,
    }
    .run(Filter::parse(filter));

    if let Err(e) = leave_terminal(&mut console) {
        warn!("could not restore terminal: {}", e);
        reset_terminal();
    }

    let saved = keymap.save(&keymap_path);
    finish(result.map(|_| ()), saved)
}

fn enter_terminal(ui: &UiConfig) -> io::Result<Console> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    let mut console = TerminalConsole::new(terminal, RenderConfig::from_config(ui));
    console.terminal_mut().clear()?;
    Ok(console)
}

fn leave_terminal(console: &mut Console) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(console.terminal_mut().backend_mut(), LeaveAlternateScreen)?;
    console.terminal_mut().show_cursor()
}

/// Best-effort restore when the normal path is not available
fn reset_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}

/// Combine the shell outcome with the keymap save. A failed session wins
/// over a failed save; an interrupt counts as a clean exit.
fn finish(
    result: Result<(), ReviewError>,
    saved: Result<(), KeymapError>,
) -> Result<(), Box<dyn Error>> {
    match result {
        Ok(()) | Err(ReviewError::Console(ConsoleError::Interrupted)) => Ok(saved?),
        Err(e) => {
            if let Err(save_err) = saved {
                warn!("could not save keymap: {}", save_err);
            }
            Err(e.into())
        }
    }
}
