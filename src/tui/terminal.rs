use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::Backend as TermBackend;

use crate::ops::store::Conflict;
use crate::util::unicode;

use super::console::{Console, ConsoleError, ENTER, ESC, KeyHints, Screen, View};
use super::render::{self, Overlay, RenderConfig};

/// A keystroke as the console sees it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keystroke {
    Char(char),
    Enter,
    Esc,
    Backspace,
    Interrupt,
}

impl Keystroke {
    /// Map a crossterm key press; keys the console has no use for map to None
    pub fn from_event(key: KeyEvent) -> Option<Self> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Keystroke::Interrupt)
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Keystroke::Char(c))
            }
            KeyCode::Enter => Some(Keystroke::Enter),
            KeyCode::Esc => Some(Keystroke::Esc),
            KeyCode::Backspace => Some(Keystroke::Backspace),
            _ => None,
        }
    }

    /// The single-key code handed to the engine
    fn code(self) -> Option<char> {
        match self {
            Keystroke::Char(c) => Some(c),
            Keystroke::Enter => Some(ENTER),
            Keystroke::Esc => Some(ESC),
            Keystroke::Backspace | Keystroke::Interrupt => None,
        }
    }
}

/// Outcome of feeding one keystroke to the line editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEdit {
    Editing,
    Submitted(String),
    Cancelled,
}

/// Single-line text input: printable characters append, Backspace removes
/// the last grapheme, Enter submits, Esc cancels
#[derive(Debug, Clone, Default)]
pub struct LineEditor {
    pub buffer: String,
}

impl LineEditor {
    pub fn feed(&mut self, key: Keystroke) -> LineEdit {
        match key {
            Keystroke::Char(c) if !c.is_control() => {
                self.buffer.push(c);
                LineEdit::Editing
            }
            Keystroke::Backspace => {
                if let Some(at) = unicode::prev_grapheme_boundary(&self.buffer, self.buffer.len()) {
                    self.buffer.truncate(at);
                }
                LineEdit::Editing
            }
            Keystroke::Enter => LineEdit::Submitted(std::mem::take(&mut self.buffer)),
            Keystroke::Esc | Keystroke::Interrupt => LineEdit::Cancelled,
            Keystroke::Char(_) => LineEdit::Editing,
        }
    }
}

/// Console drawing with ratatui and reading keys from crossterm
pub struct TerminalConsole<B: TermBackend> {
    terminal: Terminal<B>,
    config: RenderConfig,
    screen: Screen,
}

impl<B: TermBackend> TerminalConsole<B> {
    pub fn new(terminal: Terminal<B>, config: RenderConfig) -> Self {
        TerminalConsole {
            terminal,
            config,
            screen: Screen {
                view: View::Shell {
                    filter: String::new(),
                },
                hints: KeyHints::default(),
                status: None,
            },
        }
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }

    fn draw(&mut self, overlay: Option<&Overlay>) -> Result<(), ConsoleError> {
        let screen = &self.screen;
        let config = &self.config;
        self.terminal
            .draw(|frame| render::render(frame, screen, overlay, config))?;
        Ok(())
    }

    /// Block until a keystroke the console understands arrives
    fn next_keystroke(&mut self) -> Result<Keystroke, ConsoleError> {
        loop {
            match event::read()? {
                Event::Key(key) => {
                    if let Some(stroke) = Keystroke::from_event(key) {
                        return Ok(stroke);
                    }
                }
                Event::Resize(_, _) => self.draw(None)?,
                _ => {}
            }
        }
    }

    fn next_key(&mut self) -> Result<char, ConsoleError> {
        loop {
            let stroke = self.next_keystroke()?;
            if stroke == Keystroke::Interrupt {
                return Err(ConsoleError::Interrupted);
            }
            if let Some(key) = stroke.code() {
                return Ok(key);
            }
        }
    }
}

impl<B: TermBackend> Console for TerminalConsole<B> {
    fn show(&mut self, screen: Screen) -> Result<(), ConsoleError> {
        self.screen = screen;
        self.draw(None)
    }

    fn read_key(&mut self) -> Result<char, ConsoleError> {
        self.next_key()
    }

    fn choose(&mut self, hints: KeyHints) -> Result<char, ConsoleError> {
        self.draw(Some(&Overlay::Choice(hints)))?;
        let key = self.next_key();
        self.draw(None)?;
        key
    }

    fn read_line(&mut self, prompt: &str) -> Result<String, ConsoleError> {
        let mut editor = LineEditor::default();
        loop {
            self.draw(Some(&Overlay::Prompt {
                prompt: prompt.to_string(),
                buffer: editor.buffer.clone(),
            }))?;
            let stroke = self.next_keystroke()?;
            if stroke == Keystroke::Interrupt {
                return Err(ConsoleError::Interrupted);
            }
            match editor.feed(stroke) {
                LineEdit::Editing => {}
                LineEdit::Submitted(line) => {
                    self.draw(None)?;
                    return Ok(line);
                }
                LineEdit::Cancelled => {
                    self.draw(None)?;
                    return Ok(String::new());
                }
            }
        }
    }

    fn acknowledge(&mut self, conflict: &Conflict) -> Result<(), ConsoleError> {
        self.draw(Some(&Overlay::Conflict(conflict.clone())))?;
        self.next_key()?;
        self.draw(None)
    }
}
