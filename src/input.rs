//! Input handling - key translation
//!
//! Turns crossterm key events into editor events. Enter and Tab are the only
//! structural keys; printable chars fall through as plain insertion.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::surface::Motion;

/// Commands from the menu bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    NewFile,
    Save,
    SaveAs,
    Exit,
}

impl MenuCommand {
    /// All menu entries in display order
    pub const ALL: [MenuCommand; 4] = [
        MenuCommand::NewFile,
        MenuCommand::Save,
        MenuCommand::SaveAs,
        MenuCommand::Exit,
    ];

    /// Menu label
    pub fn label(&self) -> &'static str {
        match self {
            MenuCommand::NewFile => "New File",
            MenuCommand::Save => "Save",
            MenuCommand::SaveAs => "Save As",
            MenuCommand::Exit => "Exit",
        }
    }

    /// Shortcut shown next to the label
    pub fn shortcut(&self) -> &'static str {
        match self {
            MenuCommand::NewFile => "^N",
            MenuCommand::Save => "^S",
            MenuCommand::SaveAs => "^W",
            MenuCommand::Exit => "^Q",
        }
    }
}

/// A translated key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    /// Printable char, inserted natively
    Insert(char),
    /// Structural newline
    Enter,
    /// Structural indent
    Tab,
    Backspace,
    Delete,
    /// Caret motion, `extend` when Shift is held
    Move { motion: Motion, extend: bool },
    Menu(MenuCommand),
    ToggleLineNumbers,
    ToggleHighlight,
}

/// Translate a crossterm KeyEvent to an editor event
pub fn translate_key(event: KeyEvent) -> Option<EditorEvent> {
    let KeyEvent {
        code, modifiers, kind, ..
    } = event;

    // Only process key press events, ignore release and repeat
    // This is critical on Windows where crossterm sends all event types
    if kind != KeyEventKind::Press {
        return None;
    }

    let ctrl = modifiers.contains(KeyModifiers::CONTROL);
    let alt = modifiers.contains(KeyModifiers::ALT);
    let extend = modifiers.contains(KeyModifiers::SHIFT);
    let motion = |motion| Some(EditorEvent::Move { motion, extend });

    match code {
        KeyCode::Char(ch) if ctrl => match ch.to_ascii_lowercase() {
            'n' => Some(EditorEvent::Menu(MenuCommand::NewFile)),
            's' => Some(EditorEvent::Menu(MenuCommand::Save)),
            'w' => Some(EditorEvent::Menu(MenuCommand::SaveAs)),
            'q' => Some(EditorEvent::Menu(MenuCommand::Exit)),
            _ => None,
        },
        KeyCode::Char(_) if alt => None,
        KeyCode::Char(ch) => Some(EditorEvent::Insert(ch)),
        KeyCode::Enter => Some(EditorEvent::Enter),
        KeyCode::Tab => Some(EditorEvent::Tab),
        KeyCode::Backspace => Some(EditorEvent::Backspace),
        KeyCode::Delete => Some(EditorEvent::Delete),
        KeyCode::Left => motion(Motion::Left),
        KeyCode::Right => motion(Motion::Right),
        KeyCode::Up => motion(Motion::Up),
        KeyCode::Down => motion(Motion::Down),
        KeyCode::Home if ctrl => motion(Motion::DocumentStart),
        KeyCode::End if ctrl => motion(Motion::DocumentEnd),
        KeyCode::Home => motion(Motion::LineStart),
        KeyCode::End => motion(Motion::LineEnd),
        KeyCode::F(2) => Some(EditorEvent::ToggleLineNumbers),
        KeyCode::F(3) => Some(EditorEvent::ToggleHighlight),
        _ => None,
    }
}
