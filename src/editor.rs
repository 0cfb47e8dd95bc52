//! Editor state and main loop

use tracing::{debug, info};

use crate::config::Config;
use crate::display::Display;
use crate::error::Result;
use crate::highlight::Highlighter;
use crate::input::{self, EditorEvent, MenuCommand};
use crate::surface::Surface;
use crate::terminal::{TermEvent, Terminal};
use crate::viewport::Viewport;

/// Main editor state
pub struct EditorState {
    /// The one editable surface
    pub surface: Surface,
    /// Display state
    pub display: Display,
    /// Vertical scroll of the text area
    pub viewport: Viewport,
    /// Whether editor is running
    pub running: bool,
}

impl EditorState {
    /// Create a new editor state with an empty surface
    pub fn new(config: &Config) -> Result<Self> {
        let mut highlighter = Highlighter::new()?;
        highlighter.enabled = config.highlight;

        let mut surface = Surface::new(highlighter, config);
        // Initial pass so the first frame is already highlighted
        surface.highlight();

        Ok(Self {
            surface,
            display: Display::new(config),
            // Height is taken from the terminal on the first render
            viewport: Viewport::new(0),
            running: true,
        })
    }

    /// Run the main editor loop
    pub fn run(&mut self, terminal: &mut Terminal) -> Result<()> {
        self.display.force_redraw();
        info!(cols = terminal.cols(), rows = terminal.rows(), "editor started");

        while self.running {
            self.display.render(terminal, &self.surface, &mut self.viewport)?;

            match terminal.read_event()? {
                TermEvent::Key(key_event) => {
                    if let Some(event) = input::translate_key(key_event) {
                        self.handle_event(event);
                    }
                }
                TermEvent::Resize => self.display.force_redraw(),
            }
        }

        info!("editor exiting");
        Ok(())
    }

    /// Handle one translated key press
    pub fn handle_event(&mut self, event: EditorEvent) {
        debug!(?event, "event");
        self.display.clear_message();

        match event {
            EditorEvent::Insert(ch) => self.surface.insert_char(ch),
            EditorEvent::Enter => self.surface.enter(),
            EditorEvent::Tab => self.surface.tab(),
            EditorEvent::Backspace => self.surface.backspace(),
            EditorEvent::Delete => self.surface.delete_forward(),
            EditorEvent::Move { motion, extend } => self.surface.move_caret(motion, extend),
            EditorEvent::Menu(command) => self.handle_menu(command),
            EditorEvent::ToggleLineNumbers => self.display.toggle_line_numbers(),
            EditorEvent::ToggleHighlight => {
                let enabled = !self.surface.highlighting();
                self.surface.set_highlighting(enabled);
                self.display.set_message(if enabled {
                    "Highlighting on"
                } else {
                    "Highlighting off"
                });
            }
        }
    }

    /// Handle a menu bar command
    fn handle_menu(&mut self, command: MenuCommand) {
        match command {
            MenuCommand::Exit => self.running = false,
            // The file commands are placeholders
            MenuCommand::NewFile | MenuCommand::Save | MenuCommand::SaveAs => {
                self.display
                    .set_message(format!("{}: not implemented", command.label()));
            }
        }
    }
}
