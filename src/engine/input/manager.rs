// Input manager - turns winit events into simulation commands

use super::action::{default_bindings, Action, InputSource};
use glam::Vec2;
use std::collections::HashMap;
use winit::event::{ElementState, KeyEvent, MouseButton};
use winit::keyboard::PhysicalKey;

/// A resolved request for the simulation, in the order it happened
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputCommand {
    /// Spawn a ball with its bounding box corner at this window position
    Spawn(Vec2),
    TogglePause,
    Quit,
}

/// Collects input events between frames
pub struct InputManager {
    /// Mapping from input sources to actions
    bindings: HashMap<InputSource, Action>,

    /// Last known cursor position in window pixels
    cursor: Option<Vec2>,

    /// Commands gathered since the last drain
    pending: Vec<InputCommand>,
}

impl InputManager {
    /// Create an input manager with the default bindings
    pub fn new() -> Self {
        let mut manager = Self {
            bindings: HashMap::new(),
            cursor: None,
            pending: Vec::new(),
        };
        for (source, action) in default_bindings() {
            manager.bind(source, action);
        }
        manager
    }

    /// Bind an input source to an action, replacing any previous binding
    pub fn bind(&mut self, source: InputSource, action: Action) {
        self.bindings.insert(source, action);
    }

    /// Get the action bound to an input source
    pub fn get_action(&self, source: InputSource) -> Option<Action> {
        self.bindings.get(&source).copied()
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        // Only process physical key presses
        if let PhysicalKey::Code(key_code) = event.physical_key {
            if !event.repeat {
                self.handle(InputSource::key(key_code), event.state);
            }
        }
    }

    /// Process a mouse button event from winit
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        self.handle(InputSource::mouse(button), state);
    }

    /// Track the cursor so clicks know where they landed
    pub fn process_cursor_moved(&mut self, position: Vec2) {
        self.cursor = Some(position);
    }

    /// Forget the cursor once it leaves the window
    pub fn process_cursor_left(&mut self) {
        self.cursor = None;
    }

    fn handle(&mut self, source: InputSource, state: ElementState) {
        if state != ElementState::Pressed {
            return;
        }

        let command = match self.get_action(source) {
            Some(Action::Spawn) => match self.cursor {
                Some(position) => InputCommand::Spawn(position),
                None => {
                    log::debug!("Spawn requested with no cursor position, ignoring");
                    return;
                }
            },
            Some(Action::Pause) => InputCommand::TogglePause,
            Some(Action::Quit) => InputCommand::Quit,
            None => return,
        };
        self.pending.push(command);
    }

    /// Take every command gathered since the last call
    pub fn drain(&mut self) -> Vec<InputCommand> {
        std::mem::take(&mut self.pending)
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}
