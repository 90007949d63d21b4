// Input handling system
//
// Mouse and keyboard events from winit are mapped to actions and queued as
// commands until the frame drains them.
//
// ## Architecture
//
// - `action`: Defines actions and default bindings
// - `manager`: Tracks the cursor and turns bound presses into commands
//
// ## Usage Example
//
// ```rust
// use engine::input::{InputCommand, InputManager};
//
// let mut input = InputManager::new();
//
// // In your event loop
// input.process_cursor_moved(cursor);
// input.process_mouse_button(button, state);
//
// // Once per frame
// for command in input.drain() {
//     if let InputCommand::Spawn(at) = command {
//         // Drop a ball at `at`
//     }
// }
// ```

pub mod action;
pub mod manager;

// Re-export commonly used types
#[allow(unused_imports)]
pub use action::{Action, InputSource};
pub use manager::{InputCommand, InputManager};
