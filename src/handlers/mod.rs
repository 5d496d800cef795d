//! Event Handling Module
//!
//! Everything between raw terminal events and controller commands.
//!
//! - **`keys`**: key bindings per focused pane

pub mod keys;
