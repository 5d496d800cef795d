//! User Interface Module
//!
//! Rendering only: every function here reads [`crate::app::App`] and draws it.
//! State changes happen in the controller and the key handlers.

pub mod colors;
pub mod components;
pub mod editor;
pub mod popup;
