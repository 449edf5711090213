#![warn(missing_docs)]

//! Core library for deskmenu => See `deskmenu` crate.
//!
//! Contains the nested context menu subsystem and its pointer input dispatch.

pub use nalgebra as math;
pub use vello::kurbo;

/// Contains the [MenuConfig](config::MenuConfig) struct.
pub mod config;

/// Contains pointer events and the [InputDispatcher](input::InputDispatcher).
pub mod input;

pub mod menu;
