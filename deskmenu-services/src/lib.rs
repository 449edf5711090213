// SPDX-License-Identifier: MIT OR Apache-2.0
#![warn(missing_docs)]

//! Settings and configuration services for deskmenu.

/// Menu settings loaded from TOML files in XDG locations.
pub mod settings;

pub use settings::{Settings, SettingsError, SettingsRegistry, SETTINGS_PREFIX};
