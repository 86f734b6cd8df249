//! Staff roster for a hospital sterilization (CSSD) unit.
//!
//! The core is [`schedule::resolve_cell`], which turns one employee's record
//! for one day into the code, label and colors shown in every view. Around it
//! sit the legend model, the shift-duration calculator, the roster view
//! models, a REST client and the command line and terminal front ends.

pub mod add;
pub mod api;
pub mod calendar;
pub mod config;
pub mod delete;
pub mod error;
pub mod interactive;
pub mod legend_editor;
pub mod logging;
pub mod query;
pub mod roster;
pub mod schedule;
pub mod utils;
