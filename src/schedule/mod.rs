//! Schedule-cell resolution
//!
//! Pure, synchronous functions that turn schedule records and master-list
//! snapshots into colors and labels. Nothing here performs I/O or holds
//! mutable state, so every function is safe to call from any thread.

pub mod codes;
pub mod contrast;
pub mod definitions;
pub mod duration;
pub mod legend;
pub mod lookup;
pub mod master;
pub mod record;
pub mod resolver;

pub use codes::{codes_match, normalize_code, to_backend_code, to_short_code};
pub use contrast::{contrast_text_color, DARK_TEXT, LIGHT_TEXT};
pub use definitions::{lookup_definition, Category, ShiftDefinition};
pub use duration::calculate_shift_hours;
pub use legend::{enrich_all, enrich_legend, LegendEntry, LegendSource};
pub use master::{classify_shift, MasterData, MasterKind, MasterRef, MasterShift, MasterUnit};
pub use record::{ScheduleEntry, ScheduleRecord};
pub use resolver::{resolve_cell, Background, ResolvedCell, NO_SCHEDULE_LABEL};
