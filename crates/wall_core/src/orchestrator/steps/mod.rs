//! Reference steps for the conference wall.
//!
//! - `ShowSchedule`: flip in the schedule, sessions two per row
//! - `ShowTopRatedToday`: flip in today's best rated talks, one per row
//! - `FlipOutSchedule`: flip the schedule out and remove it

mod flip_out_schedule;
mod panel;
mod show_schedule;
mod show_top_rated;

pub use flip_out_schedule::{FlipOutSchedule, FlipOutScheduleFactory};
pub use panel::{GridLayout, PanelConfig};
pub use show_schedule::{ShowSchedule, ShowScheduleFactory};
pub use show_top_rated::{ShowTopRatedToday, ShowTopRatedTodayFactory};
