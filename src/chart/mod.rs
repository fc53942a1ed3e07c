// Chart rendering: one PNG per dataset kind.

pub mod font;
pub mod render;

pub use render::{ChartOutcome, ChartRenderer};
