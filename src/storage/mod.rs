// Flat-file persistence and change detection against the previous run.

pub mod change;
pub mod csv_store;

pub use change::{ChangeStatus, detect_change};
pub use csv_store::save_table;
