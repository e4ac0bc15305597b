//! Per-question option display.

mod options;

pub use options::{OptionPresenter, OptionStatus, status_of};
