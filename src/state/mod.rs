//! Application state module

mod app_state;
mod catalog;
mod forms;

pub use app_state::*;
pub use catalog::*;
pub use forms::*;
