//! Form rendering module
//!
//! - `field_renderer`: one control per field kind
//! - `signup_form`: the sign-up form with its action panel

mod field_renderer;
mod signup_form;

pub use signup_form::draw;
