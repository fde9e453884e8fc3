//! Terminal and JSON rendering for the dmtopo binary

pub mod json;
pub mod views;
