//! Utility modules for the notebook execution core

pub mod html;
pub mod js_value;
pub mod timing;
