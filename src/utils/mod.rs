//! Utility modules

pub mod timing;
