//! Command implementations.
//!
//! - [`analyze`] - build dependency trees and write a report
//! - [`detect`] - print what entry detection finds

pub mod analyze;
pub mod detect;

pub use analyze::execute as analyze_execute;
pub use detect::execute as detect_execute;
