//! Diagnostics for the Ember pipeline.
//!
//! Every stage reports failures as a typed error that converts into a
//! [`Diagnostic`]: an [`ErrorCode`] for searchability, a message, and the
//! source span it is anchored to. Rendering goes through the code-frame
//! renderer so that every error is shown with the surrounding source.

pub mod code_frame;
mod diagnostic;
pub mod emitter;
mod error_code;
pub mod span_utils;

pub use code_frame::{code_frame, CodeFrameOptions};
pub use diagnostic::{Diagnostic, Label, Severity};
pub use error_code::ErrorCode;
