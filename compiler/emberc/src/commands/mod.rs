//! Command handlers for the `emberc` CLI.
//!
//! Each submodule implements one command. Argument parsing for `build`
//! lives in [`build`] so it can be tested without touching the
//! filesystem; reading files and reporting diagnostics live here.

use std::io::IsTerminal;

use ember_diagnostic::emitter::{ColorMode, SourceFile, TerminalEmitter};
use ember_diagnostic::{CodeFrameOptions, Diagnostic};

pub mod build;
mod debug;

pub use build::{build_files, parse_build_args, parse_transforms, BuildArgs};
pub use debug::{lex_file, parse_file};

/// Read a source file, describing the failure for the user.
pub(crate) fn read_source(path: &str) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
        std::io::ErrorKind::PermissionDenied => format!("permission denied reading '{path}'"),
        std::io::ErrorKind::InvalidData => format!("'{path}' contains invalid UTF-8 data"),
        _ => format!("error reading '{path}': {e}"),
    })
}

/// Read a file or exit with status 1.
pub(crate) fn read_file(path: &str) -> String {
    match read_source(path) {
        Ok(content) => content,
        Err(msg) => {
            eprintln!("{msg}");
            std::process::exit(1);
        }
    }
}

/// Print a diagnostic for `path` to stderr.
pub(crate) fn report(diagnostic: &Diagnostic, path: &str, text: &str, frame: CodeFrameOptions) {
    let stderr = std::io::stderr();
    let is_tty = stderr.is_terminal();
    let mut emitter = TerminalEmitter::with_color_mode(stderr, ColorMode::Auto, is_tty).with_frame_options(frame);
    if let Err(e) = emitter.emit(diagnostic, SourceFile { path, text }) {
        eprintln!("error: failed to write diagnostic: {e}");
    }
}
