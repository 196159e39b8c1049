//! Utilities shared by the binaries of the workspace.
pub mod tracer;

pub use tracer::{TracerError, TracerOptions, init_tracer};

#[doc(hidden)]
pub use const_format;
#[doc(hidden)]
pub use git_version;

/// Expands to the version string of the invoking crate, followed by the git revision it was built from.
#[macro_export]
macro_rules! version {
    () => {
        $crate::const_format::concatcp!(
            env!("CARGO_PKG_VERSION"),
            " (",
            $crate::git_version::git_version!(
                args = ["--tags", "--always", "--dirty"],
                fallback = "unknown revision"
            ),
            ")"
        )
    };
}
