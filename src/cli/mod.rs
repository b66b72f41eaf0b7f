//! Command-line interface for the `cpfr` binary.
//!
//! | Submodule     | Responsibility |
//! |---------------|---------------|
//! | [`constants`] | Program identity, the shared `DISPLAY_LEVEL` atomic and the `displayout!` and `displaylevel!` macros. |
//! | [`args`]      | `ParsedArgs` (clap) and its resolution into `Settings`. |

pub mod constants;
pub mod args;
