//! Command implementations
//!
//! One module per subcommand; `main` only parses arguments and dispatches
//! here. Handlers use `anyhow` for error context and `console` for styled
//! user-facing output, while the library layer reports through
//! `crate::error` and `tracing`.

pub mod init;
pub mod list;
pub mod setup;
pub mod update;
pub mod version;

pub use init::{execute_init, InitOptions};
pub use list::execute_list;
pub use setup::{execute_setup, SetupOptions};
pub use update::execute_update;
pub use version::execute_version;
