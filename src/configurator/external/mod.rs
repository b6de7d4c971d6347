//! External collaborators: process execution, tool discovery and Xcode
//! project membership.
//!
//! Every external program is reached through [`CommandRunner`] so the engine
//! can be exercised without `keytool`, `ruby` or the `xcodeproj` gem.

mod membership;
mod runner;
mod tools;

pub use membership::{ProjectMembership, XcodeprojScripts};
pub use runner::{CommandOutput, CommandRunner, CommandSpec, SystemRunner, run_checked};
pub use tools::{ensure_xcodeproj_gem, find_keytool, find_ruby};
