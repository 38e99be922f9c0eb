//! Command line front end.
//!
//! Handlers here only parse input and print results; the work is done by
//! the `db`, `call`, `pipeline` and `vapi` modules.

mod args;
pub mod assistant;
pub mod attendee;
pub mod webinar;

pub use args::{
    AssistantCliArgs, AssistantCommand, AttendeeCliArgs, AttendeeCommand, Cli, CliCommand,
    WebinarCliArgs, WebinarCommand,
};
pub use assistant::handle_assistant_command;
pub use attendee::handle_attendee_command;
pub use webinar::handle_webinar_command;

use crate::config::Config;
use anyhow::{Context, Result};
use rusqlite::Connection;

/// Open the configured database for a one-shot command.
fn open_db() -> Result<Connection> {
    let config = Config::load()?;
    let path = config.database_path()?;
    crate::db::init_db(&path).with_context(|| format!("Failed to open database at {:?}", path))
}
