//! Stages command implementation

use crate::cli::error::CliError;
use crate::cli::output::format_stage_list;

/// Handle the `stages` command
pub fn handle_stages() -> Result<(), CliError> {
    print!("{}", format_stage_list());
    Ok(())
}
