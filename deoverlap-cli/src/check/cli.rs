use clap::Command;

use crate::common::add_run_args;

pub const CHECK_CMD: &str = "check";

pub fn create_check_cli() -> Command {
    add_run_args(Command::new(CHECK_CMD).about(
        "Validate sorting and formatting of the inputs and report how many hits would be removed, without writing anything.",
    ))
}
