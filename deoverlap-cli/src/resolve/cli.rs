use clap::{ArgAction, Command, arg};

use crate::common::add_run_args;

pub const RESOLVE_CMD: &str = "resolve";

pub fn create_resolve_cli() -> Command {
    let cmd = Command::new(RESOLVE_CMD)
        .about("Remove lower-ranked hits that overlap a higher-ranked hit on the same target and strand.")
        .arg(arg!(-o --output <output> "Write kept rows here instead of <input>.deoverlapped ('-' for stdout, '.gz' to compress)"))
        .arg(
            arg!(--"overlap-out" "Also write per-hit diagnostics to <input>.overlaps")
                .action(ArgAction::SetTrue),
        )
        .arg(
            arg!(--invert "Write the removed rows instead of the kept ones")
                .action(ArgAction::SetTrue),
        );
    add_run_args(cmd)
}
