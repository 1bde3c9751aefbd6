use anyhow::{Context, Result};
use clap::ArgMatches;

use deoverlap_core::utils::get_dynamic_reader_w_stdin;
use deoverlap_io::HitReader;
use deoverlap_overlaprs::{NullSink, RunSummary};

use crate::common::{Scopes, build_config, input_paths, row_spinner};

pub fn run_check(matches: &ArgMatches) -> Result<()> {
    let config = build_config(matches)?;
    let scopes = Scopes::load(&config)?;

    let mut total = RunSummary::default();
    for input in input_paths(matches) {
        let reader = get_dynamic_reader_w_stdin(input)
            .with_context(|| format!("Failed to open input: {}", input))?;
        let spinner = row_spinner(input)?;
        let hits =
            HitReader::new(reader, config.normalize_options())?.inspect(|_| spinner.inc(1));

        let (summary, _) = scopes
            .driver(&config, NullSink)
            .run(hits)
            .with_context(|| format!("{} failed the check", input))?;
        spinner.finish_and_clear();

        println!(
            "{}\t{}\t{}\t{}",
            input, summary.targets, summary.kept, summary.removed
        );
        total += summary;
    }

    log::info!(
        "All inputs passed: {} targets, {} hits would be kept, {} removed",
        total.targets,
        total.kept,
        total.removed
    );

    Ok(())
}
