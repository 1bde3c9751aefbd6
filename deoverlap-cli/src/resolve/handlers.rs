use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::ArgMatches;

use deoverlap_core::DeoverlapConfig;
use deoverlap_core::utils::{get_dynamic_reader_w_stdin, get_dynamic_writer};
use deoverlap_io::{HitReader, STDIO, TbloutSink, deoverlapped_path, overlaps_path};
use deoverlap_overlaprs::{HitSink, RunSummary};

use crate::common::{Scopes, build_config, input_paths, row_spinner};

/// Where one input's rows and diagnostics go.
struct Destinations {
    output: String,
    overlap_out: Option<String>,
}

fn destinations(
    input: &str,
    output: Option<&String>,
    overlap_out: bool,
) -> Result<Destinations> {
    let output = match output {
        Some(output) => output.to_owned(),
        None if input == STDIO => STDIO.to_string(),
        None => deoverlapped_path(Path::new(input))
            .to_string_lossy()
            .into_owned(),
    };

    let overlap_out = match (overlap_out, input == STDIO) {
        (false, _) => None,
        (true, true) => bail!("--overlap-out needs a named input file, not stdin"),
        (true, false) => Some(
            overlaps_path(Path::new(input))
                .to_string_lossy()
                .into_owned(),
        ),
    };

    Ok(Destinations {
        output,
        overlap_out,
    })
}

fn resolve_into<S: HitSink>(
    input: &str,
    config: &DeoverlapConfig,
    scopes: &Scopes,
    sink: S,
) -> Result<RunSummary> {
    let reader = get_dynamic_reader_w_stdin(input)
        .with_context(|| format!("Failed to open input: {}", input))?;
    let spinner = row_spinner(input)?;
    let hits = HitReader::new(reader, config.normalize_options())?.inspect(|_| spinner.inc(1));

    let (summary, _) = scopes
        .driver(config, sink)
        .run(hits)
        .with_context(|| format!("Failed to resolve overlaps in {}", input))?;

    spinner.finish_and_clear();
    Ok(summary)
}

fn resolve_file(
    input: &str,
    dest: &Destinations,
    config: &DeoverlapConfig,
    scopes: &Scopes,
) -> Result<RunSummary> {
    let out = get_dynamic_writer(&dest.output)
        .with_context(|| format!("Failed to create output: {}", dest.output))?;

    match &dest.overlap_out {
        Some(path) => {
            let diag = get_dynamic_writer(path)
                .with_context(|| format!("Failed to create overlap output: {}", path))?;
            let sink = TbloutSink::new(out)
                .with_overlap_out(diag)
                .inverted(config.invert);
            resolve_into(input, config, scopes, sink)
        }
        None => {
            let sink = TbloutSink::new(out).inverted(config.invert);
            resolve_into(input, config, scopes, sink)
        }
    }
}

pub fn run_resolve(matches: &ArgMatches) -> Result<()> {
    let mut config = build_config(matches)?;
    if matches.get_flag("invert") {
        config.invert = true;
    }

    let inputs = input_paths(matches);
    let output = matches.get_one::<String>("output");
    if output.is_some() && inputs.len() > 1 {
        bail!("--output can only be used with a single input file");
    }
    let overlap_out = matches.get_flag("overlap-out");

    let scopes = Scopes::load(&config)?;

    let n_inputs = inputs.len();
    let mut total = RunSummary::default();
    for input in inputs {
        let dest = destinations(input, output, overlap_out)?;
        let summary = resolve_file(input, &dest, &config, &scopes)?;

        log::info!(
            "{}: kept {} of {} hits across {} targets, removed {}",
            input,
            summary.kept,
            summary.total(),
            summary.targets,
            summary.removed
        );
        if dest.output != STDIO {
            log::info!("Wrote {}", dest.output);
        }
        total += summary;
    }

    if n_inputs > 1 {
        log::info!(
            "All {} inputs: kept {}, removed {}",
            n_inputs,
            total.kept,
            total.removed
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_default_destinations() {
        let dest = destinations("run/a.tblout.gz", None, true).unwrap();
        assert_eq!(dest.output, "run/a.tblout.deoverlapped");
        assert_eq!(dest.overlap_out.as_deref(), Some("run/a.tblout.overlaps"));
    }

    #[rstest]
    fn test_explicit_output() {
        let out = String::from("kept.tblout.gz");
        let dest = destinations("a.tblout", Some(&out), false).unwrap();
        assert_eq!(dest.output, "kept.tblout.gz");
        assert_eq!(dest.overlap_out, None);
    }

    #[rstest]
    fn test_stdin_goes_to_stdout() {
        let dest = destinations(STDIO, None, false).unwrap();
        assert_eq!(dest.output, STDIO);
        assert!(destinations(STDIO, None, true).is_err());
    }
}
