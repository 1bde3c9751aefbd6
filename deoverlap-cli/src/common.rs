use std::path::Path;

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command, arg};
use indicatif::{ProgressBar, ProgressStyle};

use deoverlap_core::{ClanMap, DeoverlapConfig, ModelList};
use deoverlap_overlaprs::{DriverOptions, GroupDriver, HitSink};

///
/// Options shared by every subcommand that reads search output.
///
pub fn add_run_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("inputs")
            .required(true)
            .num_args(1..)
            .help("Tabular search output files, sorted by target and rank ('-' for stdin)"),
    )
    .arg(arg!(-c --config <config> "TOML file with default options; flags override it"))
    .arg(
        Arg::new("format")
            .long("format")
            .short('f')
            .help("Input format: cm-search (default), cm-scan, nhmmer or hmmsearch"),
    )
    .arg(
        arg!(--"best-domain" "hmmsearch only: rank by best single domain instead of full sequence")
            .action(ArgAction::SetTrue),
    )
    .arg(
        Arg::new("rank")
            .long("rank")
            .short('r')
            .help("Ranking key the input is sorted by: evalue (default) or score"),
    )
    .arg(
        Arg::new("min-overlap")
            .long("min-overlap")
            .help("Minimum shared positions for two hits to overlap (default 1)"),
    )
    .arg(arg!(--"clan-file" <clan_file> "Only remove overlaps between models of the same clan"))
    .arg(arg!(--"model-list" <model_list> "Only remove overlaps between models listed in this file"))
    .arg(
        arg!(--"max-keep" "Only still-kept hits can remove later hits")
            .action(ArgAction::SetTrue),
    )
    .arg(
        arg!(--"assert-cmsearch" "Accept cm-search rows that look like cmscan output")
            .action(ArgAction::SetTrue),
    )
    .arg(
        Arg::new("batch-groups")
            .long("batch-groups")
            .help("Resolve this many targets at a time in parallel (default 1)"),
    )
}

///
/// Build the run configuration from an optional TOML file plus command-line overrides.
///
pub fn build_config(matches: &ArgMatches) -> Result<DeoverlapConfig> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => DeoverlapConfig::try_from(Path::new(path))
            .with_context(|| format!("Failed to read config file: {}", path))?,
        None => DeoverlapConfig::default(),
    };

    if let Some(format) = matches.get_one::<String>("format") {
        config.format = format.parse().map_err(anyhow::Error::msg)?;
    }
    if let Some(rank) = matches.get_one::<String>("rank") {
        config.rank = rank.parse().map_err(anyhow::Error::msg)?;
    }
    if let Some(min_overlap) = matches.get_one::<String>("min-overlap") {
        config.min_overlap = min_overlap
            .parse()
            .context("--min-overlap must be a positive integer")?;
    }
    if let Some(batch_groups) = matches.get_one::<String>("batch-groups") {
        config.batch_groups = batch_groups
            .parse()
            .context("--batch-groups must be a positive integer")?;
    }
    if let Some(clan_file) = matches.get_one::<String>("clan-file") {
        config.clan_file = Some(clan_file.into());
    }
    if let Some(model_list) = matches.get_one::<String>("model-list") {
        config.model_list = Some(model_list.into());
    }
    if matches.get_flag("best-domain") {
        config.best_domain = true;
    }
    if matches.get_flag("max-keep") {
        config.max_keep = true;
    }
    if matches.get_flag("assert-cmsearch") {
        config.assert_cmsearch = true;
    }

    config.validate()?;
    Ok(config)
}

///
/// Clan map and model list, loaded once and shared by every input file.
///
#[derive(Default)]
pub struct Scopes {
    pub clans: Option<ClanMap>,
    pub models: Option<ModelList>,
}

impl Scopes {
    pub fn load(config: &DeoverlapConfig) -> Result<Self> {
        let clans = match &config.clan_file {
            Some(path) => Some(
                ClanMap::from_file(path)
                    .with_context(|| format!("Failed to load clan file: {}", path.display()))?,
            ),
            None => None,
        };
        let models = match &config.model_list {
            Some(path) => Some(
                ModelList::from_file(path)
                    .with_context(|| format!("Failed to load model list: {}", path.display()))?,
            ),
            None => None,
        };
        Ok(Scopes { clans, models })
    }

    pub fn driver<S: HitSink>(&self, config: &DeoverlapConfig, sink: S) -> GroupDriver<'_, S> {
        let mut driver = GroupDriver::new(DriverOptions::from(config), sink);
        if let Some(clans) = &self.clans {
            driver = driver.with_clans(clans);
        }
        if let Some(models) = &self.models {
            driver = driver.with_models(models);
        }
        driver
    }
}

pub fn input_paths(matches: &ArgMatches) -> Vec<&String> {
    matches
        .get_many::<String>("inputs")
        .map(|inputs| inputs.collect())
        .unwrap_or_default()
}

/// Row-count spinner on stderr; hidden when stderr is not a terminal.
pub fn row_spinner(input: &str) -> Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed}] {msg} {pos} rows ({per_sec})")?
            .tick_strings(&["-", "\\", "|", "/"]),
    );
    spinner.set_message(format!("Processing {}", input));
    Ok(spinner)
}
