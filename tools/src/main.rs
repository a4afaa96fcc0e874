//! campaign-gen: one-shot generator for the campaign performance dataset.
//!
//! Usage:
//!   campaign-gen
//!   campaign-gen --seed 42 --campaigns 100 --out-dir ./data
//!   campaign-gen --anchor-date 2024-06-30 --config overrides.json --summary-json

use anyhow::{Context, Result};
use campaign_core::{
    config::{parse_date, GeneratorConfig},
    pipeline::GenerationRun,
};
use std::env;
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let mut config = match find_arg(&args, "--config") {
        Some(path) => GeneratorConfig::load(Path::new(path))
            .with_context(|| format!("loading config {path}"))?,
        None => GeneratorConfig::default(),
    };
    config.seed = parse_arg(&args, "--seed", config.seed)?;
    config.campaign_count = parse_arg(&args, "--campaigns", config.campaign_count)?;
    if let Some(value) = find_arg(&args, "--anchor-date") {
        config.anchor_date = Some(parse_date(value)?);
    }
    let out_dir = PathBuf::from(find_arg(&args, "--out-dir").unwrap_or("./data"));
    let summary_json = args.iter().any(|a| a == "--summary-json");

    // Only the binary reads the clock: the window ends today unless pinned.
    let anchor = config.resolve_anchor(chrono::Local::now().date_naive());

    println!("Campaign dataset generator");
    println!("  seed:       {}", config.seed);
    println!("  campaigns:  {}", config.campaign_count);
    println!("  anchor:     {anchor}");
    println!("  out_dir:    {}", out_dir.display());
    println!();

    let run = GenerationRun::execute(config, anchor)?;
    let paths = run.write_artifacts(&out_dir, summary_json)?;

    println!("Campaign dataset generated.");
    println!("  Campaigns:  {}", run.summary.record_count);
    println!("  Saved to:   {}", paths.dataset.display());
    println!();
    print!("{}", run.console_report());
    println!();
    println!("Dataset information saved: {}", paths.info.display());
    if let Some(path) = &paths.summary_json {
        println!("Summary JSON saved:        {}", path.display());
    }
    println!("Done.");
    log::info!("Run complete: {} campaigns in {}", run.summary.record_count, out_dir.display());

    Ok(())
}

fn find_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

/// Parse `flag`'s value, or `default` when the flag is absent.
fn parse_arg<T>(args: &[String], flag: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match find_arg(args, flag) {
        Some(value) => value
            .parse()
            .with_context(|| format!("invalid value for {flag}: {value:?}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn absent_flag_keeps_default() {
        let a = args(&["campaign-gen"]);
        assert_eq!(parse_arg(&a, "--seed", 42u64).unwrap(), 42);
    }

    #[test]
    fn present_flag_is_parsed() {
        let a = args(&["campaign-gen", "--campaigns", "250"]);
        assert_eq!(parse_arg(&a, "--campaigns", 100usize).unwrap(), 250);
    }

    #[test]
    fn malformed_value_is_an_error() {
        let a = args(&["campaign-gen", "--seed", "abc"]);
        let err = parse_arg(&a, "--seed", 42u64).unwrap_err();
        assert!(err.to_string().contains("--seed"), "{err}");

        let a = args(&["campaign-gen", "--campaigns", "-5"]);
        assert!(parse_arg(&a, "--campaigns", 100usize).is_err());
    }
}
