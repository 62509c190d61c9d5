//! Filter command implementation
//!
//! Dry run of the import filter: prints the verdict for each candidate.

use crate::cli::load_settings;
use crate::core::filter::ImportFilter;
use clap::Args;

/// Arguments for the filter command
#[derive(Args, Debug)]
pub struct FilterArgs {
    /// File names to test against the ignore patterns
    #[arg(required = true)]
    pub candidates: Vec<String>,

    /// Use these pipe-delimited patterns instead of the configured ones
    #[arg(long)]
    pub patterns: Option<String>,
}

impl FilterArgs {
    /// Execute the filter command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let mut config = match load_settings(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Failed to load configuration: {e}");
                return Ok(2);
            }
        };
        if let Some(patterns) = &self.patterns {
            config.import.ignore_patterns = patterns.clone();
        }

        let filter = match ImportFilter::from_config(&config.import) {
            Ok(f) => f,
            Err(e) => {
                eprintln!("Invalid ignore pattern: {e}");
                return Ok(2);
            }
        };

        let outcome = filter.filter(self.candidates.iter().cloned());
        for candidate in &self.candidates {
            let verdict = if outcome.ignored.contains(candidate) {
                "ignore"
            } else {
                "keep"
            };
            println!("  {verdict:<6} {candidate}");
        }
        println!();
        println!(
            "{} of {} candidate(s) ignored by {} pattern(s)",
            outcome.ignored_count(),
            self.candidates.len(),
            filter.len()
        );
        Ok(0)
    }
}
