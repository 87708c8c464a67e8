use clap::Subcommand;

pub mod basic;
pub mod failed_acquire;
pub mod nested;

use crate::report::Report;
use crate::settings::DemoSettings;

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Bind one heap integer, print it, release it on scope exit
    Basic,

    /// Return early from two nested scopes, releasing both innermost first
    Nested,

    /// Abandon a scope whose acquisition failed
    FailedAcquire,

    /// Run every scenario in order
    All,
}

impl Commands {
    pub fn execute(self, settings: &DemoSettings) -> Report {
        tracing::debug!(command = ?self, "running scenario");
        match self {
            Commands::Basic => Report::single(basic::run(settings)),
            Commands::Nested => Report::single(nested::run(settings)),
            Commands::FailedAcquire => Report::single(failed_acquire::run(settings)),
            Commands::All => Report {
                scenarios: vec![
                    basic::run(settings),
                    nested::run(settings),
                    failed_acquire::run(settings),
                ],
                footer: Some("Test".to_string()),
            },
        }
    }
}
