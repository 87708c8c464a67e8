//! Runtime settings for the demo, resolved from arguments and environment.

use clap::ValueEnum;
use raii_core::{Error, Result};

pub const DEFAULT_INITIAL: i32 = 10;
pub const DEFAULT_BASE: i32 = 40;

/// How the report is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoSettings {
    /// Output format for the report
    pub format: OutputFormat,

    /// Value stored by the basic scenario
    pub initial: i32,

    /// Value of the outer resource in the nested scenario
    pub base: i32,

    /// Whether text output interleaves cleanup events
    pub show_cleanups: bool,
}

impl DemoSettings {
    pub fn new(format: OutputFormat, initial: i32, base: i32, show_cleanups: bool) -> Result<Self> {
        if base.checked_add(2).is_none() {
            return Err(Error::configuration(format!(
                "nested base {base} leaves no room for bar = foo + 2"
            )));
        }
        Ok(Self {
            format,
            initial,
            base,
            show_cleanups,
        })
    }
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            initial: DEFAULT_INITIAL,
            base: DEFAULT_BASE,
            show_cleanups: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_overflowing_base() {
        let err = DemoSettings::new(OutputFormat::Text, 0, i32::MAX, false).unwrap_err();
        assert!(err.to_string().contains("no room"));
    }

    #[test]
    fn test_accepts_defaults() {
        let settings =
            DemoSettings::new(OutputFormat::Json, DEFAULT_INITIAL, DEFAULT_BASE, true).unwrap();
        assert_eq!(settings.base, 40);
        assert_eq!(settings.format, OutputFormat::Json);
    }
}
