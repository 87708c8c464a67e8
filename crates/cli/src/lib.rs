pub mod alloc;
pub mod commands;
pub mod report;
pub mod settings;

pub use commands::Commands;
pub use report::{Event, Report, ScenarioReport, Transcript};
pub use settings::{DemoSettings, OutputFormat};
