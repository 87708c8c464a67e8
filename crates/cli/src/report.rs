//! Transcripts of what each scenario printed and released, in order.

use raii_core::Result;
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;

use crate::settings::OutputFormat;

/// One thing that happened while a scenario ran
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Event {
    Line(String),
    Cleanup(String),
}

/// Ordered record shared between a scenario body and its release actions
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    events: Rc<RefCell<Vec<Event>>>,
}

impl Transcript {
    pub fn line(&self, text: impl Into<String>) {
        self.events.borrow_mut().push(Event::Line(text.into()));
    }

    /// Release action for a heap integer that records its own cleanup
    pub fn releaser(&self, label: &'static str) -> impl FnOnce(Box<i32>) + 'static {
        let events = Rc::clone(&self.events);
        move |resource| {
            tracing::debug!(label, value = *resource, "releasing heap integer");
            events.borrow_mut().push(Event::Cleanup(label.to_string()));
            drop(resource);
        }
    }

    /// Labels released so far, in release order
    pub fn cleanups(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                Event::Cleanup(label) => Some(label.clone()),
                Event::Line(_) => None,
            })
            .collect()
    }

    pub fn finish(&self, name: &str, result: Option<i32>) -> ScenarioReport {
        ScenarioReport {
            name: name.to_string(),
            events: self.events.borrow().clone(),
            result,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub name: String,
    pub events: Vec<Event>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<i32>,
}

impl ScenarioReport {
    pub fn cleanups(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Cleanup(label) => Some(label.as_str()),
                Event::Line(_) => None,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Report {
    pub scenarios: Vec<ScenarioReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
}

impl Report {
    pub fn single(scenario: ScenarioReport) -> Self {
        Self {
            scenarios: vec![scenario],
            footer: None,
        }
    }

    pub fn render(&self, format: OutputFormat, show_cleanups: bool) -> Result<String> {
        match format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            OutputFormat::Text => {
                let mut out = String::new();
                for event in self.scenarios.iter().flat_map(|s| &s.events) {
                    match event {
                        Event::Line(text) => {
                            out.push_str(text);
                            out.push('\n');
                        }
                        Event::Cleanup(label) if show_cleanups => {
                            out.push_str(&format!("[cleanup] {label}\n"));
                        }
                        Event::Cleanup(_) => {}
                    }
                }
                if let Some(footer) = &self.footer {
                    out.push_str(footer);
                    out.push('\n');
                }
                Ok(out)
            }
        }
    }
}
