use raii_scope::Frame;
use std::ops::ControlFlow;

use crate::alloc::try_alloc_int;
use crate::report::{ScenarioReport, Transcript};
use crate::settings::DemoSettings;

pub fn run(settings: &DemoSettings) -> ScenarioReport {
    let transcript = Transcript::default();

    Frame::run("main", |frame| {
        let acquired = frame.try_with(
            "myint",
            || try_alloc_int("myint", settings.initial, false),
            transcript.releaser("myint"),
            |frame, myint| {
                transcript.line(format!("myint contains: {}", *frame[myint]));
                ControlFlow::<(), ()>::Continue(())
            },
        );
        match acquired {
            Ok(flow) => flow,
            Err(err) => {
                tracing::debug!(error = %err, "acquisition failed, skipping scope");
                transcript.line(format!("scope skipped: {err}"));
                ControlFlow::Continue(())
            }
        }
    });

    transcript.line("continuing with myint unbound");
    transcript.finish("failed-acquire", None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_cleanup_for_unacquired_resource() {
        let report = run(&DemoSettings::default());
        assert!(report.cleanups().is_empty());
        assert_eq!(report.events.len(), 2);
    }
}
