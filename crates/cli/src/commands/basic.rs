use raii_scope::Frame;
use std::ops::ControlFlow;

use crate::alloc::alloc_int;
use crate::report::{ScenarioReport, Transcript};
use crate::settings::DemoSettings;

pub fn run(settings: &DemoSettings) -> ScenarioReport {
    let transcript = Transcript::default();

    Frame::run("main", |frame| {
        frame.with_labeled(
            "myint",
            || alloc_int(0),
            transcript.releaser("myint"),
            |frame, myint| {
                *frame[myint] = settings.initial;
                let value: &i32 = &frame[myint];
                transcript.line(format!(
                    "myint is located at {value:p} and contains: {value}"
                ));
                transcript.line(frame.name());
                ControlFlow::<(), ()>::Continue(())
            },
        )
    });

    transcript.finish("basic", None)
}
