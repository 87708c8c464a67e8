use raii_scope::Frame;

use crate::alloc::alloc_int;
use crate::report::{ScenarioReport, Transcript};
use crate::settings::DemoSettings;

/// Opens `foo` and `bar = foo + 2`, then returns a copy of `bar` from
/// inside both scopes.
fn foo(settings: &DemoSettings, transcript: &Transcript) -> i32 {
    Frame::run("foo", |frame| {
        frame.with_labeled(
            "foo",
            || alloc_int(0),
            transcript.releaser("foo"),
            |frame, foo| {
                *frame[foo] = settings.base;
                frame.with_labeled(
                    "bar",
                    || alloc_int(0),
                    transcript.releaser("bar"),
                    |frame, bar| {
                        let next = *frame[foo] + 2;
                        *frame[bar] = next;
                        transcript.line(format!("Bar {}!", *frame[bar]));
                        transcript.line(format!("Foo! {}", *frame[foo]));
                        let res = *frame[bar];
                        frame.safe_return(res)
                    },
                )
            },
        )
    })
}

pub fn run(settings: &DemoSettings) -> ScenarioReport {
    let transcript = Transcript::default();
    let res = foo(settings, &transcript);
    transcript.line(format!("res: {res}"));
    transcript.finish("nested", Some(res))
}
