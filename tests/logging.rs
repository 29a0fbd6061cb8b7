//! Non-fatal conditions are reported through the `log` facade. These tests
//! install a capturing logger and check the warnings a render emits.

use std::{
    sync::{Mutex, Once},
    thread::{self, ThreadId},
};

use log::{Level, LevelFilter, Log, Metadata, Record};
use thermal_label::{FontResolver, Renderer, TextStyle};

const MISSING_FONT: &str = "/nonexistent/fonts/NoSuchFont.ttf";

static RECORDS: Mutex<Vec<(ThreadId, Level, String)>> = Mutex::new(Vec::new());
static INIT: Once = Once::new();

struct Capture;

impl Log for Capture {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        RECORDS.lock().unwrap().push((
            thread::current().id(),
            record.level(),
            record.args().to_string(),
        ));
    }

    fn flush(&self) {}
}

static LOGGER: Capture = Capture;

/// Warnings logged so far by the calling thread. Tests run on separate
/// threads, so each only sees its own records.
fn warnings() -> Vec<String> {
    let id = thread::current().id();
    RECORDS
        .lock()
        .unwrap()
        .iter()
        .filter(|(thread, level, _)| *thread == id && *level == Level::Warn)
        .map(|(_, _, message)| message.clone())
        .collect()
}

fn capture_logs() {
    INIT.call_once(|| {
        log::set_logger(&LOGGER).unwrap();
        log::set_max_level(LevelFilter::Debug);
    });
}

fn builtin_renderer() -> Renderer {
    Renderer::with_resolver(FontResolver::new().with_system_fonts(Vec::new()))
}

#[test]
fn floor_reached_is_logged() {
    capture_logs();
    let style = TextStyle::new(MISSING_FONT, 20);
    let (_, plan) = builtin_renderer()
        .layout("Supercalifragilisticexpialidocious", &style, 50)
        .unwrap();
    assert!(plan.floor_reached);

    let warnings = warnings();
    assert!(
        warnings.iter().any(|w| w.contains("minimum font size")),
        "{:?}",
        warnings
    );
}

#[test]
fn fitting_text_logs_no_floor_warning() {
    capture_logs();
    let style = TextStyle::new(MISSING_FONT, 20);
    let (_, plan) = builtin_renderer().layout("Hi", &style, 384).unwrap();
    assert!(!plan.floor_reached);
    assert!(!warnings().iter().any(|w| w.contains("minimum font size")));
}

#[test]
fn font_fallback_is_logged() {
    capture_logs();
    let style = TextStyle::new(MISSING_FONT, 20);
    let (font, _) = builtin_renderer().layout("Hello", &style, 200).unwrap();
    assert!(font.is_builtin());

    let warnings = warnings();
    assert!(
        warnings.iter().any(|w| w.contains("falling back to default")),
        "{:?}",
        warnings
    );
    assert!(
        warnings.iter().any(|w| w.contains("built-in bitmap font")),
        "{:?}",
        warnings
    );
}
