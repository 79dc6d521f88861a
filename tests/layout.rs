use chrono::Datelike;
use logprinter::layout::{Conversion, LayoutSegment, Modifier, java_to_strftime};
use logprinter::{CallSite, Directory, Layout, LogRecord, Priority};
use std::panic::Location;
use std::sync::Arc;

fn record(priority: Priority, logger: &str, message: &str) -> LogRecord {
    LogRecord::now(priority, Arc::from(logger), message.to_string())
}

#[test]
fn parse_splits_fields_and_literals() {
    let layout = Layout::parse("%-5p|%c{1}|%m%n").unwrap();
    assert_eq!(
        layout.segments(),
        &[
            LayoutSegment::Field(
                Conversion::Priority,
                Modifier {
                    left_justify: true,
                    min: Some(5),
                    max: None
                }
            ),
            LayoutSegment::Literal("|".to_string()),
            LayoutSegment::Field(Conversion::Logger(Some(1)), Modifier::default()),
            LayoutSegment::Literal("|".to_string()),
            LayoutSegment::Field(Conversion::Message, Modifier::default()),
            LayoutSegment::Field(Conversion::Newline, Modifier::default()),
        ]
    );
    assert_eq!(layout.pattern(), "%-5p|%c{1}|%m%n");
}

#[test]
fn render_applies_padding_and_logger_depth() {
    let layout = Layout::parse("%-5p|%c{1}|%m%n").unwrap();
    let line = layout.render(&record(Priority::Warn, "org.apache.http", "slow"));
    assert_eq!(line, "WARN |http|slow\n");
}

#[test]
fn assert_renders_as_error_label() {
    let layout = Layout::parse("%p").unwrap();
    assert_eq!(layout.render(&record(Priority::Assert, "a", "x")), "ERROR");
}

#[test]
fn max_width_truncates_from_the_left() {
    let layout = Layout::parse("[%.4c][%6c]").unwrap();
    assert_eq!(layout.render(&record(Priority::Info, "abcdef", "")), "[cdef][abcdef]");
    assert_eq!(layout.render(&record(Priority::Info, "ab", "")), "[ab][    ab]");
}

#[test]
fn unknown_conversions_and_escaped_percent_stay_literal() {
    let layout = Layout::parse("%q 100%% %m").unwrap();
    assert_eq!(layout.render(&record(Priority::Info, "a", "done")), "%q 100% done");
}

#[test]
fn unterminated_option_is_rejected() {
    assert!(Layout::parse("%d{yyyy-MM").is_err());
}

#[test]
fn date_option_takes_java_patterns() {
    let layout = Layout::parse("%d{yyyy}").unwrap();
    let rec = record(Priority::Info, "a", "");
    assert_eq!(layout.render(&rec), rec.timestamp.year().to_string());
}

#[test]
fn default_date_has_millisecond_precision() {
    let layout = Layout::parse("%d").unwrap();
    let rendered = layout.render(&record(Priority::Info, "a", ""));
    // 2024-01-02 03:04:05,678
    assert_eq!(rendered.len(), 23);
    assert_eq!(&rendered[19..20], ",");
}

#[test]
fn call_site_fields_fall_back_to_question_mark() {
    let layout = Layout::parse("%F:%L %C %M").unwrap();
    assert_eq!(layout.render(&record(Priority::Info, "a", "")), "?:? ? ?");
}

#[test]
fn call_site_fields_render_location() {
    let layout = Layout::parse("%F:%L %C").unwrap();
    let mut rec = record(Priority::Info, "a", "");
    let site = CallSite::from_location(Location::caller());
    rec.location = Some(site);
    let expected = format!("{}:{} {}", site.file_name(), site.line, site.module());
    assert_eq!(layout.render(&rec), expected);
}

#[test]
fn call_site_module_path() {
    let site = CallSite {
        file: "src/net/conn.rs",
        line: 7,
        column: 1,
    };
    assert_eq!(site.module(), "src::net::conn");
    assert_eq!(site.file_name(), "conn.rs");
}

#[test]
fn marker_thread_and_relative_time() {
    let directory = Directory::new();
    let layout = Layout::parse("%marker|%t|%r").unwrap();
    let mut rec = record(Priority::Info, "a", "");
    rec.marker = directory.marker("NET");
    rec.thread = "worker-1".to_string();
    rec.relative_ms = 1500;
    assert_eq!(layout.render(&rec), "NET|worker-1|1500");

    rec.marker = None;
    assert_eq!(layout.render(&rec), "|worker-1|1500");
}

#[test]
fn default_layout_is_message_and_newline() {
    let layout = Layout::default();
    assert_eq!(layout.pattern(), "%m%n");
    assert_eq!(layout.render(&record(Priority::Info, "a", "hi")), "hi\n");
}

#[test]
fn java_date_patterns_translate_to_strftime() {
    assert_eq!(
        java_to_strftime("yyyy-MM-dd HH:mm:ss,SSS"),
        "%Y-%m-%d %H:%M:%S,%3f"
    );
    assert_eq!(java_to_strftime("yy/MMM/d"), "%y/%b/%d");
    assert_eq!(java_to_strftime("yyyy-MM-dd'T'HH"), "%Y-%m-%dT%H");
    assert_eq!(java_to_strftime("h 'o''clock' a"), "%I o'clock %p");
    assert_eq!(java_to_strftime("ABSOLUTE"), "%H:%M:%S,%3f");
    assert_eq!(java_to_strftime("%H:%M"), "%H:%M");
}

#[test]
fn unusable_date_option_is_rejected() {
    assert!(Layout::parse("%d{%Q}").is_err());
    assert!(Layout::parse("%d{%Y-%m-%d}").is_ok());
}
