#![no_main]
use libfuzzer_sys::fuzz_target;
use logprinter::{Layout, LogRecord, Priority};
use std::sync::Arc;

fuzz_target!(|data: &str| {
    // Any pattern that parses must also render
    if let Ok(layout) = Layout::parse(data) {
        let record = LogRecord::now(Priority::Info, Arc::from("fuzz.layout"), data.to_string());
        let _ = layout.render(&record);
    }
});
