#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Must not panic on any document
    let _ = logprinter::pretty_xml(data);
});
