#![no_main]
use libfuzzer_sys::fuzz_target;
use logprinter::layout::java_to_strftime;

fuzz_target!(|data: &str| {
    // Must not panic on any date option
    let _ = java_to_strftime(data);
});
