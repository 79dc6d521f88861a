#![no_main]
use libfuzzer_sys::fuzz_target;
use logprinter::{Arg, sprintf};

fuzz_target!(|data: &str| {
    // Must not panic on any template, with any mix of argument kinds
    let args = [
        Arg::from("text"),
        Arg::from(-42),
        Arg::from(7u64),
        Arg::from(1.5),
        Arg::from(true),
        Arg::from('c'),
    ];
    let _ = sprintf(data, &args);
});
