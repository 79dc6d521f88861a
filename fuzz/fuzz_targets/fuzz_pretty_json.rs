#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Pretty output must be stable when pretty-printed again
    if let Ok(once) = logprinter::pretty_json(data) {
        let twice = logprinter::pretty_json(&once).ok();
        assert_eq!(twice.as_deref(), Some(once.as_str()));
    }
});
