#![no_main]

use libfuzzer_sys::fuzz_target;

use newsfeel::search::feed::parse_feed;

fuzz_target!(|data: &[u8]| {
    let xml = String::from_utf8_lossy(data);
    if let Ok(candidates) = parse_feed(&xml, 100) {
        assert!(candidates.len() <= 100);
        assert!(candidates.iter().all(|c| !c.url.is_empty()));
    }
});
