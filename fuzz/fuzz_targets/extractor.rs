#![no_main]

use libfuzzer_sys::fuzz_target;
use url::Url;

use newsfeel::extractor::parse;
use newsfeel::fetcher::PageResponse;

fuzz_target!(|data: &[u8]| {
    let html = String::from_utf8_lossy(data).to_string();

    let response = PageResponse {
        url_final: Url::parse("https://example.com/berita").unwrap(),
        body_utf8: html,
    };

    // Must never panic regardless of input
    let _ = parse(&response);
});
