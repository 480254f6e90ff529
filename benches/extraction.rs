//! Performance benchmarks for crawlscout.
//!
//! Run with: `cargo bench`

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use crawlscout::{
    BrowserChannel, BrowserError, CandidateElementExtractor, CrawlElement, CrawlOptions,
    InMemoryCheckedElements, PageState, RuleSet, StaticFormInputProvider,
};
use url::Url;

const SAMPLE_HTML: &str = r#"
<!DOCTYPE html>
<html lang="en">
<head><meta charset="UTF-8"><title>Sample App</title></head>
<body>
    <nav>
        <a href="/">Home</a>
        <a href="/about">About</a>
        <a href="/contact">Contact</a>
    </nav>
    <main>
        <a href="/items/1">Item 1</a>
        <a href="/items/2">Item 2</a>
        <a href="/items/3">Item 3</a>
        <button id="refresh">Refresh</button>
        <button id="load-more">Load more</button>
        <form><input name="search"><input type="submit" value="Go"></form>
    </main>
    <footer><a href="manual.pdf">Manual</a><a href="mailto:x@y.com">Mail</a></footer>
</body>
</html>
"#;

struct StaticBrowser;

impl BrowserChannel for StaticBrowser {
    fn root_document_bytes(&self) -> Result<Vec<u8>, BrowserError> {
        Ok(SAMPLE_HTML.as_bytes().to_vec())
    }

    fn frame_document_bytes(&self, frame_path: &str) -> Result<Vec<u8>, BrowserError> {
        Err(BrowserError::MissingFrame(frame_path.to_string()))
    }
}

fn bench_extract(c: &mut Criterion) {
    let rules = RuleSet::new(
        vec![
            CrawlElement::for_tag("a"),
            CrawlElement::for_tag("button"),
            CrawlElement::for_tag("input"),
        ],
        vec![CrawlElement::for_tag("nav")],
    );
    let state = PageState::new(
        "bench",
        Url::parse("https://example.com/").expect("valid url"),
    );

    c.bench_function("extract_candidates", |b| {
        b.iter(|| {
            // fresh registry each iteration so dedup never empties the result
            let extractor = CandidateElementExtractor::new(
                StaticBrowser,
                Arc::new(InMemoryCheckedElements::new()),
                StaticFormInputProvider::new(),
                rules.clone(),
                CrawlOptions::default(),
            );
            black_box(extractor.extract(black_box(&state)))
        });
    });
}

criterion_group!(benches, bench_extract);
criterion_main!(benches);
