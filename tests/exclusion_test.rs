//! Exclusion semantics exercised through the public extraction API.

mod common;

use std::sync::Arc;

use common::StubBrowser;
use crawlscout::{
    CandidateElementExtractor, CrawlElement, CrawlOptions, InMemoryCheckedElements, PageState,
    RuleSet, StaticFormInputProvider,
};
use url::Url;

fn page_state() -> PageState {
    PageState::new("index", Url::parse("https://example.com/app").unwrap())
}

fn extract(browser: StubBrowser, rules: RuleSet) -> Vec<crawlscout::CandidateElement> {
    common::init_tracing();
    let extractor = CandidateElementExtractor::new(
        browser,
        Arc::new(InMemoryCheckedElements::new()),
        StaticFormInputProvider::new(),
        rules,
        CrawlOptions::default(),
    );
    extractor.extract(&page_state()).unwrap()
}

#[test]
fn excluded_tag_never_produces_candidates() {
    let browser = StubBrowser::with_root(
        r#"<html><body><button id="x">no</button><a href="/y">yes</a></body></html>"#,
    );
    let rules = RuleSet::new(
        vec![CrawlElement::for_tag("button"), CrawlElement::for_tag("a")],
        vec![CrawlElement::for_tag("button")],
    );

    let candidates = extract(browser, rules);
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].element.tag, "A");
}

#[test]
fn descendants_of_excluded_ancestors_are_excluded() {
    // The anchors match no exclusion rule themselves; the excluded <nav>
    // ancestor must still suppress them.
    let browser = StubBrowser::with_root(
        r#"<html><body>
            <nav><div><a href="/nav1">n1</a><a href="/nav2">n2</a></div></nav>
            <main><a href="/keep">k</a></main>
        </body></html>"#,
    );
    let rules = RuleSet::new(
        vec![CrawlElement::for_tag("a")],
        vec![CrawlElement::for_tag("nav")],
    );

    let candidates = extract(browser, rules);
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].element.attribute("href"), Some("/keep"));
}

#[test]
fn exclusion_applies_inside_frames_too() {
    let browser = StubBrowser::with_root(
        r#"<html><body><iframe name="menu"></iframe></body></html>"#,
    )
    .frame(
        "menu",
        r#"<html><body><nav><a href="/m">m</a></nav><a href="/ok">ok</a></body></html>"#,
    );
    let rules = RuleSet::new(
        vec![CrawlElement::for_tag("a")],
        vec![CrawlElement::for_tag("nav")],
    );

    let candidates = extract(browser, rules);
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].element.attribute("href"), Some("/ok"));
    assert_eq!(candidates[0].frame_path, "menu");
}

#[test]
fn scoped_exclusion_only_applies_under_its_scope() {
    let browser = StubBrowser::with_root(
        r#"<html><body>
            <div id="sidebar"><span><a href="/side">s</a></span></div>
            <div id="content"><span><a href="/main">m</a></span></div>
        </body></html>"#,
    );
    let rules = RuleSet::new(
        vec![CrawlElement::for_tag("a")],
        vec![CrawlElement::for_tag("span").under("/html/body/div[1]")],
    );

    let candidates = extract(browser, rules);
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].element.attribute("href"), Some("/main"));
}

#[test]
fn malformed_exclusion_scope_fails_open() {
    let browser = StubBrowser::with_root(
        r#"<html><body><span><a href="/x">x</a></span></body></html>"#,
    );
    let rules = RuleSet::new(
        vec![CrawlElement::for_tag("a")],
        vec![CrawlElement::for_tag("span").under("][broken")],
    );

    // the unevaluable exclusion rule must not exclude anything
    let candidates = extract(browser, rules);
    assert_eq!(candidates.len(), 1);
}

#[test]
fn exclusion_tag_matching_is_case_insensitive() {
    let browser = StubBrowser::with_root(
        r#"<html><body><NAV><a href="/n">n</a></NAV></body></html>"#,
    );
    let rules = RuleSet::new(
        vec![CrawlElement::for_tag("a")],
        vec![CrawlElement::for_tag("NaV")],
    );

    assert!(extract(browser, rules).is_empty());
}
