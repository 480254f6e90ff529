//! Concurrency contracts: shared registry dedup across workers and the
//! browser pool's blocking/idempotence guarantees.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::StubBrowser;
use crawlscout::{
    BrowserPool, CandidateElementExtractor, CheckedElements, CrawlElement, CrawlOptions, Error,
    InMemoryCheckedElements, PageState, RuleSet, StaticFormInputProvider,
};
use url::Url;

fn page_state() -> PageState {
    common::init_tracing();
    PageState::new("index", Url::parse("https://example.com/app").unwrap())
}

const ROOT: &str = r#"<html><body>
    <a href="/one">1</a>
    <a href="/two">2</a>
    <a href="/three">3</a>
    <button>b</button>
</body></html>"#;

#[test]
fn concurrent_workers_share_at_most_once_visitation() {
    let registry = Arc::new(InMemoryCheckedElements::new());

    let workers: Vec<_> = (0..4)
        .map(|_| {
            let registry = Arc::clone(&registry);
            std::thread::spawn(move || {
                // each worker drives its own browser session
                let extractor = CandidateElementExtractor::new(
                    StubBrowser::with_root(ROOT),
                    registry,
                    StaticFormInputProvider::new(),
                    RuleSet::new(
                        vec![CrawlElement::for_tag("a"), CrawlElement::for_tag("button")],
                        vec![],
                    ),
                    CrawlOptions::default(),
                );
                extractor.extract(&page_state()).unwrap().len()
            })
        })
        .collect();

    let total: usize = workers
        .into_iter()
        .map(|w| w.join().expect("worker panicked"))
        .sum();

    // 4 distinct fingerprints exist; each must be emitted exactly once
    // across all racing workers.
    assert_eq!(total, 4);
    assert_eq!(registry.checked_count(), 4);
}

#[test]
fn racing_marks_on_one_fingerprint_have_a_single_winner() {
    let registry = Arc::new(InMemoryCheckedElements::new());
    let candidate = {
        let extractor = CandidateElementExtractor::new(
            StubBrowser::with_root(r#"<html><body><a href="/only">x</a></body></html>"#),
            Arc::new(InMemoryCheckedElements::new()),
            StaticFormInputProvider::new(),
            RuleSet::new(vec![CrawlElement::for_tag("a")], vec![]),
            CrawlOptions::default(),
        );
        extractor.extract(&page_state()).unwrap().remove(0)
    };

    let marks: Vec<_> = (0..8)
        .map(|_| {
            let registry = Arc::clone(&registry);
            let candidate = candidate.clone();
            std::thread::spawn(move || registry.mark_checked(&candidate))
        })
        .collect();

    let wins = marks
        .into_iter()
        .map(|m| m.join().expect("marker panicked"))
        .filter(|won| *won)
        .count();
    assert_eq!(wins, 1);
}

#[test]
fn pool_request_then_close() {
    let pool = BrowserPool::new(1, || StubBrowser::with_root(ROOT));
    let _session = pool.acquire().unwrap();
    pool.close();
}

#[test]
fn pool_request_release_close() {
    let pool = BrowserPool::new(1, || StubBrowser::with_root(ROOT));
    let session = pool.acquire().unwrap();
    pool.release(session);
    pool.close();
}

#[test]
fn pool_double_close_after_request() {
    let pool = BrowserPool::new(1, || StubBrowser::with_root(ROOT));
    let _session = pool.acquire().unwrap();
    pool.close();
    pool.close();
}

#[test]
fn pool_close_only_and_twice() {
    let pool = BrowserPool::new(1, || StubBrowser::with_root(ROOT));
    pool.close();
    pool.close();
    assert!(matches!(pool.acquire(), Err(Error::PoolClosed)));
}

#[test]
fn pool_bounds_sessions_and_unblocks_waiters() {
    let pool = Arc::new(BrowserPool::new(3, || StubBrowser::with_root(ROOT)));
    let a = pool.acquire().unwrap();
    let b = pool.acquire().unwrap();
    let c = pool.acquire().unwrap();

    let waiter = {
        let pool = Arc::clone(&pool);
        std::thread::spawn(move || pool.acquire().is_ok())
    };
    std::thread::sleep(Duration::from_millis(50));
    pool.release(a);
    assert!(waiter.join().expect("waiter panicked"));

    pool.release(b);
    pool.release(c);
    pool.close();
}

#[test]
fn pooled_sessions_drive_extraction() {
    let registry: Arc<InMemoryCheckedElements> = Arc::new(InMemoryCheckedElements::new());
    let pool = Arc::new(BrowserPool::new(2, || StubBrowser::with_root(ROOT)));

    let workers: Vec<_> = (0..2)
        .map(|_| {
            let registry = Arc::clone(&registry);
            let pool = Arc::clone(&pool);
            std::thread::spawn(move || {
                let session = pool.acquire().unwrap();
                let extractor = CandidateElementExtractor::new(
                    session.clone(),
                    registry,
                    StaticFormInputProvider::new(),
                    RuleSet::new(vec![CrawlElement::for_tag("a")], vec![]),
                    CrawlOptions::default(),
                );
                let count = extractor.extract(&page_state()).unwrap().len();
                pool.release(session);
                count
            })
        })
        .collect();

    let total: usize = workers
        .into_iter()
        .map(|w| w.join().expect("worker panicked"))
        .sum();
    assert_eq!(total, 3);
    pool.close();
}
