//! Log levels emitted by the search core.
//!
//! Proves:
//! 1. A cancelled search logs nothing at `warn` or above: a cutoff is an
//!    ordinary outcome
//! 2. The cancellation is still visible at `info`

use std::io::Write;
use std::sync::{Arc, Mutex};

use plumb_harness::worlds::linear_chain::LinearChain;
use plumb_kernel::cancel::{Cancellable, CancellationToken};
use plumb_search::depth_limited::DepthLimitedSearch;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Run a pre-cancelled search with a thread-local subscriber at `level`
/// and return everything it logged.
fn cancelled_search_logs(level: LevelFilter) -> String {
    let captured = Captured::default();
    let sink = captured.clone();
    let _guard = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_writer(move || sink.clone())
        .finish()
        .set_default();

    let token = CancellationToken::new();
    token.cancel();
    let mut search = DepthLimitedSearch::new(10).with_cancellation(token);
    assert!(search.find_node(&LinearChain::new(4)).is_cutoff());

    let bytes = captured.0.lock().unwrap().clone();
    String::from_utf8(bytes).unwrap()
}

#[test]
fn cancellation_is_not_a_warning() {
    let logged = cancelled_search_logs(LevelFilter::WARN);
    assert!(logged.is_empty(), "unexpected warn output: {logged}");
}

#[test]
fn cancellation_is_logged_at_info() {
    let logged = cancelled_search_logs(LevelFilter::INFO);
    assert!(logged.contains("depth-limited search cancelled"), "{logged}");
    assert!(logged.contains("INFO"), "{logged}");
}
