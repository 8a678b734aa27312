//! End-to-end runs over the public API with scripted connectors.

use std::sync::Arc;
use std::time::Duration;

use wsflood::engine::Engine;
use wsflood::target;
use wsflood::testkit::connector::{Outcome, ScriptedConnector};

use std::io::Write;

const THROTTLE: Duration = Duration::from_millis(1);
const SETTLE: Duration = Duration::from_millis(300);

#[tokio::test]
async fn target_file_feeds_one_worker_per_slot() {
    let mut file = tempfile::NamedTempFile::new().expect("create temp file");
    file.write_all(b"# load test matrix\nwss://one.example.com cookie=user=123\nwss://two.example.com\n")
        .expect("write temp file");
    let targets = target::from_file(file.path()).expect("parse targets");

    let connector = Arc::new(ScriptedConnector::always(Outcome::Hold));
    let engine = Arc::new(Engine::new(connector.clone()));
    let run = tokio::spawn({
        let engine = engine.clone();
        async move { engine.run(targets, 2, THROTTLE).await }
    });

    tokio::time::sleep(SETTLE).await;
    assert_eq!(connector.connect_attempts(), 4);
    assert_eq!(engine.stats().snapshot().active_connections, 4);
    run.abort();
}

#[tokio::test]
async fn unreachable_target_retries_forever_without_opening_anything() {
    let connector = Arc::new(ScriptedConnector::always(Outcome::Fail));
    let engine = Arc::new(Engine::new(connector.clone()));
    let run = tokio::spawn({
        let engine = engine.clone();
        async move {
            engine
                .run(vec![wsflood::testkit::target("wss://down.example.com")], 3, THROTTLE)
                .await
        }
    });

    tokio::time::sleep(SETTLE).await;
    let first = engine.stats().snapshot();
    tokio::time::sleep(SETTLE).await;
    let second = engine.stats().snapshot();
    run.abort();

    assert!(first.errors > 0);
    assert!(second.errors > first.errors);
    assert_eq!(second.active_connections, 0);
}
