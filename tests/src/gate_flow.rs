//! End-to-end gate runs against a scripted local HTTP listener.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{Duration, Instant};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use gatr_common::error::GateError;
use gatr_common::target::ProbeTarget;
use gatr_core::gate::Gate;
use gatr_core::probe::HttpProbe;
use gatr_core::retry::{Backoff, BackoffKind};

const NOT_READY: &str = "HTTP/1.1 503 Service Unavailable\r\nContent-Length: 0\r\nConnection: close\r\n\r\n";
const READY: &str = "HTTP/1.1 200 OK\r\nContent-Length: 0\r\nConnection: close\r\n\r\n";

/// Serves 503 for the first `failures` requests, then 200 forever.
///
/// Returns the bound address and a counter of requests actually served.
async fn flaky_server(failures: u32) -> (SocketAddr, Arc<AtomicU32>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(AtomicU32::new(0));

    let counter = hits.clone();
    tokio::spawn(async move {
        loop {
            let Ok((mut stream, _)) = listener.accept().await else {
                break;
            };
            let served = counter.fetch_add(1, Ordering::SeqCst) + 1;

            let mut buf = [0u8; 1024];
            let _ = stream.read(&mut buf).await;

            let response = if served <= failures { NOT_READY } else { READY };
            let _ = stream.write_all(response.as_bytes()).await;
        }
    });

    (addr, hits)
}

fn gate_for(addr: SocketAddr, interval: Duration) -> Gate<HttpProbe> {
    let target = ProbeTarget::new(addr.ip().to_string(), addr.port(), "/health");
    let probe = HttpProbe::new(&target, Duration::from_secs(1)).unwrap();
    Gate::new(probe, Backoff::new(BackoffKind::Fixed, interval))
}

#[tokio::test]
async fn gate_waits_out_unhealthy_responses() {
    let (addr, hits) = flaky_server(3).await;

    let report = gate_for(addr, Duration::from_millis(20)).wait().await.unwrap();

    assert_eq!(report.attempts, 4);
    assert_eq!(hits.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn gate_passes_immediately_when_healthy() {
    let (addr, hits) = flaky_server(0).await;

    let report = gate_for(addr, Duration::from_millis(20)).wait().await.unwrap();

    assert_eq!(report.attempts, 1);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn retries_are_spaced_by_at_least_the_interval() {
    let (addr, _) = flaky_server(2).await;
    let interval = Duration::from_millis(50);

    let start = Instant::now();
    let report = gate_for(addr, interval).wait().await.unwrap();

    assert_eq!(report.attempts, 3);
    // Two sleeps happened before the successful attempt.
    assert!(start.elapsed() >= interval * 2);
}

#[tokio::test]
async fn max_wait_gives_up_on_a_dependency_that_never_recovers() {
    let (addr, _) = flaky_server(u32::MAX).await;

    let err = gate_for(addr, Duration::from_millis(20))
        .with_max_wait(Some(Duration::from_millis(150)))
        .wait()
        .await
        .unwrap_err();

    assert!(matches!(err, GateError::ProbeTimeout { .. }));
}

#[tokio::test]
async fn connection_refused_is_retried_like_an_unhealthy_status() {
    // Bind to learn a free port, then drop the listener so the first probes
    // get connection refused; re-bind as healthy afterwards.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let handle = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(120)).await;
        let listener = TcpListener::bind(addr).await.unwrap();
        loop {
            let Ok((mut stream, _)) = listener.accept().await else {
                break;
            };
            let mut buf = [0u8; 1024];
            let _ = stream.read(&mut buf).await;
            let _ = stream.write_all(READY.as_bytes()).await;
        }
    });

    let report = gate_for(addr, Duration::from_millis(40)).wait().await.unwrap();

    assert!(report.attempts >= 2, "expected refused probes before readiness");
    handle.abort();
}
