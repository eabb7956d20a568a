//! Integration tests for promise-bound toasts

use anyhow::anyhow;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::{sleep, timeout};
use toaster::{Content, PromiseMessages, Snapshot, ToastKind, ToastOptions, Toaster, ToasterConfig};

fn toaster() -> Toaster {
    Toaster::new(ToasterConfig::default()).unwrap()
}

/// (kind, text) of every visible toast, per published snapshot
type History = Arc<Mutex<Vec<Vec<(ToastKind, String)>>>>;

fn record(snapshot: &Snapshot) -> Vec<(ToastKind, String)> {
    snapshot
        .visible
        .iter()
        .map(|t| (t.kind, t.content.plain_text().to_string()))
        .collect()
}

#[tokio::test(start_paused = true)]
async fn test_success_replaces_loading_toast() {
    let toaster = toaster();
    let history: History = Arc::default();
    let _subscription = {
        let history = Arc::clone(&history);
        toaster.subscribe(move |s| history.lock().unwrap().push(record(s)))
    };

    let result = toaster
        .bind_promise(
            async {
                sleep(Duration::from_millis(100)).await;
                Ok::<_, anyhow::Error>("done")
            },
            PromiseMessages::new().loading("Saving...").success("Saved!"),
        )
        .await;

    assert_eq!(result.unwrap(), "done");

    let snapshot = toaster.snapshot().await.unwrap();
    assert_eq!(record(&snapshot), vec![(ToastKind::Success, "Saved!".to_string())]);

    let history = history.lock().unwrap();
    let loading = (ToastKind::Loading, "Saving...".to_string());
    let success = (ToastKind::Success, "Saved!".to_string());
    let last_loading = history.iter().rposition(|s| s.contains(&loading)).unwrap();
    let first_success = history.iter().position(|s| s.contains(&success)).unwrap();
    assert!(last_loading < first_success);
    assert!(history.iter().all(|s| !(s.contains(&loading) && s.contains(&success))));
}

#[tokio::test(start_paused = true)]
async fn test_success_text_from_result() {
    let toaster = toaster();

    let result = toaster
        .bind_promise(
            async { Ok::<u32, anyhow::Error>(3) },
            PromiseMessages::new().success_with(|n: &u32| format!("Uploaded {n} files")),
        )
        .await;

    assert_eq!(result.unwrap(), 3);
    let snapshot = toaster.snapshot().await.unwrap();
    assert_eq!(
        snapshot.visible[0].content,
        Content::from("Uploaded 3 files")
    );
}

#[tokio::test(start_paused = true)]
async fn test_failure_shows_error_and_propagates() {
    let toaster = toaster();

    let result: Result<(), anyhow::Error> = toaster
        .bind_promise(
            async {
                sleep(Duration::from_millis(50)).await;
                Err(anyhow!("disk full"))
            },
            PromiseMessages::new().error_with(|e: &anyhow::Error| format!("Failed: {e}")),
        )
        .await;

    assert_eq!(result.unwrap_err().to_string(), "disk full");

    let snapshot = toaster.snapshot().await.unwrap();
    assert_eq!(
        record(&snapshot),
        vec![(ToastKind::Error, "Failed: disk full".to_string())]
    );
}

#[tokio::test(start_paused = true)]
async fn test_default_texts_are_used() {
    let toaster = toaster();

    let result: Result<(), &str> = toaster
        .bind_promise(async { Err("nope") }, PromiseMessages::default())
        .await;

    assert!(result.is_err());
    let snapshot = toaster.snapshot().await.unwrap();
    assert_eq!(
        record(&snapshot),
        vec![(ToastKind::Error, "Something went wrong!".to_string())]
    );
}

#[tokio::test(start_paused = true)]
async fn test_other_requests_run_while_pending() {
    let toaster = toaster();

    let (result, during) = tokio::join!(
        toaster.bind_promise(
            async {
                sleep(Duration::from_millis(500)).await;
                Ok::<_, anyhow::Error>(())
            },
            PromiseMessages::new(),
        ),
        async {
            sleep(Duration::from_millis(100)).await;
            toaster.info("meanwhile", ToastOptions::new().persistent());
            toaster.snapshot().await.unwrap()
        }
    );

    assert!(result.is_ok());
    assert_eq!(
        record(&during),
        vec![
            (ToastKind::Loading, "Loading...".to_string()),
            (ToastKind::Info, "meanwhile".to_string()),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_loading_toast_waits_for_slow_work() {
    let toaster = toaster();

    let (result, during) = tokio::join!(
        toaster.bind_promise(
            async {
                // Far past the default duration
                sleep(Duration::from_secs(30)).await;
                Ok::<_, anyhow::Error>(())
            },
            PromiseMessages::new(),
        ),
        async {
            sleep(Duration::from_secs(20)).await;
            toaster.snapshot().await.unwrap()
        }
    );

    assert!(result.is_ok());
    assert_eq!(during.visible.len(), 1);
    assert!(during.visible[0].is_loading);

    // The outcome toast uses the default duration
    sleep(Duration::from_millis(3010)).await;
    assert!(toaster.snapshot().await.unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_options_apply_to_outcome_toast() {
    let toaster = toaster();

    toaster
        .bind_promise(
            async { Ok::<_, anyhow::Error>(()) },
            PromiseMessages::new().options(ToastOptions::new().persistent()),
        )
        .await
        .unwrap();

    sleep(Duration::from_secs(60)).await;
    let snapshot = toaster.snapshot().await.unwrap();
    assert_eq!(snapshot.visible.len(), 1);
    assert_eq!(snapshot.visible[0].kind, ToastKind::Success);
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_binding_removes_loading_toast() {
    let toaster = toaster();

    let cancelled = timeout(
        Duration::from_millis(100),
        toaster.bind_promise(
            async {
                sleep(Duration::from_secs(10)).await;
                Ok::<_, anyhow::Error>(())
            },
            PromiseMessages::new(),
        ),
    )
    .await;
    assert!(cancelled.is_err());

    let snapshot = toaster.snapshot().await.unwrap();
    assert!(snapshot.is_empty(), "loading toast left behind: {:?}", snapshot.visible);

    // No outcome toast shows up later either
    sleep(Duration::from_secs(3600)).await;
    assert!(toaster.snapshot().await.unwrap().is_empty());
}
