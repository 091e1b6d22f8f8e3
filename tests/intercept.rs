//! End-to-end interception tests: gateway, spies, logger and transport
//! working together the way an application wires them.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tapline::prelude::*;
use uuid::Uuid;

#[derive(Clone)]
struct TestHandle {
    inner: Arc<TestHandleInner>,
}

struct TestHandleInner {
    id: Uuid,
    latch: FinishLatch,
}

impl TestHandle {
    fn new() -> Self {
        Self {
            inner: Arc::new(TestHandleInner {
                id: Uuid::new_v4(),
                latch: FinishLatch::new(),
            }),
        }
    }

    fn finish(&self, info: FinishInfo) {
        self.inner.latch.finish(info);
    }
}

impl Connection for TestHandle {
    fn id(&self) -> Uuid {
        self.inner.id
    }

    fn on_finished(&self, observer: FinishObserver) {
        self.inner.latch.subscribe(observer);
    }
}

#[test]
fn spies_feed_the_logger_as_requests_flow() {
    let out = BufferSink::new();
    let logger = Logger::new(
        LoggerOptions::default().with_stdout(SinkSpec::Buffer(out.clone())),
    )
    .unwrap();

    let issued: Arc<Mutex<Vec<TestHandle>>> = Arc::new(Mutex::new(Vec::new()));
    let transport_issued = Arc::clone(&issued);
    let gateway = GatewayBuilder::new()
        .with_transport(Scheme::Https, move |_args| {
            let handle = TestHandle::new();
            transport_issued.lock().unwrap().push(handle.clone());
            Ok(handle)
        })
        .build();

    let request_logger = logger.clone();
    let close_logger = logger;
    attach_https_request_spy(
        &gateway,
        move |_handle, descriptor| {
            request_logger.info(format_args!(
                "request {} {}",
                descriptor.hostname.as_deref().unwrap_or("-"),
                descriptor.path.as_deref().unwrap_or("-"),
            ));
        },
        Some(Box::new(move |_handle: &TestHandle, info: &FinishInfo| {
            close_logger.info(format_args!("closed status={:?}", info.status));
        })),
    )
    .unwrap();

    gateway
        .request(Scheme::Https, "https://example.tld/somewhere?over=rainbow")
        .unwrap();
    issued.lock().unwrap()[0].finish(FinishInfo {
        status: Some(200),
        ..Default::default()
    });

    assert_eq!(
        out.lines(),
        vec![
            "request example.tld /somewhere?over=rainbow",
            "closed status=Some(200)",
        ]
    );
}

#[test]
fn settings_drive_the_logger_pipeline() {
    let log_path = std::env::temp_dir().join(format!("tapline-it-{}.log", Uuid::new_v4()));
    let settings_path = std::env::temp_dir().join(format!("tapline-it-{}.toml", Uuid::new_v4()));
    let toml = format!(
        "format = \"json\"\n\n[stdout]\nkind = \"file\"\npath = \"{}\"\n",
        log_path.display()
    );
    std::fs::write(&settings_path, toml).unwrap();

    let settings = load_settings(&settings_path).unwrap();
    let logger = Logger::new(settings.into_options().unwrap()).unwrap();
    logger.warn(format_args!("disk almost full"));

    let contents = std::fs::read_to_string(&log_path).unwrap();
    let line: serde_json::Value = serde_json::from_str(contents.trim_end()).unwrap();
    assert_eq!(line["level"], "warn");
    assert_eq!(line["message"], "disk almost full");

    std::fs::remove_file(&settings_path).unwrap();
    std::fs::remove_file(&log_path).unwrap();
}

#[tokio::test]
async fn reqwest_transport_round_trips_through_a_local_server() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/hello")
        .with_status(200)
        .with_body("ok")
        .create_async()
        .await;

    let transport =
        ReqwestTransport::new(Scheme::Http, tokio::runtime::Handle::current()).unwrap();
    let gateway = GatewayBuilder::new()
        .with_transport(Scheme::Http, transport.into_request_fn())
        .build();

    let descriptors: Arc<Mutex<Vec<RequestDescriptor>>> = Arc::new(Mutex::new(Vec::new()));
    let record = Arc::clone(&descriptors);
    let (done_tx, done_rx) = tokio::sync::oneshot::channel::<FinishInfo>();
    let done_tx = Arc::new(Mutex::new(Some(done_tx)));
    attach_http_request_spy(
        &gateway,
        move |_handle, descriptor| {
            record.lock().unwrap().push(descriptor.clone());
        },
        Some(Box::new(move |_handle: &ReqwestHandle, info: &FinishInfo| {
            if let Some(tx) = done_tx.lock().unwrap().take() {
                let _ = tx.send(info.clone());
            }
        })),
    )
    .unwrap();

    let url = format!("{}/hello", server.url());
    gateway.request(Scheme::Http, url.as_str()).unwrap();

    let info = tokio::time::timeout(Duration::from_secs(5), done_rx)
        .await
        .expect("close spy should fire within the timeout")
        .expect("close spy should send the completion summary");
    assert_eq!(info.status, Some(200));
    assert!(info.error.is_none());
    assert!(info.elapsed.is_some());

    mock.assert_async().await;

    let descriptors = descriptors.lock().unwrap();
    assert_eq!(descriptors.len(), 1);
    assert_eq!(descriptors[0].protocol.as_deref(), Some("http:"));
    assert_eq!(descriptors[0].path.as_deref(), Some("/hello"));
    assert_eq!(descriptors[0].method, None);
}

#[tokio::test]
async fn transport_reports_failures_through_the_close_spy() {
    // port 1 is reserved and closed; the connection is refused quickly
    let transport =
        ReqwestTransport::new(Scheme::Http, tokio::runtime::Handle::current()).unwrap();
    let gateway = GatewayBuilder::new()
        .with_transport(Scheme::Http, transport.into_request_fn())
        .build();

    let (done_tx, done_rx) = tokio::sync::oneshot::channel::<FinishInfo>();
    let done_tx = Arc::new(Mutex::new(Some(done_tx)));
    attach_http_request_spy(
        &gateway,
        |_handle, _descriptor| {},
        Some(Box::new(move |_handle: &ReqwestHandle, info: &FinishInfo| {
            if let Some(tx) = done_tx.lock().unwrap().take() {
                let _ = tx.send(info.clone());
            }
        })),
    )
    .unwrap();

    gateway
        .request(Scheme::Http, "http://127.0.0.1:1/unreachable")
        .unwrap();

    let info = tokio::time::timeout(Duration::from_secs(10), done_rx)
        .await
        .expect("close spy should fire within the timeout")
        .expect("close spy should send the completion summary");
    assert_eq!(info.status, None);
    assert!(info.error.is_some());
}
