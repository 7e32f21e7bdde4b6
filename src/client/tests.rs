use super::*;
use crate::execution::interceptor::interceptor_fn;
use crate::execution::middleware::middleware_fn;
use crate::execution::middleware::presets::NGROK_SKIP_BROWSER_WARNING;
use crate::types::{FetchBody, HeaderMapping, HttpMethod, ResponseConfig, ResponseData};
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Clone)]
struct Call {
    url: String,
    request: TransportRequest,
}

/// Replays queued responses and records every call.
#[derive(Default)]
struct RecordingTransport {
    responses: Mutex<VecDeque<Result<RawResponse, FetchError>>>,
    calls: Mutex<Vec<Call>>,
}

impl RecordingTransport {
    fn replying(status: u16, body: &'static str) -> Arc<Self> {
        let transport = Arc::new(Self::default());
        transport.push(Ok(raw(status, body)));
        transport
    }

    fn push(&self, response: Result<RawResponse, FetchError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpTransport for RecordingTransport {
    async fn send(&self, url: &str, request: TransportRequest) -> Result<RawResponse, FetchError> {
        self.calls.lock().unwrap().push(Call {
            url: url.to_string(),
            request,
        });
        let next = self.responses.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(raw(200, "{}")))
    }
}

/// Never completes and ignores its signal; only the pipeline's own race can
/// end the call.
#[derive(Default)]
struct HangingTransport {
    signal: Mutex<Option<CancelHandle>>,
}

#[async_trait]
impl HttpTransport for HangingTransport {
    async fn send(&self, _url: &str, request: TransportRequest) -> Result<RawResponse, FetchError> {
        *self.signal.lock().unwrap() = Some(request.signal.clone());
        std::future::pending::<Result<RawResponse, FetchError>>().await
    }
}

fn raw(status: u16, body: &'static str) -> RawResponse {
    RawResponse::new(status, "http://test.local/", HeaderMap::new(), body)
}

fn client(base_url: &str, transport: Arc<RecordingTransport>) -> Fetch {
    Fetch::with_transport(FetchConfig::new(base_url), transport)
}

fn counting_middleware(counter: Arc<AtomicUsize>, log: Arc<Mutex<Vec<usize>>>, id: usize) -> impl FetchMiddleware {
    middleware_fn(move |req: FetchRequest| {
        let counter = counter.clone();
        let log = log.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            log.lock().unwrap().push(id);
            Ok::<_, FetchError>(req)
        }
    })
}

#[tokio::test]
async fn middlewares_run_once_each_in_registration_order() {
    let transport = Arc::new(RecordingTransport::default());
    let mut api = client("https://api.test", transport.clone());
    let counter = Arc::new(AtomicUsize::new(0));
    let log = Arc::new(Mutex::new(Vec::new()));
    for id in 0..4 {
        api.add_middleware(counting_middleware(counter.clone(), log.clone(), id));
    }

    api.get("/users", None, None).await.unwrap();

    assert_eq!(counter.load(Ordering::SeqCst), 4);
    assert_eq!(*log.lock().unwrap(), vec![0, 1, 2, 3]);

    api.clear_middlewares();
    assert_eq!(api.middleware_count(), 0);
    api.get("/users", None, None).await.unwrap();
    assert_eq!(counter.load(Ordering::SeqCst), 4);
    assert_eq!(transport.calls().len(), 2);
}

#[tokio::test]
async fn duplicate_registrations_each_run() {
    let transport = Arc::new(RecordingTransport::default());
    let mut api = client("", transport.clone());
    api.set_headers([("x-a", "1")]).set_headers([("x-a", "1")]);
    assert_eq!(api.middleware_count(), 2);
    api.get("http://h.test", None, None).await.unwrap();
    assert_eq!(transport.calls()[0].request.headers.as_ref().unwrap()["x-a"], "1");
}

#[tokio::test]
async fn failing_middleware_prevents_transport_call() {
    let transport = Arc::new(RecordingTransport::default());
    let mut api = client("https://api.test", transport.clone());
    let seen = Arc::new(AtomicUsize::new(0));
    let seen_in_interceptor = seen.clone();
    api.add_middleware(middleware_fn(|_req: FetchRequest| async {
        Err::<FetchRequest, _>(FetchError::middleware("no token"))
    }));
    api.add_interceptor(interceptor_fn(move |res: FetchResponse| {
        let seen = seen_in_interceptor.clone();
        async move {
            assert!(!res.is_success);
            assert!(res.data.is_none());
            assert!(res.response.is_none());
            seen.fetch_add(1, Ordering::SeqCst);
            Ok::<_, FetchError>(res)
        }
    }));

    let failure = api.get("/me", None, None).await.unwrap_err();

    assert!(transport.calls().is_empty());
    assert!(!failure.is_aborted());
    assert!(!failure.is_success());
    assert_eq!(failure.error(), Some(&FetchError::Middleware("no token".into())));
    assert_eq!(seen.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn no_content_resolves_with_callable_abort() {
    let transport = RecordingTransport::replying(204, "");
    let api = client("https://api.test", transport);

    let ok = api
        .delete("/items/1", None, Some(ResponseConfig::text()))
        .await
        .unwrap();

    assert!(ok.envelope.is_success);
    assert_eq!(ok.status(), 204);
    assert_eq!(ok.data(), Some(&ResponseData::Text(String::new())));
    ok.abort.cancel();
    assert!(ok.abort.is_cancelled());
}

#[tokio::test]
async fn not_found_rejects_with_status() {
    let transport = RecordingTransport::replying(404, r#"{"error":"missing"}"#);
    let mut api = client("https://api.test", transport);
    api.add_interceptor(interceptor_fn(|mut res: FetchResponse| async move {
        res.data = res
            .data
            .and_then(|d| d.as_json().and_then(|v| v.get("error").cloned()))
            .map(ResponseData::Json);
        Ok::<_, FetchError>(res)
    }));

    let failure = api.get("/missing", None, None).await.unwrap_err();

    assert_eq!(failure.status(), Some(404));
    assert!(!failure.is_success());
    assert!(!failure.is_aborted());
    assert_eq!(failure.response().map(|r| r.status), Some(404));
    assert_eq!(
        failure.envelope().data,
        Some(ResponseData::Json(serde_json::json!("missing")))
    );
}

#[tokio::test]
async fn abort_before_transport_settles_reports_is_aborted() {
    let transport = Arc::new(HangingTransport::default());
    let mut api = Fetch::with_transport(FetchConfig::default(), transport.clone());
    let failure_envelopes = Arc::new(AtomicUsize::new(0));
    let counter = failure_envelopes.clone();
    api.add_interceptor(interceptor_fn(move |res: FetchResponse| {
        let counter = counter.clone();
        async move {
            if !res.is_success {
                counter.fetch_add(1, Ordering::SeqCst);
            }
            Ok::<_, FetchError>(res)
        }
    }));

    let handle = CancelHandle::new();
    let spec = RequestSpec::new(HttpMethod::Get, "http://slow.test/");
    let (result, ()) = tokio::join!(api.request_with_cancel(spec, handle.clone()), async {
        tokio::task::yield_now().await;
        handle.cancel();
    });

    let failure = result.unwrap_err();
    assert!(failure.is_aborted());
    assert_eq!(failure.error(), Some(&FetchError::Aborted));
    assert!(failure.response().is_none());
    assert_eq!(failure_envelopes.load(Ordering::SeqCst), 1);
    let signal = transport.signal.lock().unwrap().clone().expect("transport was invoked");
    assert!(signal.is_cancelled());
}

#[tokio::test]
async fn concurrent_requests_have_independent_handles() {
    let transport = Arc::new(HangingTransport::default());
    let api = Fetch::with_transport(FetchConfig::default(), transport);
    let first = CancelHandle::new();
    let second = CancelHandle::new();

    let (a, b, ()) = tokio::join!(
        api.request_with_cancel(RequestSpec::new(HttpMethod::Get, "http://a.test"), first.clone()),
        tokio::time::timeout(
            std::time::Duration::from_millis(50),
            api.request_with_cancel(RequestSpec::new(HttpMethod::Get, "http://b.test"), second.clone()),
        ),
        async {
            tokio::task::yield_now().await;
            first.cancel();
        },
    );

    assert!(a.unwrap_err().is_aborted());
    assert!(b.is_err(), "second request must still be pending");
    assert!(!second.is_cancelled());
}

#[tokio::test]
async fn body_is_dropped_for_get_and_delete() {
    let transport = Arc::new(RecordingTransport::default());
    let api = client("https://api.test", transport.clone());

    for method in [HttpMethod::Get, HttpMethod::Delete, HttpMethod::Post] {
        let spec = RequestSpec::new(method, "/x").with_body("payload");
        api.request(spec).await.unwrap();
    }

    let calls = transport.calls();
    assert!(calls[0].request.body.is_none());
    assert!(calls[1].request.body.is_none());
    assert_eq!(calls[2].request.body, Some(FetchBody::Text("payload".into())));
}

#[tokio::test]
async fn verbs_issue_their_methods() {
    let transport = Arc::new(RecordingTransport::default());
    let api = client("https://api.test/", transport.clone());

    api.get("/a", None, None).await.unwrap();
    api.post("/a", Some("p".into()), None, None).await.unwrap();
    api.put("/a", Some("p".into()), None, None).await.unwrap();
    api.patch("/a", Some("p".into()), None, None).await.unwrap();
    api.delete("/a", None, None).await.unwrap();

    let methods: Vec<HttpMethod> = transport.calls().iter().map(|c| c.request.method).collect();
    assert_eq!(
        methods,
        vec![
            HttpMethod::Get,
            HttpMethod::Post,
            HttpMethod::Put,
            HttpMethod::Patch,
            HttpMethod::Delete
        ]
    );
    assert!(transport.calls().iter().all(|c| c.url == "https://api.test/a"));
}

#[tokio::test]
async fn legacy_flag_sends_delete_as_get() {
    let transport = Arc::new(RecordingTransport::default());
    let config = FetchConfig::builder()
        .base_url("https://api.test")
        .legacy_delete_as_get(true)
        .build();
    let api = Fetch::with_transport(config, transport.clone());

    api.delete("/a", None, None).await.unwrap();

    assert_eq!(transport.calls()[0].request.method, HttpMethod::Get);
}

#[tokio::test]
async fn absolute_url_ignores_base_url() {
    let transport = Arc::new(RecordingTransport::default());
    let api = client("/test", transport.clone());

    api.get("https://hello.com/", None, None).await.unwrap();

    assert_eq!(transport.calls()[0].url, "https://hello.com");
}

#[tokio::test]
async fn set_headers_and_bypass_append_after_existing_middlewares() {
    let transport = Arc::new(RecordingTransport::default());
    let mut api = client("https://api.test", transport.clone());
    api.add_middleware(middleware_fn(|req: FetchRequest| async move {
        Ok::<_, FetchError>(req.with_header("authorization", "from-first"))
    }));
    api.set_headers([("authorization", "from-set-headers"), ("x-app", "demo")]);
    api.bypass_ngrok_security();
    assert_eq!(api.middleware_count(), 3);

    let mut per_request = HeaderMapping::new();
    per_request.insert("x-app".into(), "per-request".into());
    per_request.insert("accept".into(), "application/json".into());
    api.get("/h", Some(per_request), None).await.unwrap();

    let headers = transport.calls()[0].request.headers.clone().unwrap();
    assert_eq!(headers["authorization"], "from-set-headers");
    assert_eq!(headers["x-app"], "demo");
    assert_eq!(headers["accept"], "application/json");
    assert_eq!(headers[NGROK_SKIP_BROWSER_WARNING], "any");
}

#[tokio::test]
async fn set_headers_replaces_case_variant_per_request_header() {
    let transport = Arc::new(RecordingTransport::default());
    let mut api = client("https://api.test", transport.clone());
    api.set_headers([("authorization", "new")]);

    let mut per_request = HeaderMapping::new();
    per_request.insert("Authorization".into(), "old".into());
    api.get("/h", Some(per_request), None).await.unwrap();

    let headers = transport.calls()[0].request.headers.clone().unwrap();
    assert_eq!(headers.len(), 1);
    let wire = crate::execution::http::build_header_map(&headers).unwrap();
    assert_eq!(wire.get_all("authorization").iter().count(), 1);
    assert_eq!(wire.get("authorization").unwrap(), "new");
}

#[tokio::test]
async fn headers_absent_when_not_provided() {
    let transport = Arc::new(RecordingTransport::default());
    let api = client("https://api.test", transport.clone());
    api.get("/h", None, None).await.unwrap();
    assert!(transport.calls()[0].request.headers.is_none());
}

#[tokio::test]
async fn decode_failure_keeps_raw_response() {
    let transport = RecordingTransport::replying(200, "<html>");
    let api = client("https://api.test", transport);

    let failure = api.get("/page", None, None).await.unwrap_err();

    assert!(!failure.is_aborted());
    assert!(matches!(
        failure.error(),
        Some(FetchError::Decode {
            response_type: crate::types::ResponseType::Json,
            ..
        })
    ));
    assert_eq!(failure.response().map(|r| r.status), Some(200));
    assert_eq!(failure.status(), None);
}

#[tokio::test]
async fn response_type_selects_decoder() {
    let transport = Arc::new(RecordingTransport::default());
    transport.push(Ok(raw(200, "plain")));
    transport.push(Ok(raw(200, "bytes")));
    transport.push(Ok(raw(200, r#"[1,2]"#)));
    let api = client("https://api.test", transport);

    let text = api.get("/t", None, Some(ResponseConfig::text())).await.unwrap();
    assert_eq!(text.data().and_then(|d| d.as_text()), Some("plain"));

    let blob = api.get("/b", None, Some(ResponseConfig::blob())).await.unwrap();
    assert_eq!(
        blob.data().and_then(|d| d.as_bytes()).map(|b| b.to_vec()),
        Some(b"bytes".to_vec())
    );

    let json = api.get("/j", None, None).await.unwrap();
    assert_eq!(json.data(), Some(&ResponseData::Json(serde_json::json!([1, 2]))));
}

#[tokio::test]
async fn transport_error_is_not_aborted() {
    let transport = Arc::new(RecordingTransport::default());
    transport.push(Err(FetchError::Transport("connection reset".into())));
    let api = client("https://api.test", transport);

    let failure = api.get("/x", None, None).await.unwrap_err();

    assert!(!failure.is_aborted());
    assert!(failure.response().is_none());
    assert_eq!(
        failure.error(),
        Some(&FetchError::Transport("connection reset".into()))
    );
}

#[tokio::test]
async fn interceptor_error_after_transport_keeps_raw_response() {
    let transport = RecordingTransport::replying(200, "{}");
    let mut api = client("https://api.test", transport);
    api.add_interceptor(interceptor_fn(|res: FetchResponse| async move {
        if res.is_success {
            Err(FetchError::interceptor("rejecting success"))
        } else {
            Ok(res)
        }
    }));

    let failure = api.get("/x", None, None).await.unwrap_err();

    assert_eq!(
        failure.error(),
        Some(&FetchError::Interceptor("rejecting success".into()))
    );
    assert_eq!(failure.response().map(|r| r.status), Some(200));
    assert!(!failure.envelope().is_success);
}

#[tokio::test]
async fn failing_interceptor_on_error_path_keeps_first_fault() {
    let transport = Arc::new(RecordingTransport::default());
    transport.push(Err(FetchError::Transport("connection reset".into())));
    let mut api = client("https://api.test", transport);
    api.add_interceptor(interceptor_fn(|_res: FetchResponse| async {
        Err::<FetchResponse, _>(FetchError::interceptor("always fails"))
    }));

    let failure = api.get("/x", None, None).await.unwrap_err();

    assert_eq!(
        failure.error(),
        Some(&FetchError::Transport("connection reset".into()))
    );
    assert!(!failure.envelope().is_success);
    assert!(failure.envelope().data.is_none());
    assert!(failure.response().is_none());
}

#[tokio::test]
async fn interceptor_cannot_flip_classification() {
    let transport = RecordingTransport::replying(500, "{}");
    let mut api = client("https://api.test", transport);
    api.add_interceptor(interceptor_fn(|mut res: FetchResponse| async move {
        res.is_success = true;
        Ok::<_, FetchError>(res)
    }));

    let failure = api.get("/x", None, None).await.unwrap_err();

    assert_eq!(failure.status(), Some(500));
    assert!(!failure.is_success());
}

#[tokio::test]
async fn interceptor_output_reaches_caller() {
    let transport = RecordingTransport::replying(200, r#"{"n":1}"#);
    let mut api = client("https://api.test", transport);
    api.add_interceptor(interceptor_fn(|_res: FetchResponse| async {
        Ok::<_, FetchError>(FetchResponse::new(ResponseData::Text("replaced".into()), true))
    }));
    api.add_interceptor(crate::execution::interceptor::LoggingInterceptor);

    let ok = api.get("/x", None, None).await.unwrap();

    assert_eq!(ok.data().and_then(|d| d.as_text()), Some("replaced"));
    assert_eq!(api.interceptor_count(), 2);
    api.clear_interceptors();
    assert_eq!(api.interceptor_count(), 0);
}

#[test]
fn debug_output_shows_registry_sizes() {
    let mut api = Fetch::with_transport(FetchConfig::new("https://x"), RecordingTransport::default());
    api.bypass_ngrok_security();
    assert_eq!(api.base_url(), "https://x");
    assert!(!api.config().legacy_delete_as_get);
    let out = format!("{api:?}");
    assert!(out.contains("middlewares: 1"));
    assert!(out.contains("https://x"));
}
