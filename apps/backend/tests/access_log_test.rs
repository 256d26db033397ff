//! Integration test for the access-logging stage: captures the JSON lines it
//! emits through an in-memory subscriber and asserts on them.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use actix_web::{test, web, App, HttpResponse};
use backend::{AccessLog, AppError};
use serde_json::Value;
use serial_test::serial;
use tracing::subscriber::set_global_default;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::Registry;

/// Simple writer that appends JSON lines to a shared Vec<u8>.
#[derive(Clone)]
struct BufWriter(Arc<Mutex<Vec<u8>>>);

impl Write for BufWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self.0.lock().unwrap();
        guard.extend_from_slice(buf);
        Ok(buf.len())
    }
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

async fn plain_ok() -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().body("ok"))
}

async fn always_not_found() -> Result<HttpResponse, AppError> {
    Err(AppError::not_found(
        "USER_NOT_FOUND",
        "user 1 not found".to_string(),
    ))
}

/// Captured lines whose message marks a completed request for `path`.
fn completed_lines(data: &str, path: &str) -> Vec<Value> {
    data.lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| serde_json::from_str::<Value>(line).ok())
        .filter(|v| {
            let fields = &v["fields"];
            fields["message"].as_str() == Some("request_completed")
                && fields["url.path"].as_str() == Some(path)
        })
        .collect()
}

#[actix_web::test]
#[serial]
async fn test_one_log_line_per_request_with_status_and_latency() {
    // In-memory JSON logger installed globally (worker threads log too).
    let buf = Arc::new(Mutex::new(Vec::new()));
    let make_writer = {
        let buf = buf.clone();
        move || BufWriter(buf.clone())
    };

    let subscriber = Registry::default().with(
        fmt::Layer::default()
            .json()
            .with_ansi(false)
            .with_writer(make_writer),
    );
    set_global_default(subscriber).expect("set global subscriber");

    let app = test::init_service(
        App::new()
            .wrap(AccessLog)
            .route("/public", web::get().to(plain_ok))
            .route("/missing", web::get().to(always_not_found)),
    )
    .await;

    let req = test::TestRequest::get().uri("/missing").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 404);

    let req = test::TestRequest::get().uri("/public").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let data = {
        let bytes = buf.lock().unwrap().clone();
        String::from_utf8(bytes).expect("utf8")
    };

    // The failed request logs exactly once, as a warning, with the terminal
    // status and a latency field.
    let missing = completed_lines(&data, "/missing");
    assert_eq!(missing.len(), 1, "expected one line for /missing");
    let line = &missing[0];
    assert_eq!(line["level"].as_str(), Some("WARN"));
    assert_eq!(line["fields"]["http.status_code"].as_u64(), Some(404));
    assert_eq!(line["fields"]["http.method"].as_str(), Some("GET"));
    assert!(line["fields"]["duration_ms"].as_u64().is_some());

    // The successful request logs exactly once, at info.
    let public = completed_lines(&data, "/public");
    assert_eq!(public.len(), 1, "expected one line for /public");
    assert_eq!(public[0]["level"].as_str(), Some("INFO"));
    assert_eq!(public[0]["fields"]["http.status_code"].as_u64(), Some(200));
}
