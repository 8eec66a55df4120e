use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use axum::http::{header, StatusCode};
use axum::routing::post;
use axum::Router;
use serde_json::json;
use timetable_core::keys::TIMETABLE_DATA_KEY;
use timetable_export::pdf::PdfClient;
use timetable_export::styles::TableStyles;
use timetable_storage::{MemoryStore, SessionStore};
use timetable_viewer::error::DownloadError;
use timetable_viewer::presenter::{Presenter, DOWNLOAD_FAILED_ALERT};
use timetable_viewer::sinks::{DirectoryDownloads, DownloadSink, Notifier};
use timetable_viewer::state::{LoadFailure, PagePhase};

const FAKE_PDF: &[u8] = b"%PDF-1.7\n%%EOF";

#[derive(Default)]
struct RecordingNotifier {
    alerts: Mutex<Vec<String>>,
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }
}

#[derive(Default)]
struct RecordingDownloads {
    saved: Mutex<Vec<(String, Vec<u8>)>>,
    fail: bool,
}

impl DownloadSink for RecordingDownloads {
    fn save(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf, DownloadError> {
        self.saved
            .lock()
            .unwrap()
            .push((filename.to_string(), bytes.to_vec()));
        if self.fail {
            return Err(DownloadError::Save {
                path: PathBuf::from("/read-only").join(filename),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
            });
        }
        Ok(PathBuf::from(filename))
    }
}

struct Harness {
    store: Arc<MemoryStore>,
    notifier: Arc<RecordingNotifier>,
    downloads: Arc<RecordingDownloads>,
    presenter: Presenter,
}

fn harness(base_url: &str, downloads: RecordingDownloads) -> Harness {
    let store = Arc::new(MemoryStore::new());
    let notifier = Arc::new(RecordingNotifier::default());
    let downloads = Arc::new(downloads);
    let presenter = Presenter::new(
        store.clone(),
        PdfClient::new(base_url),
        notifier.clone(),
        downloads.clone(),
    );
    Harness {
        store,
        notifier,
        downloads,
        presenter,
    }
}

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn pdf_server() -> Router {
    Router::new().route(
        "/api/download-pdf",
        post(|| async { ([(header::CONTENT_TYPE, "application/pdf")], FAKE_PDF) }),
    )
}

fn failing_server() -> Router {
    Router::new().route(
        "/api/download-pdf",
        post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    )
}

fn stash(store: &MemoryStore) {
    let bundle = json!({
        "timetables": [
            [[{"type": "theory", "subject": "Math", "faculty": "Dr. A"}, {"type": "break"}]],
            [[null, {"type": "practical", "subject": "Lab", "lab": "L1"}]]
        ],
        "days": ["Mon", "Tue"],
        "config": {"divisions": 2}
    });
    store.set(TIMETABLE_DATA_KEY, &bundle.to_string()).unwrap();
}

#[test]
fn open_without_data_fails_with_no_tables() {
    let h = harness("http://127.0.0.1:9", RecordingDownloads::default());

    let view = h.presenter.open();
    assert_eq!(view.phase, PagePhase::Failed(LoadFailure::NoData));
    assert_eq!(view.status.as_deref(), Some("No timetable data found!"));
    assert!(view.page.is_empty());
    assert!(view.state.is_none());
}

#[test]
fn open_with_garbage_fails_with_parse_error() {
    let h = harness("http://127.0.0.1:9", RecordingDownloads::default());
    h.store.set(TIMETABLE_DATA_KEY, "definitely not json").unwrap();

    let view = h.presenter.open();
    assert_eq!(view.phase, PagePhase::Failed(LoadFailure::ParseError));
    assert_eq!(view.status.as_deref(), Some("Error loading timetable!"));
    assert!(view.page.is_empty());

    let html = view.to_html(&TableStyles::default()).unwrap();
    assert!(html.contains(r#"<div id="loadingMsg">Error loading timetable!</div>"#));
    assert!(!html.contains("<table>"));
}

#[test]
fn open_renders_every_division_and_hides_status() {
    let h = harness("http://127.0.0.1:9", RecordingDownloads::default());
    stash(&h.store);

    let view = h.presenter.open();
    assert_eq!(view.phase, PagePhase::Rendered);
    assert!(view.status.is_none());
    assert_eq!(view.page.divisions.len(), 2);
    assert_eq!(view.page.divisions[1].title, "Division 2");
    assert!(view.state.is_some());

    let html = view.to_html(h.presenter.styles()).unwrap();
    assert!(html.contains(r#"style="display: none;""#));
    assert_eq!(html.matches("<table>").count(), 2);
}

#[tokio::test]
async fn successful_download_saves_one_file() {
    let base = serve(pdf_server()).await;
    let h = harness(&base, RecordingDownloads::default());
    stash(&h.store);

    let state = h.presenter.open().state.unwrap();
    let path = h.presenter.download_pdf(&state).await.unwrap();

    assert_eq!(path, PathBuf::from("timetable.pdf"));
    let saved = h.downloads.saved.lock().unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].0, "timetable.pdf");
    assert_eq!(saved[0].1, FAKE_PDF);
    assert!(h.notifier.alerts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn server_error_alerts_once_and_saves_nothing() {
    let base = serve(failing_server()).await;
    let h = harness(&base, RecordingDownloads::default());
    stash(&h.store);

    let view = h.presenter.open();
    let state = view.state.clone().unwrap();
    let err = h.presenter.download_pdf(&state).await.unwrap_err();

    assert!(matches!(err, DownloadError::Export(_)));
    assert_eq!(
        *h.notifier.alerts.lock().unwrap(),
        vec![DOWNLOAD_FAILED_ALERT.to_string()]
    );
    assert!(h.downloads.saved.lock().unwrap().is_empty());

    // The page is unaffected and the action can be retried.
    assert_eq!(view.phase, PagePhase::Rendered);
    assert!(h.presenter.download_pdf(&state).await.is_err());
    assert_eq!(h.notifier.alerts.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn failed_save_is_reported_like_a_failed_download() {
    let base = serve(pdf_server()).await;
    let h = harness(
        &base,
        RecordingDownloads {
            fail: true,
            ..Default::default()
        },
    );
    stash(&h.store);

    let state = h.presenter.open().state.unwrap();
    let err = h.presenter.download_pdf(&state).await.unwrap_err();

    assert!(matches!(err, DownloadError::Save { .. }));
    assert_eq!(h.notifier.alerts.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn concurrent_downloads_are_independent() {
    let base = serve(pdf_server()).await;
    let h = harness(&base, RecordingDownloads::default());
    stash(&h.store);

    let state = h.presenter.open().state.unwrap();
    let (a, b) = tokio::join!(
        h.presenter.download_pdf(&state),
        h.presenter.download_pdf(&state)
    );
    assert!(a.is_ok() && b.is_ok());
    assert_eq!(h.downloads.saved.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn download_into_directory_writes_the_document() {
    let base = serve(pdf_server()).await;
    let dir = tempfile::tempdir().unwrap();

    let store = Arc::new(MemoryStore::new());
    stash(&store);
    let presenter = Presenter::new(
        store,
        PdfClient::new(&base),
        Arc::new(RecordingNotifier::default()),
        Arc::new(DirectoryDownloads::new(dir.path())),
    );

    let state = presenter.open().state.unwrap();
    let path = presenter.download_pdf(&state).await.unwrap();

    assert_eq!(path, dir.path().join("timetable.pdf"));
    assert_eq!(std::fs::read(&path).unwrap(), FAKE_PDF);

    // Only the final document remains; the temporary file was renamed away.
    let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[tokio::test]
async fn unwritable_download_dir_reports_the_target_path() {
    let base = serve(pdf_server()).await;
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, b"").unwrap();

    let store = Arc::new(MemoryStore::new());
    stash(&store);
    let notifier = Arc::new(RecordingNotifier::default());
    let presenter = Presenter::new(
        store,
        PdfClient::new(&base),
        notifier.clone(),
        Arc::new(DirectoryDownloads::new(&blocker)),
    );

    let state = presenter.open().state.unwrap();
    let err = presenter.download_pdf(&state).await.unwrap_err();

    match err {
        DownloadError::Save { path, .. } => assert_eq!(path, blocker.join("timetable.pdf")),
        other => panic!("expected a save error, got {other:?}"),
    }
    assert_eq!(notifier.alerts.lock().unwrap().len(), 1);
}

#[test]
fn go_back_clears_storage_and_redirects_to_entry() {
    let h = harness("http://127.0.0.1:9", RecordingDownloads::default());
    stash(&h.store);

    let redirect = h.presenter.go_back().unwrap();
    assert_eq!(redirect.location, "/entry");
    assert_eq!(h.store.get(TIMETABLE_DATA_KEY).unwrap(), None);

    // Reopening after navigating away finds nothing.
    assert_eq!(
        h.presenter.open().phase,
        PagePhase::Failed(LoadFailure::NoData)
    );
}
