use std::path::PathBuf;
use std::sync::Arc;

use timetable_core::keys::{ENTRY_ROUTE, PDF_FILENAME, TIMETABLE_DATA_KEY};
use timetable_export::error::ExportError;
use timetable_export::html::render_document;
use timetable_export::pdf::PdfClient;
use timetable_export::render::{Page, render_page};
use timetable_export::styles::TableStyles;
use timetable_storage::SessionStore;
use timetable_storage::error::StorageError;

use crate::error::DownloadError;
use crate::loader::load_bundle;
use crate::sinks::{DownloadSink, Notifier};
use crate::state::{PagePhase, PageState};

pub const LOADING_MESSAGE: &str = "Loading timetable...";
pub const DOWNLOAD_FAILED_ALERT: &str = "Failed to download PDF. Please try again.";

/// What the page shows after [`Presenter::open`].
///
/// `status` is the text of the loading/status element; `None` means the
/// element is hidden. `state` is only present once the bundle loaded.
#[derive(Debug, Clone)]
pub struct PageView {
    pub phase: PagePhase,
    pub status: Option<String>,
    pub page: Page,
    pub state: Option<PageState>,
}

impl PageView {
    pub fn loading() -> Self {
        Self {
            phase: PagePhase::Uninitialized,
            status: Some(LOADING_MESSAGE.to_string()),
            page: Page { divisions: vec![] },
            state: None,
        }
    }

    pub fn to_html(&self, styles: &TableStyles) -> Result<String, ExportError> {
        render_document(&self.page, self.status.as_deref(), styles)
    }
}

/// Full-page redirect target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub location: String,
}

/// The results page: loader, renderer and the two user actions.
pub struct Presenter {
    store: Arc<dyn SessionStore>,
    client: PdfClient,
    notifier: Arc<dyn Notifier>,
    downloads: Arc<dyn DownloadSink>,
    styles: TableStyles,
}

impl Presenter {
    pub fn new(
        store: Arc<dyn SessionStore>,
        client: PdfClient,
        notifier: Arc<dyn Notifier>,
        downloads: Arc<dyn DownloadSink>,
    ) -> Self {
        Self {
            store,
            client,
            notifier,
            downloads,
            styles: TableStyles::default(),
        }
    }

    pub fn with_styles(mut self, styles: TableStyles) -> Self {
        self.styles = styles;
        self
    }

    pub fn styles(&self) -> &TableStyles {
        &self.styles
    }

    /// Page load: read the stored bundle and render it.
    ///
    /// A load failure is terminal. The view carries the failure message and
    /// no tables.
    pub fn open(&self) -> PageView {
        let mut view = PageView::loading();

        let state = match load_bundle(self.store.as_ref()) {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!(error = %e, "results page failed to load");
                view.phase = PagePhase::Failed(e.failure());
                view.status = Some(e.to_string());
                return view;
            }
        };
        view.phase = PagePhase::Loaded;
        tracing::debug!(phase = ?view.phase, "bundle held in page state");

        view.page = render_page(state.bundle());
        view.phase = PagePhase::Rendered;
        view.status = None;
        view.state = Some(state);

        tracing::info!(divisions = view.page.divisions.len(), "timetables rendered");
        view
    }

    /// Download action: send the loaded bundle to the PDF service and save
    /// the answer as `timetable.pdf`.
    ///
    /// Failures are logged and raised as a single alert; the rendered page
    /// is untouched and the action can simply be run again.
    pub async fn download_pdf(&self, state: &PageState) -> Result<PathBuf, DownloadError> {
        let result = self.fetch_and_save(state).await;

        match &result {
            Ok(path) => tracing::info!(path = %path.display(), "PDF saved"),
            Err(e) => {
                tracing::error!(error = %e, "Error downloading PDF");
                self.notifier.alert(DOWNLOAD_FAILED_ALERT);
            }
        }

        result
    }

    async fn fetch_and_save(&self, state: &PageState) -> Result<PathBuf, DownloadError> {
        let bytes = self.client.download_pdf(state.bundle()).await?;
        self.downloads.save(PDF_FILENAME, &bytes)
    }

    /// Back action: forget the stored bundle and leave for the entry page.
    pub fn go_back(&self) -> Result<Redirect, StorageError> {
        self.store.remove(TIMETABLE_DATA_KEY)?;
        tracing::info!(location = ENTRY_ROUTE, "session cleared, redirecting");
        Ok(Redirect {
            location: ENTRY_ROUTE.to_string(),
        })
    }
}
