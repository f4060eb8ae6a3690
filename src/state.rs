use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui;

use crate::data::catalog::FilterCatalog;
use crate::data::filter::{view_indices, ChartViews, Selection, ViewIndices};
use crate::data::loader::{load_file, LoadError};
use crate::data::model::{Dataset, RecordField};

type LoadResult = Result<Dataset, LoadError>;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded dataset (None until a load succeeds). Never mutated once set.
    pub dataset: Option<Dataset>,

    /// Options offered by the three selection controls.
    pub catalog: FilterCatalog,

    /// Current control values.
    pub selection: Selection,

    /// Records behind each chart for the current selection (cached).
    pub views: ViewIndices,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a file loading operation is in progress.
    pub loading: bool,

    /// Result channel of the in-flight load, if any.
    pending: Option<Receiver<LoadResult>>,
}

impl AppState {
    /// Read `path` on a background thread; [`AppState::poll_load`] picks up
    /// the result. Replaces any load still in flight.
    pub fn start_load(&mut self, path: PathBuf, ctx: &egui::Context) {
        log::info!("Loading {}", path.display());
        let (sender, receiver) = mpsc::channel();
        let ctx = ctx.clone();

        thread::spawn(move || {
            if sender.send(load_file(&path)).is_err() {
                log::debug!("Discarding superseded load of {}", path.display());
                return;
            }
            ctx.request_repaint();
        });

        self.pending = Some(receiver);
        self.loading = true;
        self.status_message = None;
    }

    /// Apply a finished background load. Returns true when a result arrived.
    pub fn poll_load(&mut self) -> bool {
        let received = match &self.pending {
            Some(receiver) => receiver.try_recv(),
            None => return false,
        };
        match received {
            Ok(result) => {
                self.pending = None;
                self.finish_load(result);
                true
            }
            Err(TryRecvError::Empty) => false,
            Err(TryRecvError::Disconnected) => {
                self.pending = None;
                self.finish_load(Err(LoadError::Io {
                    path: PathBuf::new(),
                    source: std::io::Error::other("loader thread exited without a result"),
                }));
                true
            }
        }
    }

    /// Install a load result. A failure leaves any current dataset untouched.
    pub fn finish_load(&mut self, result: LoadResult) {
        self.loading = false;
        match result {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} records ({} rows dropped) from {}",
                    dataset.len(),
                    dataset.rows_dropped(),
                    dataset
                        .source
                        .as_deref()
                        .map_or_else(|| "<stream>".into(), |p| p.display().to_string())
                );
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load dataset: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Ingest a newly loaded dataset, rebuild options and reset the controls
    /// to their placeholders.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.catalog = FilterCatalog::from_records(&dataset.records);
        self.selection = Selection::default();
        self.views = ViewIndices::default();
        self.dataset = Some(dataset);
        self.status_message = None;
    }

    /// Replace the selection with one whose `field` is `value`, then refilter.
    pub fn select(&mut self, field: RecordField, value: String) {
        let next = match field {
            RecordField::Group => self.selection.with_group(value),
            RecordField::TimePeriod => self.selection.with_time_period(value),
            RecordField::Indicator => self.selection.with_indicator(value),
        };
        if next == self.selection {
            return;
        }
        log::debug!("Selection changed: {next:?}");
        self.selection = next;
        self.refilter();
    }

    /// Recompute `views` from the current selection.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.views = view_indices(&ds.records, &self.selection);
        }
    }

    /// Records behind both charts.
    pub fn chart_views(&self) -> ChartViews<'_> {
        match &self.dataset {
            Some(ds) => self.views.resolve(&ds.records),
            None => ChartViews::default(),
        }
    }
}
