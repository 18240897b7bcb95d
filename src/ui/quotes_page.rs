//! State behind the quotes page: search, list, download and delete.
//!
//! List requests are numbered; only the result of the most recently issued
//! request is committed, so a slow response for an old search term can never
//! overwrite a newer one.

use std::io;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, error, info, warn};

use crate::config::{PageConfig, PageMode};
use crate::dto::quote_dto::INTENT_NEW;
use crate::model::quote::Quote;
use crate::ui::format::{download_filename, format_currency, format_date, PLACEHOLDER};
use crate::util::bff_client::QuotesBackend;

/// Receives a downloaded file, the way a browser save dialog would.
pub trait FileSaver: Send + Sync {
    fn save(&self, filename: &str, contents: &[u8]) -> io::Result<()>;
}

/// Writes downloads into a fixed directory.
#[derive(Debug, Clone)]
pub struct DirectoryFileSaver {
    dir: PathBuf,
}

impl DirectoryFileSaver {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }
}

impl FileSaver for DirectoryFileSaver {
    fn save(&self, filename: &str, contents: &[u8]) -> io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.dir.join(filename), contents)
    }
}

/// Interactive confirmation shown before a delete.
pub trait ConfirmDelete {
    fn confirm(&self, quote: &Quote) -> bool;
}

impl<F> ConfirmDelete for F
where
    F: Fn(&Quote) -> bool,
{
    fn confirm(&self, quote: &Quote) -> bool {
        self(quote)
    }
}

/// One formatted table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRow {
    pub id: i64,
    pub numero: String,
    pub cliente: String,
    pub proyecto: String,
    pub total: String,
    pub created: String,
    pub download_name: String,
}

impl From<&Quote> for QuoteRow {
    fn from(quote: &Quote) -> Self {
        let text = |v: &Option<String>| v.clone().filter(|s| !s.is_empty()).unwrap_or_else(|| PLACEHOLDER.to_string());
        QuoteRow {
            id: quote.id,
            numero: text(&quote.numero),
            cliente: text(&quote.cliente),
            proyecto: text(&quote.proyecto),
            total: format_currency(quote.total),
            created: format_date(quote.created_at.as_ref()),
            download_name: download_filename(quote),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuotesView {
    Loading,
    /// Nothing matched; offers to create a new quote.
    Empty { create_label: String },
    Table(Vec<QuoteRow>),
    Iframe { src: String },
}

#[derive(Debug, Default)]
struct PageState {
    search: String,
    quotes: Vec<Quote>,
    loading: bool,
    latest_request: u64,
}

pub struct QuotesPage<B, S> {
    backend: B,
    saver: S,
    config: PageConfig,
    state: Mutex<PageState>,
}

impl<B: QuotesBackend, S: FileSaver> QuotesPage<B, S> {
    pub fn new(backend: B, saver: S, config: PageConfig) -> Self {
        Self { backend, saver, config, state: Mutex::new(PageState::default()) }
    }

    fn state(&self) -> MutexGuard<'_, PageState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn search(&self) -> String {
        self.state().search.clone()
    }

    pub fn quotes(&self) -> Vec<Quote> {
        self.state().quotes.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state().loading
    }

    /// Initial list request, issued on mount.
    pub async fn load(&self) {
        if self.config.mode == PageMode::Iframe {
            debug!("Iframe mode, skipping list request");
            return;
        }

        let (request, search) = {
            let mut state = self.state();
            state.latest_request += 1;
            state.loading = true;
            (state.latest_request, state.search.clone())
        };

        let term = Some(search.as_str()).filter(|s| !s.is_empty());
        let result = self.backend.list_quotes(term).await;

        let mut state = self.state();
        if request != state.latest_request {
            debug!("Discarding stale list response #{} (latest #{})", request, state.latest_request);
            return;
        }
        state.loading = false;
        match result {
            Ok(list) => {
                info!("Loaded {} quotes", list.quotes.len());
                state.quotes = list.quotes;
            }
            Err(e) => {
                error!("Error loading quotes: {e}");
                state.quotes.clear();
            }
        }
    }

    pub async fn set_search<T: Into<String>>(&self, term: T) {
        self.state().search = term.into();
        self.load().await;
    }

    pub async fn refresh(&self) {
        self.load().await;
    }

    /// Fetches the quote file and saves it as `COT-{year}-{numero}.xlsx`.
    pub async fn download(&self, quote: &Quote) -> bool {
        let filename = download_filename(quote);
        let contents = match self.backend.download_quote(quote.id).await {
            Ok(contents) => contents,
            Err(e) => {
                error!("Error downloading quote {}: {e}", quote.id);
                return false;
            }
        };
        match self.saver.save(&filename, &contents) {
            Ok(()) => {
                info!("Saved {} ({} bytes)", filename, contents.len());
                true
            }
            Err(e) => {
                error!("Error saving {}: {e}", filename);
                false
            }
        }
    }

    /// Deletes after confirmation and reloads the list on success.
    pub async fn delete(&self, quote: &Quote, confirm: &dyn ConfirmDelete) -> bool {
        if !confirm.confirm(quote) {
            debug!("Delete of quote {} cancelled", quote.id);
            return false;
        }
        match self.backend.delete_quote(quote.id).await {
            Ok(resp) if resp.success => {
                info!("Deleted quote {}", quote.id);
                self.load().await;
                true
            }
            Ok(_) => {
                warn!("Backend refused to delete quote {}", quote.id);
                false
            }
            Err(e) => {
                error!("Error deleting quote {}: {e}", quote.id);
                false
            }
        }
    }

    /// Empty-state action: URL of the "new quote" screen.
    pub async fn create_new_quote(&self) -> Option<String> {
        match self.backend.handoff(Some(INTENT_NEW)).await {
            Ok(resp) => Some(resp.redirect_url),
            Err(e) => {
                error!("Error starting handoff: {e}");
                None
            }
        }
    }

    pub fn view(&self) -> QuotesView {
        if self.config.mode == PageMode::Iframe {
            return QuotesView::Iframe { src: self.config.iframe_src() };
        }
        let state = self.state();
        if state.loading {
            QuotesView::Loading
        } else if state.quotes.is_empty() {
            QuotesView::Empty { create_label: "Nueva Cotización".to_string() }
        } else {
            QuotesView::Table(state.quotes.iter().map(QuoteRow::from).collect())
        }
    }
}
