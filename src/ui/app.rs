use std::path::PathBuf;

use chrono::{DateTime, Local};
use tracing::warn;

use crate::config::SyncConfig;
use crate::filter::CategoryFilter;
use crate::quote::Quote;
use crate::render::CategoryOption;
use crate::session::{QuoteSession, SessionError};
use crate::sync::{PostReceipt, SyncError};
use crate::transfer::export_to;
use crate::ui::form::{AddFormIntent, AddFormReducer, AddFormState};
use crate::ui::mvi::Reducer;
use crate::ui::notice::{SyncNoticeIntent, SyncNoticeReducer, SyncNoticeState};

/// Side effects requested by the UI, executed by the runtime loop.
#[derive(Debug, Clone, PartialEq)]
pub enum UiCommand {
    SyncNow,
    Publish(Quote),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub kind: StatusKind,
    pub text: String,
}

/// Last known reconciliation state, shown in the header.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SyncIndicator {
    #[default]
    Idle,
    InFlight,
    Synced { at: DateTime<Local> },
    Failed { reason: String },
}

/// Generic MVI dispatch: takes current state, runs reducer, stores result.
macro_rules! dispatch_mvi {
    ($self:expr, $field:ident, $reducer:ty, $intent:expr) => {
        $self.$field = <$reducer>::reduce(std::mem::take(&mut $self.$field), $intent);
    };
}

pub struct App {
    should_quit: bool,
    session: QuoteSession,
    sync: SyncConfig,
    export_path: PathBuf,
    /// Add-quote form (MVI pattern).
    form: AddFormState,
    /// Conflict banner (MVI pattern).
    notice: SyncNoticeState,
    status: Option<StatusLine>,
    /// Single highlighted quote: last random pick.
    spotlight: Option<Quote>,
    sync_indicator: SyncIndicator,
    commands: Vec<UiCommand>,
}

impl App {
    pub fn new(session: QuoteSession, sync: SyncConfig, export_path: PathBuf) -> Self {
        let spotlight = session.last_viewed().unwrap_or_else(|err| {
            warn!(error = %err, "Failed to read last viewed quote");
            None
        });
        Self {
            should_quit: false,
            session,
            sync,
            export_path,
            form: AddFormState::default(),
            notice: SyncNoticeState::default(),
            status: None,
            spotlight,
            sync_indicator: SyncIndicator::default(),
            commands: Vec::new(),
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn session(&self) -> &QuoteSession {
        &self.session
    }

    pub fn form(&self) -> &AddFormState {
        &self.form
    }

    pub fn notice(&self) -> &SyncNoticeState {
        &self.notice
    }

    pub fn status(&self) -> Option<&StatusLine> {
        self.status.as_ref()
    }

    pub fn spotlight(&self) -> Option<&Quote> {
        self.spotlight.as_ref()
    }

    pub fn sync_indicator(&self) -> &SyncIndicator {
        &self.sync_indicator
    }

    /// Drain side effects queued since the last call.
    pub fn take_commands(&mut self) -> Vec<UiCommand> {
        std::mem::take(&mut self.commands)
    }

    fn set_status(&mut self, kind: StatusKind, text: impl Into<String>) {
        self.status = Some(StatusLine {
            kind,
            text: text.into(),
        });
    }

    pub fn category_options(&self) -> Vec<CategoryOption> {
        self.session.category_options()
    }

    /// Index of the active option. A stale persisted category that is no
    /// longer in the collection maps to "All Categories".
    pub fn selected_category_index(&self) -> usize {
        self.category_options()
            .iter()
            .position(|option| option.selected)
            .unwrap_or(0)
    }

    /// Move the category selector by `delta` (wrapping) and apply it.
    pub fn cycle_category(&mut self, delta: isize) {
        let options = self.category_options();
        let len = options.len() as isize;
        let current = self.selected_category_index() as isize;
        let next = (current + delta).rem_euclid(len) as usize;
        let filter = CategoryFilter::parse(&options[next].value);
        if let Err(err) = self.session.apply_filter(filter) {
            self.set_status(StatusKind::Error, err.to_string());
        }
    }

    /// Pick a random quote from the active filter.
    pub fn show_random(&mut self) {
        match self.session.random_quote() {
            Ok(quote) => self.spotlight = quote,
            Err(err) => self.set_status(StatusKind::Error, err.to_string()),
        }
    }

    pub fn dispatch_form(&mut self, intent: AddFormIntent) {
        dispatch_mvi!(self, form, AddFormReducer, intent);
    }

    /// Validate and add the quote typed into the form.
    pub fn submit_form(&mut self) {
        let Some((text, category)) = self.form.values() else {
            return;
        };
        let (text, category) = (text.to_string(), category.to_string());
        match self.session.add_quote(&text, &category) {
            Ok(quote) => {
                self.set_status(StatusKind::Info, format!("Added {quote}"));
                if self.sync.post_new_quotes {
                    self.commands.push(UiCommand::Publish(quote));
                }
                self.dispatch_form(AddFormIntent::Close);
            }
            Err(SessionError::Validation(err)) => self.set_status(StatusKind::Error, err.to_string()),
            Err(err @ SessionError::Storage(_)) => {
                self.set_status(StatusKind::Error, err.to_string());
                self.dispatch_form(AddFormIntent::Close);
            }
        }
    }

    pub fn export(&mut self) {
        match export_to(&self.export_path, self.session.quotes()) {
            Ok(()) => {
                let text = format!(
                    "Exported {} quotes to {}",
                    self.session.quotes().len(),
                    self.export_path.display()
                );
                self.set_status(StatusKind::Info, text);
            }
            Err(err) => self.set_status(StatusKind::Error, err.to_string()),
        }
    }

    pub fn request_sync(&mut self) {
        self.sync_indicator = SyncIndicator::InFlight;
        self.commands.push(UiCommand::SyncNow);
    }

    pub fn acknowledge_notice(&mut self) {
        dispatch_mvi!(self, notice, SyncNoticeReducer, SyncNoticeIntent::Acknowledge);
    }

    /// Merge a fetched batch (or record why fetching failed).
    pub fn on_sync_result(&mut self, result: Result<Vec<Quote>, SyncError>) {
        let batch = match result {
            Ok(batch) => batch,
            Err(SyncError::InProgress) => {
                self.set_status(StatusKind::Info, "Sync already in progress");
                return;
            }
            Err(err) => {
                self.set_status(StatusKind::Error, format!("Sync failed: {err}"));
                self.sync_indicator = SyncIndicator::Failed {
                    reason: err.to_string(),
                };
                return;
            }
        };

        match self.session.apply_remote(batch, self.sync.conflict_policy) {
            Ok(outcome) => {
                self.sync_indicator = SyncIndicator::Synced { at: Local::now() };
                let intent = if outcome.has_conflict() {
                    SyncNoticeIntent::ConflictDetected {
                        conflicts: outcome.conflicts,
                    }
                } else {
                    SyncNoticeIntent::CleanSync
                };
                dispatch_mvi!(self, notice, SyncNoticeReducer, intent);
            }
            Err(err) => {
                self.sync_indicator = SyncIndicator::Failed {
                    reason: err.to_string(),
                };
                self.set_status(StatusKind::Error, err.to_string());
            }
        }
    }

    pub fn on_publish_result(&mut self, result: Result<PostReceipt, SyncError>) {
        match result {
            Ok(receipt) => {
                let text = match receipt.id {
                    Some(id) => format!("Quote posted to server (id {id})"),
                    None => format!("Quote posted to server (status {})", receipt.status),
                };
                self.set_status(StatusKind::Info, text);
            }
            Err(err) => self.set_status(StatusKind::Error, format!("Posting quote failed: {err}")),
        }
    }
}
