//! Application state.
//!
//! This module holds everything the explorer shows: the rendered directory,
//! the search input, the selection and the invocation modal. Network work is
//! handed to [`crate::runner`] and comes back through [`App::handle_result`].

use std::time::{Duration, Instant};

use apidex_core::{
    CardView, CatalogView, FormError, Invocation, Item, ParamForm, SearchFilter,
};

use crate::client::GatewayClient;
use crate::runner::{ResultPane, RunnerEvent};

/// The invocation modal for one card.
#[derive(Debug)]
pub struct Modal {
    /// Generation this modal was opened with.
    pub generation: u64,
    /// Item name shown as the title.
    pub title: String,
    /// Item description.
    pub desc: String,
    /// Item name, used as alternative text for images.
    pub alt: String,
    /// Parameter form, if the path declares parameters.
    pub form: Option<ParamForm>,
    /// Index of the focused form field.
    pub focused_field: usize,
    /// Loading indicator and result area.
    pub result: ResultPane,
}

impl Modal {
    fn new(generation: u64, item: &Item, form: Option<ParamForm>) -> Self {
        Self {
            generation,
            title: item.name.clone(),
            desc: item.desc.clone(),
            alt: item.name.clone(),
            form,
            focused_field: 0,
            result: ResultPane::default(),
        }
    }

    fn field_count(&self) -> usize {
        self.form.as_ref().map_or(0, |f| f.fields().len())
    }
}

/// A request the event loop should start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    /// Absolute URL.
    pub url: String,
    /// Alternative text for image results.
    pub alt: String,
    /// Modal generation the result belongs to.
    pub generation: u64,
}

/// Application state.
pub struct App {
    /// HTTP client for the gateway.
    client: GatewayClient,
    /// Rendered directory.
    pub view: CatalogView,
    /// Search input.
    pub search: SearchFilter,
    /// Index into the visible cards.
    pub selected: usize,
    /// The open modal, if any.
    pub modal: Option<Modal>,
    /// Whether the splash overlay is shown.
    pub splash: bool,
    /// When the splash goes away, once the catalog load has settled.
    splash_until: Option<Instant>,
    splash_delay: Duration,
    /// Error message to display.
    pub error_message: Option<String>,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Animation frame counter for loading indicators.
    pub animation_frame: usize,
    generation: u64,
}

impl App {
    /// Create a new application.
    #[must_use]
    pub fn new(client: GatewayClient, splash_delay: Duration) -> Self {
        Self {
            client,
            view: CatalogView::default(),
            search: SearchFilter::default(),
            selected: 0,
            modal: None,
            splash: true,
            splash_until: None,
            splash_delay,
            error_message: None,
            should_quit: false,
            animation_frame: 0,
            generation: 0,
        }
    }

    /// Get the client.
    #[must_use]
    pub fn client(&self) -> &GatewayClient {
        &self.client
    }

    /// Fetch the catalog and render it.
    ///
    /// A failed load leaves the directory empty and the default branding in
    /// place. Either way the splash is scheduled to close.
    pub async fn load_catalog(&mut self) {
        match self.client.fetch_catalog().await {
            Ok(doc) => {
                tracing::info!(categories = doc.categories.len(), "Catalog loaded");
                self.view = CatalogView::render(&doc);
                self.search.apply(&mut self.view);
            }
            Err(e) => {
                tracing::error!(error = %e, "Error loading settings");
                self.view = CatalogView::default();
                self.set_error(format!("Error loading settings: {e}"));
            }
        }
        self.splash_until = Some(Instant::now() + self.splash_delay);
    }

    /// Tick the animation frame and close the splash when due.
    pub fn tick(&mut self, now: Instant) {
        self.animation_frame = self.animation_frame.wrapping_add(1);
        if self.splash && self.splash_until.is_some_and(|until| now >= until) {
            self.splash = false;
        }
    }

    /// Get current spinner character for loading animation.
    #[must_use]
    pub fn spinner_char(&self) -> &'static str {
        const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
        SPINNER[self.animation_frame % SPINNER.len()]
    }

    /// Set an error message.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error_message = Some(message.into());
    }

    /// Clear the error message.
    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    // =========================================================================
    // Directory
    // =========================================================================

    /// Cards currently shown.
    #[must_use]
    pub fn visible_cards(&self) -> Vec<&CardView> {
        self.view.visible_cards().collect()
    }

    /// Get the currently selected card.
    #[must_use]
    pub fn selected_card(&self) -> Option<&CardView> {
        self.view.visible_cards().nth(self.selected)
    }

    /// Select the previous card.
    pub fn select_prev(&mut self) {
        let count = self.view.visible_cards().count();
        if count > 0 {
            self.selected = if self.selected == 0 {
                count - 1
            } else {
                self.selected - 1
            };
        }
    }

    /// Select the next card.
    pub fn select_next(&mut self) {
        let count = self.view.visible_cards().count();
        if count > 0 {
            self.selected = (self.selected + 1) % count;
        }
    }

    /// Append a character to the search input.
    pub fn search_push(&mut self, c: char) {
        self.search.push(c);
        self.refilter();
    }

    /// Delete the last character of the search input.
    pub fn search_pop(&mut self) {
        self.search.pop();
        self.refilter();
    }

    fn refilter(&mut self) {
        let visible = self.search.apply(&mut self.view);
        if self.selected >= visible {
            self.selected = visible.saturating_sub(1);
        }
    }

    // =========================================================================
    // Modal
    // =========================================================================

    /// Open the modal for the selected card.
    ///
    /// Cards without parameters request their path straight away, so the
    /// returned request should be started by the caller.
    pub fn open_selected(&mut self) -> Option<PendingRequest> {
        let card = self.selected_card()?.clone();
        self.generation += 1;
        let generation = self.generation;

        match card.invoke() {
            Invocation::Direct(path) => {
                let mut modal = Modal::new(generation, &card.item, None);
                modal.result.begin();
                let request = PendingRequest {
                    url: self.client.url_for(&path),
                    alt: modal.alt.clone(),
                    generation,
                };
                self.modal = Some(modal);
                Some(request)
            }
            Invocation::Form(form) => {
                self.modal = Some(Modal::new(generation, &card.item, Some(form)));
                None
            }
        }
    }

    /// Close the modal. Any outstanding result for it will be ignored.
    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    /// Move focus to the next form field.
    pub fn focus_next_field(&mut self) {
        if let Some(modal) = self.modal.as_mut() {
            let count = modal.field_count();
            if count > 0 {
                modal.focused_field = (modal.focused_field + 1) % count;
            }
        }
    }

    /// Move focus to the previous form field.
    pub fn focus_prev_field(&mut self) {
        if let Some(modal) = self.modal.as_mut() {
            let count = modal.field_count();
            if count > 0 {
                modal.focused_field = (modal.focused_field + count - 1) % count;
            }
        }
    }

    /// Type into the focused field.
    pub fn field_push(&mut self, c: char) {
        if let Some(modal) = self.modal.as_mut() {
            let index = modal.focused_field;
            if let Some(form) = modal.form.as_mut() {
                form.push_char(index, c);
            }
        }
    }

    /// Delete from the focused field.
    pub fn field_pop(&mut self) {
        if let Some(modal) = self.modal.as_mut() {
            let index = modal.focused_field;
            if let Some(form) = modal.form.as_mut() {
                form.pop_char(index);
            }
        }
    }

    /// Submit the modal's form.
    ///
    /// Blank fields are flagged and a notice is shown instead of a request.
    pub fn submit_form(&mut self) -> Option<PendingRequest> {
        let modal = self.modal.as_mut()?;
        let form = modal.form.as_mut()?;

        match form.submit() {
            Ok(path) => {
                modal.result.begin();
                Some(PendingRequest {
                    url: self.client.url_for(&path),
                    alt: modal.alt.clone(),
                    generation: modal.generation,
                })
            }
            Err(e @ FormError::Blank { .. }) => {
                modal.result.notice(e.to_string());
                None
            }
            Err(FormError::InFlight) => None,
        }
    }

    /// Apply a finished request.
    ///
    /// Results for a modal that has since been closed or replaced are dropped.
    pub fn handle_result(&mut self, event: RunnerEvent) {
        match self.modal.as_mut() {
            Some(modal) if modal.generation == event.generation => {
                modal.result.settle(event.completed);
                if let Some(form) = modal.form.as_mut() {
                    form.finish();
                }
            }
            _ => {
                tracing::debug!(
                    generation = event.generation,
                    url = %event.completed.url,
                    "Discarding stale result"
                );
            }
        }
    }
}
