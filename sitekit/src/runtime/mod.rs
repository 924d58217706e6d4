//! Page runtime: owns the document and every behavior, and routes events.
//!
//! A [`Page`] is driven synchronously through [`Page::dispatch`]. The only
//! asynchronous work, the contact POST, is queued as a
//! [`PendingSubmission`] for the host; [`EventLoop`] is a ready-made tokio
//! host that also fires flash deadlines and animation frames.

mod event_loop;

pub use event_loop::EventLoop;

use std::sync::Arc;
use std::time::{Duration, Instant};

use contact_api::{ApiError, ContactResponse, ContactTransport};
use log::debug;
use sitedom::{Document, Event, FocusState};

use crate::clipboard::{Clipboard, MemoryClipboard};
use crate::config::SiteConfig;
use crate::contact::{ContactController, Outcome, PendingSubmission, SubmitAction};
use crate::counter::Counters;
use crate::effect::Effect;
use crate::flash::{FlashNotifier, Severity};
use crate::modal;
use crate::nav::{Anchors, Menu};
use crate::reveal::{LazyImages, ScrollReveal};
use crate::scroll::{self, Parallax, ScrollToTop};
use crate::settings::SettingsProvider;
use crate::theme::DarkMode;
use crate::validation::FormValidationController;

/// Host-provided capabilities.
#[derive(Clone)]
pub struct Services {
    pub settings: SettingsProvider,
    pub clipboard: Arc<dyn Clipboard>,
}

impl Default for Services {
    fn default() -> Self {
        Self {
            settings: SettingsProvider::in_memory(),
            clipboard: Arc::new(MemoryClipboard::new()),
        }
    }
}

impl Services {
    pub fn with_settings(mut self, settings: SettingsProvider) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_clipboard(mut self, clipboard: Arc<dyn Clipboard>) -> Self {
        self.clipboard = clipboard;
        self
    }
}

/// What the page did with an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dispatch {
    /// The host must not run the browser default (navigation, form post).
    pub default_prevented: bool,
}

impl Dispatch {
    fn prevent(&mut self, prevent: bool) {
        self.default_prevented |= prevent;
    }
}

pub struct Page {
    doc: Document,
    config: SiteConfig,
    focus: FocusState,

    validation: FormValidationController,
    contact: ContactController,
    flash: FlashNotifier,

    menu: Menu,
    anchors: Anchors,
    reveal: ScrollReveal,
    images: LazyImages,
    parallax: Parallax,
    scroll_top: ScrollToTop,
    dark_mode: DarkMode,
    counters: Counters,
    clipboard: Arc<dyn Clipboard>,

    effects: Vec<Effect>,
    submissions: Vec<PendingSubmission>,
}

impl Page {
    /// Build the page and run its `Ready` handlers.
    pub fn load(doc: Document, config: SiteConfig, services: Services) -> Self {
        let messages = config.messages.clone();
        let mut page = Self {
            doc,
            focus: FocusState::new(),
            validation: FormValidationController::new(messages.clone()),
            contact: ContactController::new(messages),
            flash: FlashNotifier::new(config.flash_lifetime),
            menu: Menu::default(),
            anchors: Anchors::default(),
            reveal: ScrollReveal::new(config.reveal_threshold, config.reveal_animation.clone()),
            images: LazyImages::default(),
            parallax: Parallax::new(config.parallax_rate),
            scroll_top: ScrollToTop::new(config.scroll_top_threshold),
            dark_mode: DarkMode::new(services.settings, config.dark_mode_key.clone()),
            counters: Counters::new(config.frame_interval),
            clipboard: services.clipboard,
            effects: Vec::new(),
            submissions: Vec::new(),
            config,
        };
        page.dispatch(Event::Ready);
        page
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Mutable access for hosts that change the markup. Dispatch `Ready`
    /// afterwards to pick up new elements.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn validation(&self) -> &FormValidationController {
        &self.validation
    }

    pub fn contact(&self) -> &ContactController {
        &self.contact
    }

    pub fn flash(&self) -> &FlashNotifier {
        &self.flash
    }

    pub fn focused(&self) -> Option<&str> {
        self.focus.focused()
    }

    // =========================================================================
    // Event dispatch
    // =========================================================================

    pub fn dispatch(&mut self, event: Event) -> Dispatch {
        self.dispatch_at(event, Instant::now())
    }

    /// Dispatch with an explicit clock reading for flash timestamps.
    pub fn dispatch_at(&mut self, event: Event, now: Instant) -> Dispatch {
        let mut result = Dispatch::default();

        match event {
            Event::Ready => self.attach(),
            Event::Focus { .. } => {}
            Event::Blur { target, .. } => {
                self.validation.on_blur(&mut self.doc, &target);
            }
            Event::Input { target } => {
                self.validation.on_input(&mut self.doc, &target);
            }
            Event::Submit { target } => {
                let action = self.contact.submit(&mut self.doc, &mut self.flash, &target, now);
                result.prevent(action.prevents_default());
                if let SubmitAction::Send(pending) = action {
                    self.submissions.push(pending);
                }
            }
            Event::Click { target } => self.click(&target, &mut result),
            Event::Scroll { offset_y } => {
                self.parallax.on_scroll(&mut self.doc, offset_y);
                self.scroll_top.on_scroll(&mut self.doc, offset_y);
            }
            Event::Intersect { target, ratio } => {
                self.reveal.on_intersect(&mut self.doc, &target, ratio);
                self.images.on_intersect(&mut self.doc, &target, ratio);
            }
        }

        result
    }

    fn attach(&mut self) {
        self.validation.forget_detached(&self.doc);
        self.focus.forget_detached(&self.doc);
        let fields = self.validation.attach(&self.doc);
        self.contact.attach(&self.doc);
        self.flash.attach(&self.doc);
        self.menu.attach(&self.doc);
        let anchors = self.anchors.attach(&self.doc);
        let cards = self.reveal.attach(&self.doc);
        let images = self.images.attach(&self.doc);
        self.parallax.attach(&self.doc);
        self.scroll_top.attach(&self.doc);
        self.dark_mode.restore(&mut self.doc);
        debug!(
            "page ready: {fields} new field(s), {anchors} anchor(s), {cards} card(s), {images} lazy image(s)"
        );
    }

    /// Every click listener sees every click, like independent DOM handlers.
    fn click(&mut self, target: &str, result: &mut Dispatch) {
        if !self.doc.is_attached(target) {
            debug!("click on detached element {target}");
            return;
        }

        self.flash.handle_click(&mut self.doc, target);
        self.menu.handle_click(&mut self.doc, target);

        if let Some(effect) = self.anchors.handle_click(&self.doc, target) {
            result.prevent(true);
            self.effects.extend(effect);
        }
        if let Some(effect) = self.scroll_top.handle_click(&self.doc, target) {
            self.effects.push(effect);
        }

        modal::handle_click(&mut self.doc, target);
    }

    // =========================================================================
    // Host conveniences
    // =========================================================================

    /// Move focus, dispatching the resulting blur and focus events.
    pub fn focus(&mut self, id: &str) {
        for event in self.focus.focus(id) {
            self.dispatch(event);
        }
    }

    /// Drop focus, dispatching the blur.
    pub fn blur(&mut self) {
        if let Some(event) = self.focus.blur() {
            self.dispatch(event);
        }
    }

    /// Replace a control's value as typing would, then dispatch `Input`.
    pub fn type_text(&mut self, id: &str, text: &str) -> bool {
        if !self.doc.set_value(id, text) {
            return false;
        }
        self.dispatch(Event::Input {
            target: id.to_string(),
        });
        true
    }

    pub fn click_on(&mut self, id: &str) -> Dispatch {
        self.dispatch(Event::Click {
            target: id.to_string(),
        })
    }

    pub fn submit(&mut self, form: &str) -> Dispatch {
        self.dispatch(Event::Submit {
            target: form.to_string(),
        })
    }

    // =========================================================================
    // Host work queues
    // =========================================================================

    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    pub fn take_submissions(&mut self) -> Vec<PendingSubmission> {
        std::mem::take(&mut self.submissions)
    }

    pub fn complete_submission(
        &mut self,
        form_id: &str,
        result: Result<ContactResponse, ApiError>,
    ) -> Option<Outcome> {
        self.complete_submission_at(form_id, result, Instant::now())
    }

    pub fn complete_submission_at(
        &mut self,
        form_id: &str,
        result: Result<ContactResponse, ApiError>,
        now: Instant,
    ) -> Option<Outcome> {
        self.contact
            .complete(&mut self.doc, &mut self.flash, form_id, result, now)
    }

    /// Send every queued submission through `transport` and apply the
    /// results in order.
    pub async fn settle(&mut self, transport: &dyn ContactTransport) -> Vec<Outcome> {
        let mut outcomes = Vec::new();
        for pending in self.take_submissions() {
            let result = transport.submit(&pending.request).await;
            outcomes.extend(self.complete_submission(&pending.form_id, result));
        }
        outcomes
    }

    // =========================================================================
    // Timers
    // =========================================================================

    /// Remove expired flash messages. Returns how many were removed.
    pub fn tick(&mut self, now: Instant) -> usize {
        self.flash.expire(&mut self.doc, now)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.flash.next_deadline()
    }

    /// Advance running animations one frame. Returns how many still run.
    pub fn frame(&mut self) -> usize {
        self.counters.frame(&mut self.doc)
    }

    pub fn has_animations(&self) -> bool {
        self.counters.is_active()
    }

    /// Elements whose visibility the host should report.
    pub fn observed_elements(&self) -> Vec<String> {
        let mut ids = self.reveal.observed().to_vec();
        for id in self.images.observed() {
            if !ids.contains(id) {
                ids.push(id.clone());
            }
        }
        ids
    }

    // =========================================================================
    // Page actions
    // =========================================================================

    pub fn toggle_menu(&mut self) -> bool {
        self.menu.toggle(&mut self.doc)
    }

    pub fn close_menu(&mut self) {
        self.menu.close(&mut self.doc);
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu.is_open(&self.doc)
    }

    pub fn open_modal(&mut self, id: &str) -> bool {
        modal::open_modal(&mut self.doc, id)
    }

    pub fn close_modal(&mut self, id: &str) -> bool {
        modal::close_modal(&mut self.doc, id)
    }

    pub fn toggle_dark_mode(&mut self) -> bool {
        self.dark_mode.toggle(&mut self.doc)
    }

    pub fn is_dark_mode(&self) -> bool {
        DarkMode::is_on(&self.doc)
    }

    /// Count `id` up to `target`. `None` uses the configured duration.
    pub fn animate_counter(&mut self, id: &str, target: f64, duration: Option<Duration>) -> bool {
        let duration = duration.unwrap_or(self.config.counter_duration);
        self.counters.start(&mut self.doc, id, target, duration)
    }

    /// Copy text and confirm with a flash message.
    pub fn copy_to_clipboard(&mut self, text: &str) -> bool {
        match self.clipboard.write_text(text) {
            Ok(()) => {
                let message = self.config.messages.copied.clone();
                self.flash.notify(&mut self.doc, message, Severity::Success);
                true
            }
            Err(e) => {
                log::error!("copy failed: {e}");
                let message = self.config.messages.copy_failed.clone();
                self.flash.notify(&mut self.doc, message, Severity::Error);
                false
            }
        }
    }

    pub fn scroll_to_top(&mut self) {
        self.effects.push(scroll::scroll_to_top());
    }
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("doc", &self.doc)
            .field("focused", &self.focus.focused())
            .field("contact", &self.contact)
            .field("flash", &self.flash)
            .finish_non_exhaustive()
    }
}
