//! Detail overlay for a single event.
//!
//! The controller is a two-state machine: `Closed` or `Open` with exactly one attached modal.
//! Each open arms one escape listener. The listener goes away with its modal whichever
//! way the modal is closed, so repeated openings never pile up listeners.

use crate::format::{long_form, normalize_description};
use crate::schedule::model::Event;
use crate::seats::SeatGrid;
use tracing::{debug, info};
use voca_rs::escape::escape_html;

/// What to do when an open is requested while a modal is already attached.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum OpenPolicy {
    /// Detach the current modal, then attach the new one.
    #[default]
    Replace,
    /// Keep the current modal and drop the request.
    IgnoreWhileOpen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    Opened,
    Replaced,
    Ignored,
}

/// Where inside the overlay a click landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalTarget {
    Backdrop,
    CloseButton,
    Content,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Escape,
    Other(String),
}

impl From<&str> for Key {
    fn from(key: &str) -> Self {
        match key {
            "Escape" | "Esc" => Key::Escape,
            other => Key::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modal {
    pub event: usize,
    pub title: String,
    pub date: String,
    pub description: String,
    pub seats: SeatGrid,
}

impl Modal {
    pub fn for_event(index: usize, event: &Event) -> Self {
        Self {
            event: index,
            title: event.title.to_string(),
            date: long_form(&event.start),
            description: normalize_description(&event.description, &event.start),
            seats: SeatGrid::new(&event.seats_available),
        }
    }

    pub fn to_html(&self) -> String {
        format!(
            concat!(
                r#"<div class="modal-backdrop" data-event="{}">"#,
                r#"<div class="modal-content" role="dialog" aria-modal="true">"#,
                r#"<button class="modal-close" aria-label="Close">&times;</button>"#,
                r#"<div class="modal-title">{}</div>"#,
                r#"<div class="modal-date">{}</div>"#,
                r#"<div class="modal-description">{}</div>"#,
                "{}",
                "</div></div>"
            ),
            self.event,
            escape_html(&self.title),
            self.date,
            escape_html(&self.description),
            self.seats.to_html()
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(u64);

/// One-shot escape listener bound to the modal that armed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct EscapeListener {
    id: ListenerId,
}

#[derive(Debug)]
enum ModalState {
    Closed,
    Open {
        modal: Modal,
        listener: EscapeListener,
    },
}

#[derive(Debug)]
pub struct ModalController {
    policy: OpenPolicy,
    state: ModalState,
    next_listener: u64,
}

impl ModalController {
    pub fn new(policy: OpenPolicy) -> Self {
        Self {
            policy,
            state: ModalState::Closed,
            next_listener: 0,
        }
    }

    pub fn policy(&self) -> OpenPolicy {
        self.policy
    }

    pub fn current(&self) -> Option<&Modal> {
        match &self.state {
            ModalState::Closed => None,
            ModalState::Open { modal, .. } => Some(modal),
        }
    }

    pub fn is_open(&self) -> bool {
        self.current().is_some()
    }

    /// The armed escape listener, if any. There is never more than one.
    pub fn escape_listener(&self) -> Option<ListenerId> {
        match &self.state {
            ModalState::Closed => None,
            ModalState::Open { listener, .. } => Some(listener.id),
        }
    }

    #[tracing::instrument(skip(self, event), fields(title = %event.title))]
    pub fn open(&mut self, index: usize, event: &Event) -> OpenOutcome {
        let outcome = match (self.is_open(), self.policy) {
            (false, _) => OpenOutcome::Opened,
            (true, OpenPolicy::IgnoreWhileOpen) => {
                debug!("A modal is already open, ignoring");
                return OpenOutcome::Ignored;
            }
            (true, OpenPolicy::Replace) => {
                self.close();
                OpenOutcome::Replaced
            }
        };

        let listener = EscapeListener {
            id: ListenerId(self.next_listener),
        };
        self.next_listener += 1;

        self.state = ModalState::Open {
            modal: Modal::for_event(index, event),
            listener,
        };
        info!("Opened modal");

        outcome
    }

    /// Returns whether the click closed the modal.
    pub fn click(&mut self, target: ModalTarget) -> bool {
        match target {
            ModalTarget::Backdrop | ModalTarget::CloseButton => self.close(),
            ModalTarget::Content => false,
        }
    }

    /// Returns whether the key closed the modal. Keys other than escape leave the listener armed.
    pub fn press_key(&mut self, key: &Key) -> bool {
        match key {
            Key::Escape => self.close(),
            Key::Other(_) => false,
        }
    }

    /// Detaches the modal and disarms its listener. No-op when closed.
    pub fn close(&mut self) -> bool {
        match std::mem::replace(&mut self.state, ModalState::Closed) {
            ModalState::Closed => false,
            ModalState::Open { modal, listener } => {
                debug!(
                    "Closed modal for event #{}, removed listener {:?}",
                    modal.event, listener.id
                );
                true
            }
        }
    }

    pub fn to_html(&self) -> String {
        self.current().map(Modal::to_html).unwrap_or_default()
    }
}

impl Default for ModalController {
    fn default() -> Self {
        Self::new(OpenPolicy::default())
    }
}
