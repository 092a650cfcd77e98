//! Modal dialogs as awaitable prompts.
//!
//! [`ModalPrompt::request`] splits a dialog into the awaiting side (the
//! prompt, a future) and the side that owns the form (the responder).
//! Dropping the responder without submitting counts as a cancel.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::oneshot;

use crate::element::ElementKind;
use crate::form::FormData;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalOutcome {
    Submitted(FormData),
    Cancelled,
}

/// Resolves once the user submits or dismisses the dialog.
#[derive(Debug)]
pub struct ModalPrompt {
    kind: ElementKind,
    rx: oneshot::Receiver<FormData>,
}

/// The open dialog's form side.
#[derive(Debug)]
pub struct ModalResponder {
    kind: ElementKind,
    tx: oneshot::Sender<FormData>,
}

impl ModalPrompt {
    /// Open a dialog collecting the fields for `kind`.
    pub fn request(kind: ElementKind) -> (ModalPrompt, ModalResponder) {
        let (tx, rx) = oneshot::channel();
        (ModalPrompt { kind, rx }, ModalResponder { kind, tx })
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }
}

impl Future for ModalPrompt {
    type Output = ModalOutcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx).poll(cx).map(|result| match result {
            Ok(form) => ModalOutcome::Submitted(form),
            Err(_) => ModalOutcome::Cancelled,
        })
    }
}

impl ModalResponder {
    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn title(&self) -> &'static str {
        self.kind.modal_title()
    }

    /// OK pressed.
    pub fn submit(self, form: FormData) {
        // The prompt may already be gone; then nobody is waiting.
        let _ = self.tx.send(form);
    }

    /// Cancel, close or Escape.
    pub fn cancel(self) {}
}
