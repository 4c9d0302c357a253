//! Overlay host: the single isolated attachment point in the page.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

use mindspark_protocols::RawSelection;

use crate::style::{stylesheet, CONTAINER_ID, CONTAINER_STYLE};
use crate::view::ViewNode;

/// The host page, as seen by the overlay.
///
/// Implementations attach a style-encapsulated root (a shadow root in a
/// browser) under a single container element.
pub trait HostDocument: Send {
    /// The page's current selection, if any.
    fn current_selection(&self) -> Option<RawSelection>;

    /// Whether a container with `id` is attached to the page body.
    fn has_container(&self, id: &str) -> bool;

    /// Attach a container with an isolated root holding `stylesheet`.
    fn attach_container(&mut self, id: &str, container_style: &str, stylesheet: &str);

    /// Remove the container and everything under it.
    fn detach_container(&mut self, id: &str);

    /// Replace the isolated root's content. `None` empties it.
    fn replace_content(&mut self, id: &str, view: Option<&ViewNode>);
}

/// Lazily attached overlay root.
pub struct OverlayHost<D> {
    document: D,
    attached: bool,
}

impl<D: HostDocument> OverlayHost<D> {
    pub fn new(document: D) -> Self {
        Self {
            document,
            attached: false,
        }
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Attach the container once. Later calls are no-ops.
    ///
    /// A stale container left by an earlier instance is removed first.
    pub fn ensure_attached(&mut self) {
        if self.attached {
            return;
        }
        if self.document.has_container(CONTAINER_ID) {
            debug!("Removing stale overlay container");
            self.document.detach_container(CONTAINER_ID);
        }
        self.document
            .attach_container(CONTAINER_ID, CONTAINER_STYLE, &stylesheet());
        self.attached = true;
        debug!("Overlay container attached");
    }

    /// Render `view` as the overlay's only content.
    pub fn mount(&mut self, view: &ViewNode) {
        self.ensure_attached();
        self.document.replace_content(CONTAINER_ID, Some(view));
    }

    /// Empty the overlay but keep the container.
    pub fn clear(&mut self) {
        if self.attached {
            self.document.replace_content(CONTAINER_ID, None);
        }
    }

    /// Remove the container from the page.
    pub fn unmount(&mut self) {
        if self.attached {
            self.document.detach_container(CONTAINER_ID);
            self.attached = false;
            debug!("Overlay container removed");
        }
    }

    pub fn current_selection(&self) -> Option<RawSelection> {
        self.document.current_selection()
    }
}

/// Observable state of a [`MemoryDocument`].
#[derive(Debug, Default)]
pub struct DocumentState {
    pub selection: Option<RawSelection>,
    /// Ids of attached containers, in attach order.
    pub containers: Vec<String>,
    pub stylesheet: Option<String>,
    pub content: Option<ViewNode>,
    /// Number of times a container was attached.
    pub attach_count: usize,
}

/// In-memory page used by the CLI and by tests.
///
/// Clones share state, so a caller can keep one clone to drive the
/// selection and inspect what the overlay rendered.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    state: Arc<Mutex<DocumentState>>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MutexGuard<'_, DocumentState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn set_selection(&self, selection: Option<RawSelection>) {
        self.state().selection = selection;
    }

    pub fn content(&self) -> Option<ViewNode> {
        self.state().content.clone()
    }

    pub fn container_count(&self) -> usize {
        self.state().containers.len()
    }
}

impl HostDocument for MemoryDocument {
    fn current_selection(&self) -> Option<RawSelection> {
        self.state().selection.clone()
    }

    fn has_container(&self, id: &str) -> bool {
        self.state().containers.iter().any(|c| c == id)
    }

    fn attach_container(&mut self, id: &str, _container_style: &str, stylesheet: &str) {
        let mut state = self.state();
        state.containers.push(id.to_string());
        state.stylesheet = Some(stylesheet.to_string());
        state.attach_count += 1;
    }

    fn detach_container(&mut self, id: &str) {
        let mut state = self.state();
        state.containers.retain(|c| c != id);
        state.content = None;
    }

    fn replace_content(&mut self, _id: &str, view: Option<&ViewNode>) {
        self.state().content = view.cloned();
    }
}
