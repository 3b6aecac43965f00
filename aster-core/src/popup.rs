//! Popup-window registry.
//!
//! Surfaces register the popup windows they own at construction time; the
//! `toggle-popup` command flips their visibility by id.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use aster_types::SurfaceId;

/// Visibility mutation the command dispatcher delegates to.
pub trait PopupRegistry {
    /// Flip visibility. Returns the new state, or `None` if no window has this id.
    fn toggle(&mut self, id: &SurfaceId) -> Option<bool>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PopupWindow {
    pub visible: bool,
}

#[derive(Debug, Default)]
pub struct PopupWindows {
    windows: BTreeMap<SurfaceId, PopupWindow>,
}

/// Registry shared between surfaces and the dispatcher on the main thread.
pub type SharedPopups = Rc<RefCell<PopupWindows>>;

impl PopupWindows {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a hidden window. Returns false if the id was already registered.
    pub fn register(&mut self, id: SurfaceId) -> bool {
        if self.windows.contains_key(&id) {
            log::warn!("popup {} registered twice", id);
            return false;
        }
        self.windows.insert(id, PopupWindow::default());
        true
    }

    /// Returns false if the id is unknown.
    pub fn set_visible(&mut self, id: &SurfaceId, visible: bool) -> bool {
        match self.windows.get_mut(id) {
            Some(window) => {
                window.visible = visible;
                true
            }
            None => false,
        }
    }

    pub fn is_visible(&self, id: &SurfaceId) -> Option<bool> {
        self.windows.get(id).map(|w| w.visible)
    }

    pub fn visible_ids(&self) -> Vec<SurfaceId> {
        self.windows
            .iter()
            .filter(|(_, w)| w.visible)
            .map(|(id, _)| id.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}

impl PopupRegistry for PopupWindows {
    fn toggle(&mut self, id: &SurfaceId) -> Option<bool> {
        let window = self.windows.get_mut(id)?;
        window.visible = !window.visible;
        Some(window.visible)
    }
}

impl<T: PopupRegistry> PopupRegistry for Rc<RefCell<T>> {
    fn toggle(&mut self, id: &SurfaceId) -> Option<bool> {
        self.borrow_mut().toggle(id)
    }
}
