//! Sharing one picker between its views and the application.

use std::cell::{RefCell, RefMut};
use std::rc::Rc;

use floem::reactive::{RwSignal, SignalGet, SignalUpdate};

use crate::picker::ChromaPicker;

/// A picker shared by the wheel view, the slider view, and application code.
///
/// Mutations go through [`SharedPicker::update`], which bumps a reactive
/// revision so every view repaints. The picker's delegate runs inside
/// `update`, so it must use the `&ChromaPicker` it is handed rather than
/// calling back into the `SharedPicker`.
#[derive(Clone)]
pub struct SharedPicker {
    inner: Rc<RefCell<ChromaPicker>>,
    revision: RwSignal<u64>,
}

impl SharedPicker {
    pub fn new(picker: ChromaPicker) -> Self {
        Self {
            inner: Rc::new(RefCell::new(picker)),
            revision: RwSignal::new(0),
        }
    }

    pub fn with<R>(&self, f: impl FnOnce(&ChromaPicker) -> R) -> R {
        f(&self.inner.borrow())
    }

    /// Mutate the picker and notify the views.
    pub fn update<R>(&self, f: impl FnOnce(&mut ChromaPicker) -> R) -> R {
        let result = f(&mut self.inner.borrow_mut());
        self.revision.update(|revision| *revision += 1);
        result
    }

    /// Current revision. Reading it inside an effect subscribes the effect.
    pub fn revision(&self) -> u64 {
        self.revision.get()
    }

    /// Mutable access that does not notify; for layout and paint, which
    /// would otherwise re-trigger themselves.
    pub(crate) fn borrow_mut(&self) -> RefMut<'_, ChromaPicker> {
        self.inner.borrow_mut()
    }
}
