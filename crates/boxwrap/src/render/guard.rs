//! Scoped drawing state
//!
//! Both guards restore the compositor on drop, so an early return with `?`
//! leaves the backend exactly as it was found.

use std::ops::{Deref, DerefMut};

use super::{Compositor, ImageId};

/// Pushes a default drawing context for as long as it lives
pub struct DefaultContext<'a, C: Compositor + ?Sized> {
    compositor: &'a mut C,
}

impl<'a, C: Compositor + ?Sized> DefaultContext<'a, C> {
    pub fn new(compositor: &'a mut C) -> Self {
        compositor.push_context();
        Self { compositor }
    }
}

impl<C: Compositor + ?Sized> Deref for DefaultContext<'_, C> {
    type Target = C;

    fn deref(&self) -> &C {
        self.compositor
    }
}

impl<C: Compositor + ?Sized> DerefMut for DefaultContext<'_, C> {
    fn deref_mut(&mut self) -> &mut C {
        self.compositor
    }
}

impl<C: Compositor + ?Sized> Drop for DefaultContext<'_, C> {
    fn drop(&mut self) {
        self.compositor.pop_context();
    }
}

/// Disables the undo history of one image for as long as it lives
pub struct PausedUndo<'a, C: Compositor + ?Sized> {
    compositor: &'a mut C,
    image: ImageId,
}

impl<'a, C: Compositor + ?Sized> PausedUndo<'a, C> {
    pub fn new(compositor: &'a mut C, image: ImageId) -> Self {
        compositor.set_undo_enabled(image, false);
        Self { compositor, image }
    }
}

impl<C: Compositor + ?Sized> Deref for PausedUndo<'_, C> {
    type Target = C;

    fn deref(&self) -> &C {
        self.compositor
    }
}

impl<C: Compositor + ?Sized> DerefMut for PausedUndo<'_, C> {
    fn deref_mut(&mut self) -> &mut C {
        self.compositor
    }
}

impl<C: Compositor + ?Sized> Drop for PausedUndo<'_, C> {
    fn drop(&mut self) {
        self.compositor.set_undo_enabled(self.image, true);
    }
}
