// src/compositor/mod.rs

//! The native compositor boundary.
//!
//! Defines the `Compositor` trait (the one-directional set of lifecycle
//! calls this layer makes into native renderer state) and the owned
//! `RendererHandle` resource that every one of those calls requires.
//!
//! Calls are strictly outbound. The only path back from the compositor is
//! the frame-swapped notification, which the embedder marshals onto the
//! UI thread and delivers through `RenderView::notify_frame_swapped`.

use crate::content::ContentId;
use crate::surface::{PixelFormat, SurfaceHandle};
use anyhow::Result;
use log::warn;
use std::num::NonZeroU64;

#[cfg(test)]
pub mod mock;

/// Opaque token identifying native renderer state.
///
/// Issued by [`Compositor::init`] and invalidated (zeroed) by
/// [`Compositor::destroy`]. The controller owns exactly one; no other
/// strong reference exists. Using a handle after invalidation is a
/// programming error and trips a debug assertion.
///
/// Invalidation is explicit, performed by the owning `Compositor::destroy`
/// implementation. `Drop` only logs a warning if a still-valid handle is
/// discarded, mirroring the cleanup-then-drop discipline used for other
/// platform resources in this codebase.
#[derive(Debug)]
pub struct RendererHandle {
    raw: u64,
}

impl RendererHandle {
    /// Wraps a freshly created native renderer token. Non-zero by
    /// construction; zero is reserved as the invalidated sentinel.
    pub fn new(raw: NonZeroU64) -> Self {
        RendererHandle { raw: raw.get() }
    }

    /// The raw native token.
    ///
    /// # Panics
    /// Debug builds panic if the handle has been invalidated.
    pub fn raw(&self) -> u64 {
        debug_assert!(self.raw != 0, "use of invalidated renderer handle");
        self.raw
    }

    /// Whether the handle still refers to live native state.
    pub fn is_valid(&self) -> bool {
        self.raw != 0
    }

    /// Zeroes the handle. Called by `Compositor::destroy` implementations
    /// once the native state is gone.
    ///
    /// # Panics
    /// Debug builds panic on double invalidation.
    pub fn invalidate(&mut self) {
        debug_assert!(self.raw != 0, "renderer handle invalidated twice");
        self.raw = 0;
    }
}

impl Drop for RendererHandle {
    fn drop(&mut self) {
        if self.raw != 0 {
            warn!(
                "RendererHandle {} dropped while still valid; Compositor::destroy was not called",
                self.raw
            );
        }
    }
}

/// The embedder's window context (the platform window this view lives in).
///
/// Handed to [`Compositor::init`] so the native side can bind renderer
/// state to the window, and kept by the controller to relay window
/// visibility changes. Concrete compositor implementations know their own
/// concrete host type.
pub trait WindowHost {
    /// The embedding window's visibility changed.
    fn on_visibility_changed(&self, visible: bool);
}

/// Lifecycle calls into native renderer state.
///
/// Implemented by the embedder's FFI layer. Every method other than
/// `init` takes the handle issued by `init`; the controller guarantees the
/// handle is valid at each call site and that surface lifecycle calls
/// arrive in strict `created → changed* → destroyed` order per surface
/// instance. After `surface_destroyed` returns, the native side must
/// treat any reference to that surface as permanently invalid.
pub trait Compositor {
    /// Constructs native renderer state bound to the platform window.
    /// Called exactly once, after the native runtime is loaded and before
    /// any surface event is delivered.
    fn init(&mut self, host: &dyn WindowHost) -> Result<RendererHandle>;

    /// Tears down native renderer state. Must invalidate the handle.
    fn destroy(&mut self, handle: &mut RendererHandle);

    /// Binds (or, with `None`, unbinds) the active content object.
    fn set_content(&mut self, handle: &RendererHandle, content: Option<ContentId>);

    /// The physical backing of the drawable changed size; tagged with the
    /// content object the change applies to.
    fn on_physical_backing_size_changed(
        &mut self,
        handle: &RendererHandle,
        content: ContentId,
        width: u32,
        height: u32,
    );

    /// A drawable surface now exists.
    fn surface_created(&mut self, handle: &RendererHandle);

    /// The drawable surface changed size or format. `surface` is the
    /// current live handle; the native side may replace its compositing
    /// surface when the format changes.
    fn surface_changed(
        &mut self,
        handle: &RendererHandle,
        format: PixelFormat,
        width: u32,
        height: u32,
        surface: &SurfaceHandle,
    );

    /// The drawable surface is going away. The provider releases the
    /// underlying handle immediately after this returns.
    fn surface_destroyed(&mut self, handle: &RendererHandle);

    /// Enter or leave overlay video mode.
    fn set_overlay_video_mode(&mut self, handle: &RendererHandle, enabled: bool);
}
