// src/surface/mod.rs

//! Drawable surface provisioning.
//!
//! Defines the `SurfaceProvider` trait and the common types shared by the
//! two backing strategies: a persistent buffer-queue surface whose handle
//! identity is stable across resizes, and a texture-backed surface whose
//! handle is re-minted whenever the texture's buffer producer changes.
//!
//! A provider translates raw platform callbacks into the canonical
//! `Created → Changed* → Destroyed` event sequence and owns the one live
//! [`SurfaceHandle`]. All lifecycle policy lives above the trait, in the
//! controller; strategy-specific *operations* a strategy does not support
//! (pixel-format requests, z-order) default to logged no-ops rather than
//! errors.
//!
//! Providers track requested platform-view state (visibility, pixel
//! format, background) as a pull model: the embedder applies the current
//! requests to its actual view objects after driving the controller.

use crate::color::Color;
use log::{trace, warn};
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod persistent;
pub mod texture;
#[cfg(test)]
mod tests;

pub use persistent::PersistentSurfaceProvider;
pub use texture::TextureBackedProvider;

/// Which concrete provider backs a controller. Fixed at construction;
/// exactly one strategy is active per controller instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompositingStrategy {
    /// Persistent buffer-queue surface; better compositing performance,
    /// stable handle identity, no view-hierarchy animation support.
    PersistentSurface,
    /// Texture-backed surface; animatable in the view hierarchy, handle
    /// re-minted whenever the backing producer is recreated.
    TextureBacked,
}

/// Pixel format reported with surface changes and requested on the
/// persistent surface container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    Opaque,
    Translucent,
    /// Fixed format reported for texture-backed surfaces. The backing
    /// producer of a texture is never format-switched, so the native side
    /// only needs a stable value here, not a real one.
    Rgba8888,
}

/// Visibility tri-state of the persistent surface container, controlled
/// by the embedding view hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Invisible but still laid out.
    Hidden,
    Visible,
    /// Invisible and excluded from layout.
    Gone,
}

/// The concrete drawable surface, owned exclusively by its provider.
///
/// Identity (`id`) is stable for as long as the underlying buffer
/// producer is unchanged and distinct across destroy/recreate cycles.
/// The controller only borrows the handle while forwarding a call; after
/// `release` the handle must never be dereferenced again.
#[derive(Debug)]
pub struct SurfaceHandle {
    id: u64,
    released: bool,
}

impl SurfaceHandle {
    /// Mints a handle for a new drawable. Provider implementations issue
    /// ids starting at 1; zero is reserved.
    pub fn new(id: u64) -> Self {
        debug_assert!(id != 0, "surface handle ids start at 1");
        SurfaceHandle {
            id,
            released: false,
        }
    }

    /// Identity of the underlying drawable.
    ///
    /// # Panics
    /// Debug builds panic if the handle has been released.
    pub fn id(&self) -> u64 {
        debug_assert!(!self.released, "use of released surface handle");
        self.id
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Frees the underlying native resource. Exactly once; called from
    /// the owning provider's `release_surface`.
    pub fn release(&mut self) {
        debug_assert!(!self.released, "surface handle released twice");
        self.released = true;
    }
}

impl Drop for SurfaceHandle {
    fn drop(&mut self) {
        if !self.released {
            warn!(
                "SurfaceHandle {} dropped without release; destroy callback never delivered?",
                self.id
            );
        }
    }
}

/// Raw surface callbacks as the platform delivers them. The first three
/// belong to the persistent strategy, the rest to the texture-backed one;
/// delivering a callback to the wrong strategy is an embedder wiring bug.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceCallback {
    /// The persistent surface now exists.
    Created,
    /// The persistent surface changed format or size.
    Changed {
        format: PixelFormat,
        width: u32,
        height: u32,
    },
    /// The persistent surface is being torn down.
    Destroyed,
    /// The texture's buffer producer became available.
    TextureAvailable { width: u32, height: u32 },
    /// The texture changed size with the producer unchanged.
    TextureSizeChanged { width: u32, height: u32 },
    /// The texture's buffer producer is going away.
    TextureDestroyed,
}

impl SurfaceCallback {
    /// Short name used in logs and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            SurfaceCallback::Created => "surface-created",
            SurfaceCallback::Changed { .. } => "surface-changed",
            SurfaceCallback::Destroyed => "surface-destroyed",
            SurfaceCallback::TextureAvailable { .. } => "texture-available",
            SurfaceCallback::TextureSizeChanged { .. } => "texture-size-changed",
            SurfaceCallback::TextureDestroyed => "texture-destroyed",
        }
    }
}

/// Canonical lifecycle events a provider emits after normalizing raw
/// callbacks. Strictly ordered `Created → Changed* → Destroyed` per
/// surface instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceEvent {
    Created,
    Changed {
        format: PixelFormat,
        width: u32,
        height: u32,
    },
    Destroyed,
}

/// Contract violations detected while normalizing platform callbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// A callback arrived that the lifecycle state machine cannot accept,
    /// e.g. a size change before any surface was created.
    OutOfOrder {
        callback: &'static str,
        state: &'static str,
    },
    /// A callback for the other strategy was delivered to this provider.
    StrategyMismatch {
        callback: &'static str,
        strategy: CompositingStrategy,
    },
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceError::OutOfOrder { callback, state } => write!(
                f,
                "surface callback '{}' arrived out of order (provider state: {})",
                callback, state
            ),
            SurfaceError::StrategyMismatch { callback, strategy } => write!(
                f,
                "surface callback '{}' does not apply to the {:?} strategy",
                callback, strategy
            ),
        }
    }
}

impl std::error::Error for SurfaceError {}

/// A backing strategy for the drawable surface.
///
/// Implementations guarantee at most one live [`SurfaceHandle`] at a time
/// and strict `Created → Changed* → Destroyed` event ordering. Operations
/// a strategy does not support are logged no-ops by default, not errors.
pub trait SurfaceProvider {
    fn strategy(&self) -> CompositingStrategy;

    /// Normalizes one raw platform callback into canonical lifecycle
    /// events, updating the owned handle as required.
    ///
    /// A stale size change after the surface was destroyed yields no
    /// events (defensive; the platform may race teardown). Everything
    /// else out of order is a [`SurfaceError`].
    fn ingest(&mut self, callback: SurfaceCallback) -> Result<Vec<SurfaceEvent>, SurfaceError>;

    /// The live surface, if one exists.
    fn current_surface(&self) -> Option<&SurfaceHandle>;

    /// Releases the live surface's underlying resource and discards the
    /// handle. Called by the controller after destruction has been
    /// forwarded to the compositor, never before.
    fn release_surface(&mut self);

    /// Current visibility request for the surface container.
    fn visibility(&self) -> Visibility {
        Visibility::Visible
    }

    /// Requests container visibility. No-op for strategies without an
    /// explicit visibility state.
    fn set_visibility(&mut self, visibility: Visibility) {
        trace!(
            "set_visibility({:?}) ignored by the {:?} strategy",
            visibility,
            self.strategy()
        );
    }

    /// Requests a pixel format on the surface container. No-op for
    /// strategies without a format request.
    fn request_pixel_format(&mut self, format: PixelFormat) {
        trace!(
            "request_pixel_format({:?}) ignored by the {:?} strategy",
            format,
            self.strategy()
        );
    }

    /// Currently requested pixel format, if the strategy has one.
    fn requested_pixel_format(&self) -> Option<PixelFormat> {
        None
    }

    /// Places the surface on top of its window. No-op for strategies
    /// without z-order control.
    fn set_z_order_on_top(&mut self, on_top: bool) {
        trace!(
            "set_z_order_on_top({}) ignored by the {:?} strategy",
            on_top,
            self.strategy()
        );
    }

    /// Paints a placeholder background on the surface container.
    fn set_background_color(&mut self, color: Color);

    /// The placeholder background, if still present.
    fn background_color(&self) -> Option<Color>;

    /// Drops the placeholder background. Invoked from the post-swap hook
    /// once real frames are landing.
    fn clear_placeholder_background(&mut self);
}
