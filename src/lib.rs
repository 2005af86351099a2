// src/lib.rs

//! Lifecycle binding between a platform drawable surface and a native
//! compositing engine.
//!
//! The embedder constructs a [`view::RenderView`] over its
//! [`compositor::Compositor`] implementation, then routes platform
//! surface callbacks, resize notifications, and the compositor's
//! frame-swap signal through it. The controller keeps the drawable
//! surface and the native renderer's surface state in lockstep: create,
//! size-change, and destroy events arrive at the native side in strict
//! order, never against an invalidated handle.
//!
//! Two surface provisioning strategies are supported behind one provider
//! interface, selected by configuration at construction: a persistent
//! buffer-queue surface and a dynamically recreated texture-backed
//! surface.

pub mod color;
pub mod compositor;
pub mod config;
pub mod content;
pub mod surface;
pub mod view;

pub use color::Color;
pub use compositor::{Compositor, RendererHandle, WindowHost};
pub use config::Config;
pub use content::{ContentId, ContentSink};
pub use surface::{
    CompositingStrategy, PixelFormat, SurfaceCallback, SurfaceError, SurfaceEvent, SurfaceHandle,
    SurfaceProvider, Visibility,
};
pub use view::{LifecycleError, ReadinessState, RenderView};
