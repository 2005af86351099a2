// src/view/mod.rs

//! The surface lifecycle controller.
//!
//! `RenderView` owns a surface provider and the compositor boundary,
//! validates renderer-handle liveness, forwards lifecycle events in
//! strict order, tracks readiness, and exposes the first-frame gate to
//! the embedder. All methods run synchronously on the embedder's UI
//! thread and process each event to completion before the next one is
//! delivered; destruction is the only cancellation primitive.

use crate::color::Color;
use crate::compositor::{Compositor, RendererHandle, WindowHost};
use crate::config::{Config, CONFIG};
use crate::content::ContentSink;
use crate::surface::{
    CompositingStrategy, PersistentSurfaceProvider, PixelFormat, SurfaceCallback, SurfaceError,
    SurfaceEvent, SurfaceProvider, TextureBackedProvider, Visibility,
};
use log::{debug, info, trace, warn};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

pub mod policy;

use policy::VisibilityReassertPolicy;

/// Readiness of the current surface instance. Progression is monotonic
/// within one create→destroy cycle and resets to `NotReady` when the
/// surface is destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadinessState {
    NotReady,
    SurfaceCreated,
    FirstFrameRendered,
}

/// Contract violations at the lifecycle seam.
///
/// None of these are recoverable runtime conditions; they indicate a
/// caller or platform ordering bug that would previously have been an
/// assertion or undefined rendering state.
#[derive(Debug)]
pub enum LifecycleError {
    /// A call that requires the renderer handle arrived before
    /// `initialize` or after `teardown`.
    NotInitialized,
    /// `initialize` was called twice.
    AlreadyInitialized,
    /// A surface was already live when `initialize` ran; the platform
    /// delivered lifecycle events out of order.
    SurfaceBeforeInit,
    /// The provider rejected a platform callback.
    Surface(SurfaceError),
    /// The native renderer failed to construct its state.
    CompositorInit(anyhow::Error),
}

impl fmt::Display for LifecycleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecycleError::NotInitialized => {
                write!(f, "renderer handle is not initialized (or already torn down)")
            }
            LifecycleError::AlreadyInitialized => {
                write!(f, "native renderer state is already initialized")
            }
            LifecycleError::SurfaceBeforeInit => write!(
                f,
                "a surface is already live before renderer initialization"
            ),
            LifecycleError::Surface(e) => e.fmt(f),
            LifecycleError::CompositorInit(e) => {
                write!(f, "native renderer initialization failed: {}", e)
            }
        }
    }
}

impl std::error::Error for LifecycleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LifecycleError::Surface(e) => Some(e),
            LifecycleError::CompositorInit(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

impl From<SurfaceError> for LifecycleError {
    fn from(e: SurfaceError) -> Self {
        LifecycleError::Surface(e)
    }
}

/// Binds a platform drawable surface to native renderer state.
///
/// Owns the surface provider (one of two strategies, fixed at
/// construction) and the one renderer handle. The embedder routes raw
/// platform surface callbacks through [`handle_surface_callback`], resize
/// and visibility notifications through [`on_resized`] and
/// [`on_window_visibility_changed`], and the compositor's frame-swap
/// signal through [`notify_frame_swapped`].
///
/// [`handle_surface_callback`]: RenderView::handle_surface_callback
/// [`on_resized`]: RenderView::on_resized
/// [`on_window_visibility_changed`]: RenderView::on_window_visibility_changed
/// [`notify_frame_swapped`]: RenderView::notify_frame_swapped
pub struct RenderView {
    compositor: Box<dyn Compositor>,
    provider: Box<dyn SurfaceProvider>,
    handle: Option<RendererHandle>,
    window_host: Option<Rc<dyn WindowHost>>,
    content: Option<Weak<RefCell<dyn ContentSink>>>,
    viewport: (u32, u32),
    readiness: ReadinessState,
    first_frame_listener: Option<Box<dyn FnMut()>>,
    ready_hook: Option<Box<dyn FnMut()>>,
    visibility_policy: VisibilityReassertPolicy,
}

impl RenderView {
    /// Creates a controller with the default configuration.
    pub fn new(compositor: Box<dyn Compositor>) -> Self {
        Self::with_config(compositor, &CONFIG)
    }

    /// Creates a controller, selecting the provider strategy and
    /// workaround policy from `config`.
    pub fn with_config(compositor: Box<dyn Compositor>, config: &Config) -> Self {
        let provider: Box<dyn SurfaceProvider> = match config.view.strategy {
            CompositingStrategy::PersistentSurface => {
                Box::new(PersistentSurfaceProvider::new(&config.view))
            }
            CompositingStrategy::TextureBacked => {
                Box::new(TextureBackedProvider::new(&config.view))
            }
        };
        Self::with_provider(compositor, provider, config)
    }

    /// Creates a controller over an explicit provider, for embedders
    /// supplying their own [`SurfaceProvider`] implementation.
    pub fn with_provider(
        compositor: Box<dyn Compositor>,
        provider: Box<dyn SurfaceProvider>,
        config: &Config,
    ) -> Self {
        debug!(
            "RenderView created with {:?} strategy",
            provider.strategy()
        );
        RenderView {
            compositor,
            provider,
            handle: None,
            window_host: None,
            content: None,
            viewport: (0, 0),
            readiness: ReadinessState::NotReady,
            first_frame_listener: None,
            ready_hook: None,
            visibility_policy: VisibilityReassertPolicy::from_config(&config.workarounds),
        }
    }

    /// Constructs native renderer state bound to the platform window.
    ///
    /// Must be called exactly once, after the native runtime is loaded
    /// and before any surface event is delivered. A surface that is
    /// already live at this point signals a platform-lifecycle ordering
    /// bug. Under the persistent strategy the surface container, held
    /// hidden until now, is shown.
    pub fn initialize(&mut self, host: Rc<dyn WindowHost>) -> Result<(), LifecycleError> {
        if self.handle.is_some() {
            return Err(LifecycleError::AlreadyInitialized);
        }
        if self.provider.current_surface().is_some() {
            return Err(LifecycleError::SurfaceBeforeInit);
        }
        let handle = self
            .compositor
            .init(host.as_ref())
            .map_err(LifecycleError::CompositorInit)?;
        info!("native renderer initialized (handle {})", handle.raw());
        self.handle = Some(handle);
        self.window_host = Some(host);
        self.provider.set_visibility(Visibility::Visible);
        Ok(())
    }

    /// Routes one raw platform surface callback through the provider and
    /// forwards the resulting lifecycle events to the compositor.
    pub fn handle_surface_callback(
        &mut self,
        callback: SurfaceCallback,
    ) -> Result<(), LifecycleError> {
        if self.handle.is_none() {
            return Err(LifecycleError::NotInitialized);
        }
        trace!("surface callback: {}", callback.name());
        let events = self.provider.ingest(callback)?;
        for event in events {
            self.apply_surface_event(event);
        }
        Ok(())
    }

    fn apply_surface_event(&mut self, event: SurfaceEvent) {
        match event {
            SurfaceEvent::Created => {
                if let Some(handle) = self.handle.as_ref() {
                    self.compositor.surface_created(handle);
                }
                self.visibility_policy
                    .after_surface_created(self.provider.as_mut());
                self.readiness = ReadinessState::SurfaceCreated;
                debug!("surface created; view is ready to render");
                if let Some(hook) = self.ready_hook.as_mut() {
                    hook();
                }
            }
            SurfaceEvent::Changed {
                format,
                width,
                height,
            } => {
                let handle = match self.handle.as_ref() {
                    Some(handle) => handle,
                    None => return,
                };
                let surface = match self.provider.current_surface() {
                    Some(surface) => surface,
                    None => {
                        // Defensive: never forward a stale handle.
                        warn!("surface-changed with no live surface; dropping");
                        return;
                    }
                };
                self.compositor
                    .surface_changed(handle, format, width, height, surface);
                if let Some(weak) = self.content.as_ref() {
                    if let Some(sink) = weak.upgrade() {
                        let sink = sink.borrow();
                        self.compositor.on_physical_backing_size_changed(
                            handle,
                            sink.content_id(),
                            width,
                            height,
                        );
                    }
                }
                self.viewport = (width, height);
            }
            SurfaceEvent::Destroyed => {
                if let Some(handle) = self.handle.as_ref() {
                    self.compositor.surface_destroyed(handle);
                }
                // Forward destruction first, then free the drawable; the
                // released handle must never reach the compositor again.
                self.provider.release_surface();
                self.readiness = ReadinessState::NotReady;
                debug!("surface destroyed; readiness reset");
            }
        }
    }

    /// The embedding container was resized. Caches the viewport and
    /// relays the logical size to the bound content object.
    pub fn on_resized(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
        if let Some(weak) = self.content.as_ref() {
            if let Some(sink) = weak.upgrade() {
                sink.borrow_mut().set_size(width, height);
            }
        }
    }

    /// The embedding window's visibility changed; relayed to the window
    /// host. Ignored before initialization.
    pub fn on_window_visibility_changed(&self, visible: bool) {
        match self.window_host.as_ref() {
            Some(host) => host.on_visibility_changed(visible),
            None => trace!("window visibility changed before initialization; ignored"),
        }
    }

    /// Binds a content object, or unbinds with `None`. The current
    /// viewport is relayed to the sink and the renderer immediately,
    /// even when it is still `(0, 0)`. Only one sink is bound at a time;
    /// rebinding replaces, but does not destroy, the previous one.
    pub fn set_content_sink(
        &mut self,
        sink: Option<&Rc<RefCell<dyn ContentSink>>>,
    ) -> Result<(), LifecycleError> {
        let handle = match self.handle.as_ref() {
            Some(handle) => handle,
            None => return Err(LifecycleError::NotInitialized),
        };
        match sink {
            Some(rc) => {
                self.content = Some(Rc::downgrade(rc));
                let (width, height) = self.viewport;
                let mut sink = rc.borrow_mut();
                sink.set_size(width, height);
                let id = sink.content_id();
                self.compositor
                    .on_physical_backing_size_changed(handle, id, width, height);
                self.compositor.set_content(handle, Some(id));
                debug!("content sink {:?} bound at {}x{}", id, width, height);
            }
            None => {
                self.content = None;
                self.compositor.set_content(handle, None);
                debug!("content sink unbound");
            }
        }
        Ok(())
    }

    /// Enters or leaves overlay video mode. The persistent strategy also
    /// switches the container's requested pixel format (translucent when
    /// enabled, opaque otherwise); the texture strategy has no format
    /// request and only the renderer is notified.
    pub fn set_overlay_mode(&mut self, enabled: bool) -> Result<(), LifecycleError> {
        let handle = match self.handle.as_ref() {
            Some(handle) => handle,
            None => return Err(LifecycleError::NotInitialized),
        };
        let format = if enabled {
            PixelFormat::Translucent
        } else {
            PixelFormat::Opaque
        };
        self.provider.request_pixel_format(format);
        self.compositor.set_overlay_video_mode(handle, enabled);
        Ok(())
    }

    /// Places the surface on top of its window. Persistent strategy
    /// only; a logged no-op under the texture strategy.
    pub fn set_z_order_on_top(&mut self, on_top: bool) {
        self.provider.set_z_order_on_top(on_top);
    }

    /// Paints a placeholder background on the surface container.
    pub fn set_surface_background_color(&mut self, color: Color) {
        self.provider.set_background_color(color);
    }

    /// Registers the single first-frame listener slot; re-registration
    /// replaces. If the first frame of the current surface instance has
    /// already been rendered, the listener fires synchronously now,
    /// exactly once.
    pub fn register_first_frame_listener(&mut self, listener: Box<dyn FnMut()>) {
        self.first_frame_listener = Some(listener);
        if self.readiness == ReadinessState::FirstFrameRendered {
            debug!("first frame already rendered; replaying to late listener");
            if let Some(listener) = self.first_frame_listener.as_mut() {
                listener();
            }
        }
    }

    /// Installs the hook invoked whenever the view becomes ready to
    /// render (surface created).
    pub fn set_ready_to_render_hook(&mut self, hook: Box<dyn FnMut()>) {
        self.ready_hook = Some(hook);
    }

    /// A frame was swapped into the surface. Advances readiness to
    /// `FirstFrameRendered` and fires the registered listener at most
    /// once per create→destroy cycle. Independently of that gate, the
    /// provider drops its placeholder background; the post-swap hook
    /// runs on every swap, gated only by the background still existing.
    pub fn notify_frame_swapped(&mut self) {
        self.provider.clear_placeholder_background();
        if self.readiness == ReadinessState::SurfaceCreated {
            self.readiness = ReadinessState::FirstFrameRendered;
            debug!("first frame rendered");
            if let Some(listener) = self.first_frame_listener.as_mut() {
                listener();
            }
        }
    }

    /// Whether a drawable surface currently exists.
    pub fn is_initialized(&self) -> bool {
        self.provider.current_surface().is_some()
    }

    /// The controller's cached viewport.
    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    pub fn readiness(&self) -> ReadinessState {
        self.readiness
    }

    pub fn strategy(&self) -> CompositingStrategy {
        self.provider.strategy()
    }

    /// The surface provider, for embedders applying requested container
    /// state (visibility, pixel format, background) to platform views.
    pub fn provider(&self) -> &dyn SurfaceProvider {
        self.provider.as_ref()
    }

    /// Invalidates the renderer handle and drops the window host. After
    /// this, every lifecycle call is rejected with `NotInitialized`;
    /// double teardown is a caller error surfaced the same way.
    pub fn teardown(&mut self) -> Result<(), LifecycleError> {
        let mut handle = match self.handle.take() {
            Some(handle) => handle,
            None => return Err(LifecycleError::NotInitialized),
        };
        self.window_host = None;
        self.compositor.destroy(&mut handle);
        debug_assert!(
            !handle.is_valid(),
            "Compositor::destroy must invalidate the handle"
        );
        info!("native renderer destroyed");
        Ok(())
    }
}
