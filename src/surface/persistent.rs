// src/surface/persistent.rs

//! Persistent buffer-queue surface strategy.
//!
//! Wraps a platform surface container whose underlying buffer queue is
//! stable across resizes: only format and dimensions change, the handle
//! identity does not. Visibility is an explicit tri-state controlled by
//! the embedding container, starting `Hidden` until native initialization
//! completes.

use crate::color::Color;
use crate::config::ViewConfig;
use crate::surface::{
    CompositingStrategy, PixelFormat, SurfaceCallback, SurfaceError, SurfaceEvent, SurfaceHandle,
    SurfaceProvider, Visibility,
};
use log::{debug, trace, warn};

pub struct PersistentSurfaceProvider {
    surface: Option<SurfaceHandle>,
    /// True once any surface has existed; distinguishes "changed before
    /// first create" (contract violation) from "stale change after
    /// destroy" (defensive no-op).
    ever_created: bool,
    next_surface_id: u64,
    visibility: Visibility,
    /// Bumped every time visibility must be (re-)applied to the platform
    /// view, including re-assertions where the value is unchanged.
    visibility_epoch: u64,
    requested_format: PixelFormat,
    z_order_on_top: bool,
    media_overlay: bool,
    background: Option<Color>,
}

impl PersistentSurfaceProvider {
    pub fn new(config: &ViewConfig) -> Self {
        PersistentSurfaceProvider {
            surface: None,
            ever_created: false,
            next_surface_id: 1,
            // Hidden until the native side is initialized; the controller
            // shows the container once init completes.
            visibility: Visibility::Hidden,
            visibility_epoch: 0,
            requested_format: PixelFormat::Opaque,
            z_order_on_top: false,
            media_overlay: config.media_overlay,
            background: Some(config.background),
        }
    }

    /// Whether the surface is requested as a media overlay, decided at
    /// construction from config.
    pub fn is_media_overlay(&self) -> bool {
        self.media_overlay
    }

    pub fn z_order_on_top(&self) -> bool {
        self.z_order_on_top
    }

    /// Counts visibility applications, including same-value re-asserts.
    /// The embedder re-applies visibility to the platform view whenever
    /// this advances.
    pub fn visibility_epoch(&self) -> u64 {
        self.visibility_epoch
    }

    fn state_name(&self) -> &'static str {
        if self.surface.is_some() {
            "live"
        } else if self.ever_created {
            "retired"
        } else {
            "idle"
        }
    }
}

impl SurfaceProvider for PersistentSurfaceProvider {
    fn strategy(&self) -> CompositingStrategy {
        CompositingStrategy::PersistentSurface
    }

    fn ingest(&mut self, callback: SurfaceCallback) -> Result<Vec<SurfaceEvent>, SurfaceError> {
        match callback {
            SurfaceCallback::Created => {
                if self.surface.is_some() {
                    return Err(SurfaceError::OutOfOrder {
                        callback: callback.name(),
                        state: self.state_name(),
                    });
                }
                let id = self.next_surface_id;
                self.next_surface_id += 1;
                self.surface = Some(SurfaceHandle::new(id));
                self.ever_created = true;
                debug!("persistent surface {} created", id);
                Ok(vec![SurfaceEvent::Created])
            }
            SurfaceCallback::Changed {
                format,
                width,
                height,
            } => match self.surface {
                Some(ref surface) => {
                    trace!(
                        "persistent surface {} changed: {:?} {}x{}",
                        surface.id(),
                        format,
                        width,
                        height
                    );
                    Ok(vec![SurfaceEvent::Changed {
                        format,
                        width,
                        height,
                    }])
                }
                None if self.ever_created => {
                    warn!("stale surface-changed after destroy; dropping");
                    Ok(Vec::new())
                }
                None => Err(SurfaceError::OutOfOrder {
                    callback: callback.name(),
                    state: self.state_name(),
                }),
            },
            SurfaceCallback::Destroyed => {
                if self.surface.is_none() {
                    return Err(SurfaceError::OutOfOrder {
                        callback: callback.name(),
                        state: self.state_name(),
                    });
                }
                Ok(vec![SurfaceEvent::Destroyed])
            }
            SurfaceCallback::TextureAvailable { .. }
            | SurfaceCallback::TextureSizeChanged { .. }
            | SurfaceCallback::TextureDestroyed => Err(SurfaceError::StrategyMismatch {
                callback: callback.name(),
                strategy: self.strategy(),
            }),
        }
    }

    fn current_surface(&self) -> Option<&SurfaceHandle> {
        self.surface.as_ref()
    }

    fn release_surface(&mut self) {
        match self.surface.take() {
            Some(mut surface) => {
                debug!("persistent surface {} released", surface.id());
                surface.release();
            }
            None => warn!("release_surface with no live surface"),
        }
    }

    fn visibility(&self) -> Visibility {
        self.visibility
    }

    fn set_visibility(&mut self, visibility: Visibility) {
        trace!(
            "persistent surface visibility {:?} -> {:?}",
            self.visibility,
            visibility
        );
        self.visibility = visibility;
        self.visibility_epoch += 1;
    }

    fn request_pixel_format(&mut self, format: PixelFormat) {
        debug!(
            "persistent surface pixel format {:?} -> {:?}",
            self.requested_format, format
        );
        self.requested_format = format;
    }

    fn requested_pixel_format(&self) -> Option<PixelFormat> {
        Some(self.requested_format)
    }

    fn set_z_order_on_top(&mut self, on_top: bool) {
        trace!("persistent surface z-order-on-top: {}", on_top);
        self.z_order_on_top = on_top;
    }

    fn set_background_color(&mut self, color: Color) {
        self.background = Some(color);
    }

    fn background_color(&self) -> Option<Color> {
        self.background
    }

    fn clear_placeholder_background(&mut self) {
        if self.background.take().is_some() {
            debug!("persistent surface placeholder background cleared");
        }
    }
}
