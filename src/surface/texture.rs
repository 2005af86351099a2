// src/surface/texture.rs

//! Texture-backed surface strategy.
//!
//! Wraps a platform texture whose backing buffer producer is recreated
//! whenever the texture becomes available; each availability event mints
//! a new [`SurfaceHandle`] from the current producer. A size change with
//! the producer unchanged reuses the existing handle and only re-reports
//! geometry. On destruction the handle's underlying resource is released
//! before the handle is discarded; a dangling reference past that point
//! is the classic crash in this layer.
//!
//! Availability implies an immediate geometry report, so one
//! `TextureAvailable` callback yields `Created` followed by `Changed`.
//! The format reported is always [`PixelFormat::Rgba8888`]: a texture's
//! producer is never format-switched, and the native side only uses the
//! format to decide whether to replace its compositing surface.

use crate::color::Color;
use crate::config::ViewConfig;
use crate::surface::{
    CompositingStrategy, PixelFormat, SurfaceCallback, SurfaceError, SurfaceEvent, SurfaceHandle,
    SurfaceProvider,
};
use log::{debug, trace, warn};

pub struct TextureBackedProvider {
    surface: Option<SurfaceHandle>,
    ever_created: bool,
    next_surface_id: u64,
    background: Option<Color>,
    /// Opacity hint for the embedding view, derived from the background's
    /// alpha channel.
    opaque: bool,
}

impl TextureBackedProvider {
    pub fn new(config: &ViewConfig) -> Self {
        TextureBackedProvider {
            surface: None,
            ever_created: false,
            next_surface_id: 1,
            background: Some(config.background),
            opaque: config.background.is_opaque(),
        }
    }

    /// Whether the embedding view should treat the texture as opaque.
    pub fn is_opaque(&self) -> bool {
        self.opaque
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

impl SurfaceProvider for TextureBackedProvider {
    fn strategy(&self) -> CompositingStrategy {
        CompositingStrategy::TextureBacked
    }

    fn ingest(&mut self, callback: SurfaceCallback) -> Result<Vec<SurfaceEvent>, SurfaceError> {
        match callback {
            SurfaceCallback::TextureAvailable { width, height } => {
                if self.surface.is_some() {
                    return Err(SurfaceError::OutOfOrder {
                        callback: callback.name(),
                        state: self.state_name(),
                    });
                }
                // New producer, new handle identity.
                let id = self.next_surface_id;
                self.next_surface_id += 1;
                self.surface = Some(SurfaceHandle::new(id));
                self.ever_created = true;
                debug!("texture surface {} available: {}x{}", id, width, height);
                Ok(vec![
                    SurfaceEvent::Created,
                    SurfaceEvent::Changed {
                        format: PixelFormat::Rgba8888,
                        width,
                        height,
                    },
                ])
            }
            SurfaceCallback::TextureSizeChanged { width, height } => match self.surface {
                Some(ref surface) => {
                    // Producer unchanged; reuse the handle, re-report geometry.
                    trace!(
                        "texture surface {} resized: {}x{}",
                        surface.id(),
                        width,
                        height
                    );
                    Ok(vec![SurfaceEvent::Changed {
                        format: PixelFormat::Rgba8888,
                        width,
                        height,
                    }])
                }
                None if self.ever_created => {
                    warn!("stale texture-size-changed after destroy; dropping");
                    Ok(Vec::new())
                }
                None => Err(SurfaceError::OutOfOrder {
                    callback: callback.name(),
                    state: self.state_name(),
                }),
            },
            SurfaceCallback::TextureDestroyed => {
                if self.surface.is_none() {
                    return Err(SurfaceError::OutOfOrder {
                        callback: callback.name(),
                        state: self.state_name(),
                    });
                }
                Ok(vec![SurfaceEvent::Destroyed])
            }
            SurfaceCallback::Created
            | SurfaceCallback::Changed { .. }
            | SurfaceCallback::Destroyed => Err(SurfaceError::StrategyMismatch {
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
                debug!("texture surface {} released", surface.id());
                surface.release();
            }
            None => warn!("release_surface with no live surface"),
        }
    }

    fn set_background_color(&mut self, color: Color) {
        self.opaque = color.is_opaque();
        self.background = Some(color);
    }

    fn background_color(&self) -> Option<Color> {
        self.background
    }

    fn clear_placeholder_background(&mut self) {
        if self.background.take().is_some() {
            debug!("texture surface placeholder background cleared");
        }
    }
}
