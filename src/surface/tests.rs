// src/surface/tests.rs

use super::*;
use crate::color::Color;
use crate::config::ViewConfig;
use test_log::test;

fn persistent() -> PersistentSurfaceProvider {
    PersistentSurfaceProvider::new(&ViewConfig::default())
}

fn texture() -> TextureBackedProvider {
    TextureBackedProvider::new(&ViewConfig::default())
}

// --- Persistent strategy ---

#[test]
fn persistent_event_order_and_stable_identity() {
    let mut provider = persistent();

    let events = provider.ingest(SurfaceCallback::Created).unwrap();
    assert_eq!(events, vec![SurfaceEvent::Created]);
    let id = provider.current_surface().unwrap().id();

    let events = provider
        .ingest(SurfaceCallback::Changed {
            format: PixelFormat::Opaque,
            width: 800,
            height: 600,
        })
        .unwrap();
    assert_eq!(
        events,
        vec![SurfaceEvent::Changed {
            format: PixelFormat::Opaque,
            width: 800,
            height: 600,
        }]
    );
    // Buffer queue is stable across resizes; identity must not change.
    assert_eq!(provider.current_surface().unwrap().id(), id);

    let events = provider.ingest(SurfaceCallback::Destroyed).unwrap();
    assert_eq!(events, vec![SurfaceEvent::Destroyed]);
    // Destruction is forwarded before the handle is freed.
    assert!(provider.current_surface().is_some());
    provider.release_surface();
    assert!(provider.current_surface().is_none());
}

#[test]
fn persistent_changed_before_create_is_out_of_order() {
    let mut provider = persistent();
    let err = provider
        .ingest(SurfaceCallback::Changed {
            format: PixelFormat::Opaque,
            width: 10,
            height: 10,
        })
        .unwrap_err();
    assert!(matches!(err, SurfaceError::OutOfOrder { .. }));
}

#[test]
fn persistent_stale_change_after_destroy_is_dropped() {
    let mut provider = persistent();
    provider.ingest(SurfaceCallback::Created).unwrap();
    provider.ingest(SurfaceCallback::Destroyed).unwrap();
    provider.release_surface();

    let events = provider
        .ingest(SurfaceCallback::Changed {
            format: PixelFormat::Opaque,
            width: 10,
            height: 10,
        })
        .unwrap();
    assert!(events.is_empty());
}

#[test]
fn persistent_double_create_rejected() {
    let mut provider = persistent();
    provider.ingest(SurfaceCallback::Created).unwrap();
    let err = provider.ingest(SurfaceCallback::Created).unwrap_err();
    assert!(matches!(err, SurfaceError::OutOfOrder { .. }));
}

#[test]
fn persistent_rejects_texture_callbacks() {
    let mut provider = persistent();
    let err = provider
        .ingest(SurfaceCallback::TextureAvailable {
            width: 10,
            height: 10,
        })
        .unwrap_err();
    assert!(matches!(
        err,
        SurfaceError::StrategyMismatch {
            strategy: CompositingStrategy::PersistentSurface,
            ..
        }
    ));
}

#[test]
fn persistent_starts_hidden() {
    let provider = persistent();
    assert_eq!(provider.visibility(), Visibility::Hidden);
    assert_eq!(provider.visibility_epoch(), 0);
}

#[test]
fn persistent_visibility_epoch_counts_reasserts() {
    let mut provider = persistent();
    provider.set_visibility(Visibility::Visible);
    provider.set_visibility(Visibility::Visible);
    // A same-value re-assert still has to reach the platform view.
    assert_eq!(provider.visibility_epoch(), 2);
    assert_eq!(provider.visibility(), Visibility::Visible);
}

#[test]
fn persistent_tracks_format_request() {
    let mut provider = persistent();
    assert_eq!(
        provider.requested_pixel_format(),
        Some(PixelFormat::Opaque)
    );
    provider.request_pixel_format(PixelFormat::Translucent);
    assert_eq!(
        provider.requested_pixel_format(),
        Some(PixelFormat::Translucent)
    );
}

#[test]
fn persistent_z_order_and_media_overlay() {
    let mut provider = persistent();
    assert!(provider.is_media_overlay());
    assert!(!provider.z_order_on_top());
    provider.set_z_order_on_top(true);
    assert!(provider.z_order_on_top());
}

#[test]
fn persistent_placeholder_background_clears_once() {
    let mut provider = persistent();
    assert_eq!(provider.background_color(), Some(Color::WHITE));
    provider.clear_placeholder_background();
    assert_eq!(provider.background_color(), None);
    // Subsequent swaps find nothing left to clear.
    provider.clear_placeholder_background();
    assert_eq!(provider.background_color(), None);
}

// --- Texture-backed strategy ---

#[test]
fn texture_availability_yields_created_then_changed() {
    let mut provider = texture();
    let events = provider
        .ingest(SurfaceCallback::TextureAvailable {
            width: 640,
            height: 480,
        })
        .unwrap();
    assert_eq!(
        events,
        vec![
            SurfaceEvent::Created,
            SurfaceEvent::Changed {
                format: PixelFormat::Rgba8888,
                width: 640,
                height: 480,
            },
        ]
    );
}

#[test]
fn texture_same_producer_resize_reuses_identity() {
    let mut provider = texture();
    provider
        .ingest(SurfaceCallback::TextureAvailable {
            width: 640,
            height: 480,
        })
        .unwrap();
    let id = provider.current_surface().unwrap().id();

    for _ in 0..2 {
        provider
            .ingest(SurfaceCallback::TextureSizeChanged {
                width: 800,
                height: 600,
            })
            .unwrap();
        assert_eq!(provider.current_surface().unwrap().id(), id);
    }
}

#[test]
fn texture_new_producer_after_destroy_is_distinct() {
    let mut provider = texture();
    provider
        .ingest(SurfaceCallback::TextureAvailable {
            width: 640,
            height: 480,
        })
        .unwrap();
    let first = provider.current_surface().unwrap().id();

    provider.ingest(SurfaceCallback::TextureDestroyed).unwrap();
    provider.release_surface();

    provider
        .ingest(SurfaceCallback::TextureAvailable {
            width: 640,
            height: 480,
        })
        .unwrap();
    let second = provider.current_surface().unwrap().id();
    assert_ne!(first, second);
}

#[test]
fn texture_stale_resize_after_destroy_is_dropped() {
    let mut provider = texture();
    provider
        .ingest(SurfaceCallback::TextureAvailable {
            width: 640,
            height: 480,
        })
        .unwrap();
    provider.ingest(SurfaceCallback::TextureDestroyed).unwrap();
    provider.release_surface();

    let events = provider
        .ingest(SurfaceCallback::TextureSizeChanged {
            width: 800,
            height: 600,
        })
        .unwrap();
    assert!(events.is_empty());
}

#[test]
fn texture_resize_before_availability_is_out_of_order() {
    let mut provider = texture();
    let err = provider
        .ingest(SurfaceCallback::TextureSizeChanged {
            width: 800,
            height: 600,
        })
        .unwrap_err();
    assert!(matches!(err, SurfaceError::OutOfOrder { .. }));
}

#[test]
fn texture_rejects_persistent_callbacks() {
    let mut provider = texture();
    let err = provider.ingest(SurfaceCallback::Created).unwrap_err();
    assert!(matches!(
        err,
        SurfaceError::StrategyMismatch {
            strategy: CompositingStrategy::TextureBacked,
            ..
        }
    ));
}

#[test]
fn texture_opacity_follows_background_alpha() {
    let mut provider = texture();
    // Default background is opaque white.
    assert!(provider.is_opaque());
    provider.set_background_color(Color::rgba(0, 0, 0, 0x80));
    assert!(!provider.is_opaque());
    provider.set_background_color(Color::BLACK);
    assert!(provider.is_opaque());
}

#[test]
fn texture_format_request_is_noop() {
    let mut provider = texture();
    assert_eq!(provider.requested_pixel_format(), None);
    provider.request_pixel_format(PixelFormat::Translucent);
    assert_eq!(provider.requested_pixel_format(), None);
}
