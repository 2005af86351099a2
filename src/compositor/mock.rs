// src/compositor/mock.rs

use crate::compositor::{Compositor, RendererHandle, WindowHost};
use crate::content::ContentId;
use crate::surface::{PixelFormat, SurfaceHandle};
use anyhow::Result;
use std::cell::RefCell;
use std::num::NonZeroU64;
use std::rc::Rc;

/// Everything a `MockCompositor` was asked to do, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompositorCall {
    Init,
    Destroy {
        handle: u64,
    },
    SetContent {
        handle: u64,
        content: Option<ContentId>,
    },
    PhysicalBackingSizeChanged {
        handle: u64,
        content: ContentId,
        width: u32,
        height: u32,
    },
    SurfaceCreated {
        handle: u64,
    },
    SurfaceChanged {
        handle: u64,
        format: PixelFormat,
        width: u32,
        height: u32,
        surface_id: u64,
    },
    SurfaceDestroyed {
        handle: u64,
    },
    SetOverlayVideoMode {
        handle: u64,
        enabled: bool,
    },
}

/// Shared, inspectable log of forwarded calls. Tests clone this before
/// boxing the mock into the controller.
pub type CallLog = Rc<RefCell<Vec<CompositorCall>>>;

pub struct MockCompositor {
    calls: CallLog,
    next_handle: u64,
}

impl MockCompositor {
    pub fn new() -> Self {
        MockCompositor {
            calls: Rc::new(RefCell::new(Vec::new())),
            next_handle: 1,
        }
    }

    pub fn call_log(&self) -> CallLog {
        Rc::clone(&self.calls)
    }

    fn record(&self, call: CompositorCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl Compositor for MockCompositor {
    fn init(&mut self, _host: &dyn WindowHost) -> Result<RendererHandle> {
        self.record(CompositorCall::Init);
        let raw = NonZeroU64::new(self.next_handle).expect("mock handle counter wrapped to zero");
        self.next_handle += 1;
        Ok(RendererHandle::new(raw))
    }

    fn destroy(&mut self, handle: &mut RendererHandle) {
        self.record(CompositorCall::Destroy {
            handle: handle.raw(),
        });
        handle.invalidate();
    }

    fn set_content(&mut self, handle: &RendererHandle, content: Option<ContentId>) {
        self.record(CompositorCall::SetContent {
            handle: handle.raw(),
            content,
        });
    }

    fn on_physical_backing_size_changed(
        &mut self,
        handle: &RendererHandle,
        content: ContentId,
        width: u32,
        height: u32,
    ) {
        self.record(CompositorCall::PhysicalBackingSizeChanged {
            handle: handle.raw(),
            content,
            width,
            height,
        });
    }

    fn surface_created(&mut self, handle: &RendererHandle) {
        self.record(CompositorCall::SurfaceCreated {
            handle: handle.raw(),
        });
    }

    fn surface_changed(
        &mut self,
        handle: &RendererHandle,
        format: PixelFormat,
        width: u32,
        height: u32,
        surface: &SurfaceHandle,
    ) {
        self.record(CompositorCall::SurfaceChanged {
            handle: handle.raw(),
            format,
            width,
            height,
            surface_id: surface.id(),
        });
    }

    fn surface_destroyed(&mut self, handle: &RendererHandle) {
        self.record(CompositorCall::SurfaceDestroyed {
            handle: handle.raw(),
        });
    }

    fn set_overlay_video_mode(&mut self, handle: &RendererHandle, enabled: bool) {
        self.record(CompositorCall::SetOverlayVideoMode {
            handle: handle.raw(),
            enabled,
        });
    }
}
