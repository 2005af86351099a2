// src/content.rs

//! The content sink seam.
//!
//! A content sink is the external content/document object whose pixels
//! the compositor renders. This layer never owns it: the controller keeps
//! a `Weak` reference, and at most one sink is bound at a time. Rebinding
//! replaces the previous sink without destroying it; a sink whose owner
//! has dropped it is silently skipped on relay.

/// Opaque identity of a content object, used to tag renderer calls so the
/// native side can multiplex several content objects over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentId(pub u64);

/// Interface the embedder's content object exposes to this layer.
///
/// Only the size relay crosses this seam; everything else about the
/// content object is out of scope here.
pub trait ContentSink {
    /// Stable identity forwarded with renderer size-change calls.
    fn content_id(&self) -> ContentId;

    /// Receives the controller's current viewport. A `(0, 0)` relay is
    /// legal and simply deferred in effect until the next real resize.
    fn set_size(&mut self, width: u32, height: u32);
}
