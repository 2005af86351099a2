// src/view/policy.rs

//! Platform-quirk workarounds, isolated from core lifecycle logic.

use crate::config::WorkaroundConfig;
use crate::surface::{CompositingStrategy, SurfaceProvider};
use log::trace;

/// Re-asserts the surface container's visibility after surface creation.
///
/// Some platform versions skip the relayout that normally follows surface
/// creation; the container then stays black until its visibility is set
/// again, even to the value it already has. The persistent strategy is
/// the only one with an explicit visibility state, so the policy applies
/// there only. Kept behind this named hook so it can be retired without
/// touching the lifecycle state machine.
#[derive(Debug, Clone, Copy)]
pub struct VisibilityReassertPolicy {
    enabled: bool,
}

impl VisibilityReassertPolicy {
    pub fn from_config(config: &WorkaroundConfig) -> Self {
        VisibilityReassertPolicy {
            enabled: config.reassert_visibility_on_create,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Runs the workaround, if applicable, right after `surface_created`
    /// has been forwarded to the compositor.
    pub fn after_surface_created(&self, provider: &mut dyn SurfaceProvider) {
        if !self.enabled {
            return;
        }
        if provider.strategy() != CompositingStrategy::PersistentSurface {
            return;
        }
        let current = provider.visibility();
        trace!("re-asserting surface visibility {:?} after create", current);
        provider.set_visibility(current);
    }
}
