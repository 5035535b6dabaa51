use crate::body::GravityGroups;
use crate::config::BuoyancyConfig;
use crate::debug::DebugRenderer;
use crate::query::{CollisionFilter, DefaultCollisionFilter};

/// Everything a submersion query reads besides the body and the water.
///
/// A context is cheap to copy and is built once per step by the caller.
#[derive(Copy, Clone)]
pub struct BuoyancyContext<'a> {
    /// The tuning parameters.
    pub config: &'a BuoyancyConfig,
    /// The gravity of each gravity group.
    pub gravity: &'a GravityGroups,
    /// The narrow-phase filter deciding which leaves can touch the water.
    pub filter: &'a dyn CollisionFilter,
    /// Where intermediate geometry is drawn when `config.debug_draw` is set.
    pub debug: Option<&'a dyn DebugRenderer>,
}

impl<'a> BuoyancyContext<'a> {
    /// A context using the [`DefaultCollisionFilter`] and no debug renderer.
    pub fn new(config: &'a BuoyancyConfig, gravity: &'a GravityGroups) -> Self {
        Self {
            config,
            gravity,
            filter: &DefaultCollisionFilter,
            debug: None,
        }
    }

    /// Replaces the collision filter of this context.
    #[must_use]
    pub fn with_filter(mut self, filter: &'a dyn CollisionFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Sets the renderer receiving debug geometry.
    #[must_use]
    pub fn with_debug_renderer(mut self, debug: &'a dyn DebugRenderer) -> Self {
        self.debug = Some(debug);
        self
    }

    /// The debug renderer, if one is set and debug drawing is enabled.
    #[inline]
    pub fn debug_renderer(&self) -> Option<&'a dyn DebugRenderer> {
        if self.config.debug_draw {
            self.debug
        } else {
            None
        }
    }
}
