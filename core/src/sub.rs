// core/src/sub.rs

//! Subscription descriptors.
//!
//! `Sub` is accepted by the application configuration and evaluated once per
//! loop iteration, but no component interprets it: subscriptions are an
//! inert part of the surface, kept so that a future interpretation can slot
//! in without changing the configuration shape.

/// An opaque, currently inert description of external subscriptions.
#[derive(Debug, Clone, Default)]
pub struct Sub {
  _inert: (),
}

impl Sub {
  /// The empty subscription set.
  pub fn none() -> Self {
    Self::default()
  }
}
