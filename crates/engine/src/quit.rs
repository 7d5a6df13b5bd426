//! Shared quit flag.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cooperative stop request, checked by the engines at tick/turn boundaries.
///
/// Clones share the same flag, so the input side can hold one copy and the
/// engine another.
#[derive(Debug, Clone, Default)]
pub struct QuitSignal(Arc<AtomicBool>);

impl QuitSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&self) {
        if !self.0.swap(true, Ordering::SeqCst) {
            tracing::info!("quit requested");
        }
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
