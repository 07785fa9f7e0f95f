/*
 * Responsibility
 * - Shared context bound to the Router (AppState)
 * - Clone-cheap: the handoff settings sit behind an Arc and are never mutated
 */
use std::sync::Arc;

use crate::config::HandoffConfig;

#[derive(Clone, Debug)]
pub struct AppState {
    pub handoff: Arc<HandoffConfig>,
}

impl AppState {
    pub fn new(handoff: HandoffConfig) -> Self {
        Self {
            handoff: Arc::new(handoff),
        }
    }
}
