use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared flag tied to a component's lifetime. Async completions check it
/// before touching state so nothing is written after unmount.
#[derive(Debug, Clone)]
pub struct Liveness(Arc<AtomicBool>);

impl Liveness {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn is_alive(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn end(&self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let token = Liveness::new();
        let captured = token.clone();
        assert!(captured.is_alive());
        token.end();
        assert!(!captured.is_alive());
    }
}
