/// One-way boolean: starts unset and can be set exactly once.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Latch {
    set: bool,
}

impl Latch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_set(&self) -> bool {
        self.set
    }

    /// Sets the latch.
    ///
    /// Returns `true` only for the call that performed the false→true transition.
    pub fn trip(&mut self) -> bool {
        if self.set {
            return false;
        }
        self.set = true;
        true
    }
}
