/// Identity of one mounted page instance.
///
/// Callbacks carry the id of the page that issued them, so results that arrive
/// after a remount or teardown can be recognised and dropped.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageId(pub u64);

impl std::fmt::Display for PageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "page-{}", self.0)
    }
}

/// Hands out page ids in mount order.
#[derive(Debug, Default)]
pub struct PageIds {
    next: u64,
}

impl PageIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> PageId {
        let id = PageId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}
