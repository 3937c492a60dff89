use std::collections::VecDeque;

use crate::lifecycle::PageId;

/// A message addressed to one page instance.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope<M> {
    pub page: PageId,
    pub message: M,
}

impl<M> Envelope<M> {
    pub fn new(page: PageId, message: M) -> Self {
        Self { page, message }
    }
}

/// FIFO message queue feeding the single-threaded event loop.
///
/// Producers (provider callbacks, observers, user input) post envelopes; the
/// loop drains them in arrival order. Nothing here knows whether the addressed
/// page is still alive; that check belongs to the receiver.
#[derive(Debug)]
pub struct Mailbox<M> {
    queue: VecDeque<Envelope<M>>,
}

impl<M> Default for Mailbox<M> {
    fn default() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }
}

impl<M> Mailbox<M> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn post(&mut self, page: PageId, message: M) {
        self.queue.push_back(Envelope::new(page, message));
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn pop(&mut self) -> Option<Envelope<M>> {
        self.queue.pop_front()
    }

    pub fn drain(&mut self) -> Vec<Envelope<M>> {
        self.queue.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::Mailbox;
    use crate::lifecycle::PageId;

    #[test]
    fn delivers_in_post_order() {
        let mut mb = Mailbox::new();
        mb.post(PageId(0), "a");
        mb.post(PageId(1), "b");
        assert_eq!(mb.len(), 2);
        assert_eq!(mb.pop().map(|e| e.message), Some("a"));
        let rest = mb.drain();
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].page, PageId(1));
        assert!(mb.is_empty());
    }
}
