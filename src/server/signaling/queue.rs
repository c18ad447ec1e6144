//! FIFO waiting queue of unmatched clients.

use std::collections::VecDeque;

use super::types::ClientId;

#[derive(Debug, Default)]
pub struct WaitingQueue {
    entries: VecDeque<ClientId>,
}

impl WaitingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append to the tail. Returns `false` if the client was already queued.
    pub fn join(&mut self, id: ClientId) -> bool {
        if self.contains(&id) {
            return false;
        }
        self.entries.push_back(id);
        true
    }

    /// Remove the client wherever it sits. Returns `false` if it was absent.
    pub fn leave(&mut self, id: &ClientId) -> bool {
        match self.entries.iter().position(|queued| queued == id) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Pop the two oldest entries together, or nothing if fewer than two wait.
    pub fn pop_pair(&mut self) -> Option<(ClientId, ClientId)> {
        if self.entries.len() < 2 {
            return None;
        }
        let first = self.entries.pop_front()?;
        let second = self.entries.pop_front()?;
        Some((first, second))
    }

    pub fn contains(&self, id: &ClientId) -> bool {
        self.entries.contains(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_rejects_duplicates() {
        let mut queue = WaitingQueue::new();
        let a = ClientId::new();
        assert!(queue.join(a));
        assert!(!queue.join(a));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn interleaved_join_leave_never_duplicates() {
        let mut queue = WaitingQueue::new();
        let ids: Vec<ClientId> = (0..4).map(|_| ClientId::new()).collect();
        for round in 0..12 {
            let id = ids[round % ids.len()];
            if round % 3 == 0 {
                queue.leave(&id);
            } else {
                queue.join(id);
            }
            for id in &ids {
                assert!(queue.entries.iter().filter(|q| *q == id).count() <= 1);
            }
        }
    }

    #[test]
    fn leave_removes_from_middle() {
        let mut queue = WaitingQueue::new();
        let (a, b, c) = (ClientId::new(), ClientId::new(), ClientId::new());
        queue.join(a);
        queue.join(b);
        queue.join(c);
        assert!(queue.leave(&b));
        assert!(!queue.leave(&b));
        assert_eq!(queue.pop_pair(), Some((a, c)));
        assert!(queue.is_empty());
    }

    #[test]
    fn pop_pair_needs_two_entries() {
        let mut queue = WaitingQueue::new();
        let a = ClientId::new();
        assert_eq!(queue.pop_pair(), None);
        queue.join(a);
        assert_eq!(queue.pop_pair(), None);
        assert!(queue.contains(&a));
    }
}
