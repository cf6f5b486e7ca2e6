use crate::error::{Result, ScanError};
use crate::page::PageId;
use std::collections::{HashSet, VecDeque};
use tracing::debug;

/// BFS frontier plus the visited set for a single crawl.
///
/// Invariants: the queue holds no duplicates, and nothing in the queue has
/// been visited. A page can still be visited after it was queued; the
/// crawler re-checks on dequeue.
#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<PageId>,
    queued: HashSet<PageId>,
    visited: HashSet<PageId>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frontier with `seed` as its only queued page.
    pub fn with_seed(seed: PageId) -> Self {
        let mut frontier = Self::new();
        frontier.enqueue(seed);
        frontier
    }

    /// Append `page` to the tail unless it is already visited or queued.
    /// Returns whether it was added.
    pub fn enqueue(&mut self, page: PageId) -> bool {
        if self.visited.contains(&page) || self.queued.contains(&page) {
            return false;
        }
        debug!("Queuing {}", page);
        self.queued.insert(page.clone());
        self.queue.push_back(page);
        true
    }

    pub fn dequeue(&mut self) -> Result<PageId> {
        let page = self.queue.pop_front().ok_or(ScanError::EmptyFrontier)?;
        self.queued.remove(&page);
        Ok(page)
    }

    /// Returns false if `page` was already visited.
    pub fn mark_visited(&mut self, page: PageId) -> bool {
        // A page visited from outside the queue must not linger in it.
        if self.queued.remove(&page) {
            self.queue.retain(|queued| queued != &page);
        }
        self.visited.insert(page)
    }

    pub fn is_visited(&self, page: &PageId) -> bool {
        self.visited.contains(page)
    }

    pub fn is_queued(&self, page: &PageId) -> bool {
        self.queued.contains(page)
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn visited(&self) -> &HashSet<PageId> {
        &self.visited
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(path: &str) -> PageId {
        PageId::from(path)
    }

    #[test]
    fn test_dequeue_is_fifo() {
        let mut frontier = Frontier::new();
        frontier.enqueue(page("/wiki/A"));
        frontier.enqueue(page("/wiki/B"));
        frontier.enqueue(page("/wiki/C"));

        assert_eq!(frontier.dequeue().unwrap(), page("/wiki/A"));
        assert_eq!(frontier.dequeue().unwrap(), page("/wiki/B"));
        assert_eq!(frontier.dequeue().unwrap(), page("/wiki/C"));
    }

    #[test]
    fn test_dequeue_empty_frontier() {
        let mut frontier = Frontier::new();
        assert!(matches!(frontier.dequeue(), Err(ScanError::EmptyFrontier)));
    }

    #[test]
    fn test_enqueue_rejects_duplicates() {
        let mut frontier = Frontier::new();
        assert!(frontier.enqueue(page("/wiki/A")));
        assert!(!frontier.enqueue(page("/wiki/A")));
        assert_eq!(frontier.len(), 1);
    }

    #[test]
    fn test_enqueue_rejects_visited() {
        let mut frontier = Frontier::new();
        frontier.mark_visited(page("/wiki/A"));
        assert!(!frontier.enqueue(page("/wiki/A")));
        assert!(frontier.is_empty());
    }

    #[test]
    fn test_requeue_after_dequeue_is_rejected_once_visited() {
        let mut frontier = Frontier::with_seed(page("/wiki/A"));
        let seed = frontier.dequeue().unwrap();
        assert!(frontier.mark_visited(seed));
        assert!(!frontier.enqueue(page("/wiki/A")));
    }

    #[test]
    fn test_mark_visited_reports_first_visit() {
        let mut frontier = Frontier::new();
        assert!(frontier.mark_visited(page("/wiki/A")));
        assert!(!frontier.mark_visited(page("/wiki/A")));
        assert_eq!(frontier.visited_count(), 1);
    }

    #[test]
    fn test_mark_visited_removes_from_queue() {
        let mut frontier = Frontier::new();
        frontier.enqueue(page("/wiki/A"));
        frontier.enqueue(page("/wiki/B"));
        frontier.mark_visited(page("/wiki/A"));

        assert!(!frontier.is_queued(&page("/wiki/A")));
        assert_eq!(frontier.len(), 1);
        assert_eq!(frontier.dequeue().unwrap(), page("/wiki/B"));
    }

    #[test]
    fn test_visited_and_queue_stay_disjoint() {
        let mut frontier = Frontier::with_seed(page("/wiki/A"));
        let links = ["/wiki/B", "/wiki/C", "/wiki/A", "/wiki/B"];

        while let Ok(current) = frontier.dequeue() {
            frontier.mark_visited(current);
            for link in links {
                frontier.enqueue(page(link));
            }
            for visited in frontier.visited() {
                assert!(!frontier.is_queued(visited));
            }
        }

        assert_eq!(frontier.visited_count(), 3);
    }
}
