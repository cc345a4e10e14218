//! # Work Queue
//!
//! The unbounded FIFO connecting the page walker to the detail-fetcher pool.
//! Enqueue never suspends; the producer can run arbitrarily far ahead of the
//! pool, bounded in practice only by listing count per page. This is
//! documented behavior, not a bug to fix with backpressure.
//!
//! Producer and consumer sides are separate handles: the walker holds a
//! [`WorkSender`], every pool worker a clone of the shared [`WorkReceiver`].
//! Each item is delivered to exactly one worker.

use std::sync::Arc;

use tokio::sync::{Mutex, mpsc};

use crate::crawling::tasks::WorkItem;

/// Errors surfaced by queue operations.
#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("work queue is closed")]
    Closed,
}

/// The queue itself, owned by the orchestrator for the duration of a run.
pub struct WorkQueue {
    sender: mpsc::UnboundedSender<WorkItem>,
    receiver: Arc<Mutex<mpsc::UnboundedReceiver<WorkItem>>>,
}

impl WorkQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            sender,
            receiver: Arc::new(Mutex::new(receiver)),
        }
    }

    /// Producer handle for the page walker (and for sentinel injection).
    #[must_use]
    pub fn sender(&self) -> WorkSender {
        WorkSender(self.sender.clone())
    }

    /// Consumer handle shared by the worker pool.
    #[must_use]
    pub fn receiver(&self) -> WorkReceiver {
        WorkReceiver(Arc::clone(&self.receiver))
    }
}

impl Default for WorkQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Enqueue side. Cloneable; never blocks.
#[derive(Clone)]
pub struct WorkSender(mpsc::UnboundedSender<WorkItem>);

impl WorkSender {
    /// Enqueues one item. Fails only once every receiver has been dropped.
    pub fn push(&self, item: WorkItem) -> Result<(), QueueError> {
        self.0.send(item).map_err(|_| QueueError::Closed)
    }
}

/// Dequeue side, shared across all workers.
#[derive(Clone)]
pub struct WorkReceiver(Arc<Mutex<mpsc::UnboundedReceiver<WorkItem>>>);

impl WorkReceiver {
    /// Dequeues one item, suspending while the queue is empty.
    ///
    /// Returns `None` once every sender is gone and the queue has drained;
    /// callers treat that the same as a [`WorkItem::Stop`].
    pub async fn pop(&self) -> Option<WorkItem> {
        let mut receiver = self.0.lock().await;
        receiver.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawling::tasks::ListingId;

    #[tokio::test]
    async fn push_and_pop_preserve_fifo_order() {
        let queue = WorkQueue::new();
        let sender = queue.sender();
        let receiver = queue.receiver();

        sender.push(WorkItem::Listing(ListingId::new("a"))).unwrap();
        sender.push(WorkItem::Listing(ListingId::new("b"))).unwrap();

        assert_eq!(
            receiver.pop().await,
            Some(WorkItem::Listing(ListingId::new("a")))
        );
        assert_eq!(
            receiver.pop().await,
            Some(WorkItem::Listing(ListingId::new("b")))
        );
    }

    #[tokio::test]
    async fn pop_returns_none_once_senders_are_gone() {
        let queue = WorkQueue::new();
        let sender = queue.sender();
        let receiver = queue.receiver();

        sender.push(WorkItem::Stop).unwrap();
        assert_eq!(receiver.pop().await, Some(WorkItem::Stop));

        drop(sender);
        drop(queue);
        assert_eq!(receiver.pop().await, None);
    }

    #[tokio::test]
    async fn each_item_is_delivered_to_exactly_one_consumer() {
        let queue = WorkQueue::new();
        let sender = queue.sender();

        for i in 0..5 {
            sender
                .push(WorkItem::Listing(ListingId::new(i.to_string())))
                .unwrap();
        }
        sender.push(WorkItem::Stop).unwrap();
        sender.push(WorkItem::Stop).unwrap();

        let mut consumers = Vec::new();
        for _ in 0..2 {
            let receiver = queue.receiver();
            consumers.push(tokio::spawn(async move {
                let mut seen = Vec::new();
                while let Some(item) = receiver.pop().await {
                    match item {
                        WorkItem::Listing(id) => seen.push(id),
                        WorkItem::Stop => break,
                    }
                }
                seen
            }));
        }

        let mut all: Vec<ListingId> = Vec::new();
        for consumer in consumers {
            all.extend(consumer.await.unwrap());
        }

        all.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        let ids: Vec<&str> = all.iter().map(ListingId::as_str).collect();
        assert_eq!(ids, ["0", "1", "2", "3", "4"]);
    }
}
