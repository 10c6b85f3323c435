//! # Pending queue.
//!
//! FIFO backlog of tasks that have not been started yet. Each entry carries
//! its submission index; indices are assigned once, in input order, by
//! [`PendingQueue::enqueue_all`].

use std::collections::VecDeque;

use crate::tasks::TaskRef;

/// Ordered backlog of not-yet-started tasks.
pub(crate) struct PendingQueue<T, E> {
    items: VecDeque<(usize, TaskRef<T, E>)>,
}

impl<T, E> PendingQueue<T, E> {
    /// Builds the queue from the submitted tasks, preserving input order.
    pub(crate) fn enqueue_all(tasks: Vec<TaskRef<T, E>>) -> Self {
        Self {
            items: tasks.into_iter().enumerate().collect(),
        }
    }

    /// Removes and returns the earliest-enqueued task with its submission index.
    #[inline]
    pub(crate) fn dequeue_head(&mut self) -> Option<(usize, TaskRef<T, E>)> {
        self.items.pop_front()
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }
}
