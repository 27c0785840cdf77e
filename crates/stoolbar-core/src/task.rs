//! One-shot tasks that run after the next completed layout pass.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::context::UiContext;
use crate::object::WidgetId;

/// A unique identifier for a post-layout task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

impl TaskId {
    /// Get the raw u64 value of this task ID.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

static NEXT_TASK_ID: AtomicU64 = AtomicU64::new(1);

fn next_task_id() -> TaskId {
    TaskId(NEXT_TASK_ID.fetch_add(1, Ordering::Relaxed))
}

/// A boxed post-layout closure.
pub(crate) type BoxedTask = Box<dyn FnOnce(&UiContext) + Send + 'static>;

/// A queued task and the widget it is anchored to.
pub(crate) struct TaskData {
    pub(crate) id: TaskId,
    pub(crate) anchor: WidgetId,
    pub(crate) task: BoxedTask,
}

/// FIFO of tasks waiting for the next layout pass.
#[derive(Default)]
pub(crate) struct PostLayoutQueue {
    tasks: VecDeque<TaskData>,
}

impl PostLayoutQueue {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Queue a task; returns its id.
    pub(crate) fn post(&mut self, anchor: WidgetId, task: BoxedTask) -> TaskId {
        let id = next_task_id();
        self.tasks.push_back(TaskData { id, anchor, task });
        id
    }

    /// Put back a task taken by [`take_pending`](Self::take_pending), keeping
    /// its id.
    pub(crate) fn requeue(&mut self, task: TaskData) {
        self.tasks.push_back(task);
    }

    /// Take every task queued so far, leaving the queue empty.
    ///
    /// Tasks posted after this call belong to the following pass.
    pub(crate) fn take_pending(&mut self) -> VecDeque<TaskData> {
        std::mem::take(&mut self.tasks)
    }

    pub(crate) fn pending_count(&self) -> usize {
        self.tasks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{WidgetKind, WidgetTree};

    #[test]
    fn test_take_pending_drains_in_order() {
        let mut tree = WidgetTree::new();
        let anchor = tree.create(WidgetKind::View);
        let mut queue = PostLayoutQueue::new();

        let first = queue.post(anchor, Box::new(|_| {}));
        let second = queue.post(anchor, Box::new(|_| {}));
        assert_eq!(queue.pending_count(), 2);
        assert!(first.as_u64() < second.as_u64());

        let drained: Vec<TaskId> = queue.take_pending().into_iter().map(|t| t.id).collect();
        assert_eq!(drained, vec![first, second]);
        assert_eq!(queue.pending_count(), 0);
    }

    #[test]
    fn test_requeue_keeps_task_id() {
        let mut tree = WidgetTree::new();
        let anchor = tree.create(WidgetKind::View);
        let mut queue = PostLayoutQueue::new();

        let id = queue.post(anchor, Box::new(|_| {}));
        for task in queue.take_pending() {
            queue.requeue(task);
        }

        let drained: Vec<TaskId> = queue.take_pending().into_iter().map(|t| t.id).collect();
        assert_eq!(drained, vec![id]);
    }
}
