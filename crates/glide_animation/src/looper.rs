//! Deferred tasks on the UI thread
//!
//! Animators never block. Work that must wait for the next UI tick is posted
//! to a [`Looper`] and can be withdrawn before it runs. [`FrameQueue`] is a
//! reference looper that the host drains once per frame.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle to a posted task
    pub struct TaskId;
}

/// A unit of deferred work
pub type Task = Box<dyn FnOnce()>;

/// Schedules work for the next UI tick
pub trait Looper {
    /// Queue `task` to run on the next tick
    fn post(&self, task: Task) -> TaskId;

    /// Withdraw a task that has not run yet
    ///
    /// Returns false if the task already ran or was removed.
    fn remove(&self, task: TaskId) -> bool;
}

struct QueueInner {
    tasks: SlotMap<TaskId, Task>,
    order: VecDeque<TaskId>,
}

/// A FIFO queue of tasks drained once per frame
///
/// Cheap to clone; clones share the same queue.
#[derive(Clone)]
pub struct FrameQueue {
    inner: Rc<RefCell<QueueInner>>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(QueueInner {
                tasks: SlotMap::with_key(),
                order: VecDeque::new(),
            })),
        }
    }

    /// Run every task posted before this call, in post order
    ///
    /// Tasks posted while running wait for the next call. Returns the number
    /// of tasks that ran.
    pub fn run_pending(&self) -> usize {
        let batch = std::mem::take(&mut self.inner.borrow_mut().order);
        let mut ran = 0;
        for id in batch {
            let task = self.inner.borrow_mut().tasks.remove(id);
            if let Some(task) = task {
                task();
                ran += 1;
            }
        }
        ran
    }

    /// Number of tasks waiting to run
    pub fn pending_count(&self) -> usize {
        self.inner.borrow().tasks.len()
    }

    /// Check whether `task` is still waiting to run
    pub fn is_pending(&self, task: TaskId) -> bool {
        self.inner.borrow().tasks.contains_key(task)
    }
}

impl Default for FrameQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl Looper for FrameQueue {
    fn post(&self, task: Task) -> TaskId {
        let mut inner = self.inner.borrow_mut();
        let id = inner.tasks.insert(task);
        inner.order.push_back(id);
        id
    }

    fn remove(&self, task: TaskId) -> bool {
        self.inner.borrow_mut().tasks.remove(task).is_some()
    }
}
