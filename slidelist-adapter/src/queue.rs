use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use slidelist::Wakeup;

type Task = Box<dyn FnOnce()>;

#[derive(Default)]
struct Inner {
    tasks: VecDeque<Task>,
    due: Option<u64>,
}

/// Runs expensive jobs one per tick so a burst of them never blocks a frame.
///
/// Clones share the same queue. Tasks run in submission order, at most one per
/// [`TaskQueue::tick`], each at least a millisecond after the previous one.
#[derive(Clone, Default)]
pub struct TaskQueue {
    inner: Rc<RefCell<Inner>>,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, now_ms: u64, task: impl FnOnce() + 'static) {
        let mut inner = self.inner.borrow_mut();
        inner.tasks.push_back(Box::new(task));
        if inner.due.is_none() {
            inner.due = Some(now_ms.saturating_add(1));
        }
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().tasks.is_empty()
    }

    pub fn next_wakeup(&self) -> Option<Wakeup> {
        self.inner.borrow().due.map(Wakeup::At)
    }

    /// Runs the next task if it is due. Returns whether one ran.
    pub fn tick(&self, now_ms: u64) -> bool {
        let task = {
            let mut inner = self.inner.borrow_mut();
            if inner.due.is_none_or(|due| now_ms < due) {
                return false;
            }
            let task = inner.tasks.pop_front();
            inner.due = (!inner.tasks.is_empty()).then_some(now_ms.saturating_add(1));
            task
        };
        // Not borrowed while running: tasks may push more work.
        match task {
            Some(task) => {
                task();
                let mut inner = self.inner.borrow_mut();
                if inner.due.is_none() && !inner.tasks.is_empty() {
                    inner.due = Some(now_ms.saturating_add(1));
                }
                true
            }
            None => false,
        }
    }

    /// Drops every pending task.
    pub fn clear(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.tasks.clear();
        inner.due = None;
    }
}

impl fmt::Debug for TaskQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("TaskQueue")
            .field("pending", &inner.tasks.len())
            .field("due", &inner.due)
            .finish()
    }
}
