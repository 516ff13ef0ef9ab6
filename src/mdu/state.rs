use super::queue::PathQueue;
use std::path::PathBuf;
use std::sync::{Condvar, Mutex};

struct Inner {
    queue: PathQueue,
    /// Directories known to the system but not yet finished scanning.
    /// Invariant: `pending >= queue.len()`, and `pending == 0` implies
    /// `queue.len() == 0`.
    pending: usize,
    total: u64,
    shutdown: bool,
    error: bool,
}

/// What a worker should do after calling [`TraversalState::acquire_work`].
pub enum WorkItem {
    /// Exit the worker loop; no more work will ever arrive.
    Exit,
    /// Scan this path; the caller now exclusively owns it.
    Scan(PathBuf),
}

/// Shared state for one root's traversal: the queue, the pending-directory
/// counter, the running block total, and the one-way shutdown/error flags,
/// all guarded by a single mutex, paired with one condition variable.
///
/// This is deliberately a single coarse lock: critical sections are a
/// push, a pop, a counter bump, or an add to the total, all short enough
/// that finer-grained locking buys nothing and a lock-free queue would
/// only complicate the termination protocol.
pub struct TraversalState {
    inner: Mutex<Inner>,
    cond: Condvar,
}

impl TraversalState {
    /// Creates traversal state seeded with `root` as the sole pending
    /// directory (`pending == 1`, queue holding exactly `root`).
    #[must_use]
    pub fn seeded(root: PathBuf) -> Self {
        let mut queue = PathQueue::new(16);
        queue.push(root).expect("fresh queue always has room for its seed");
        Self {
            inner: Mutex::new(Inner {
                queue,
                pending: 1,
                total: 0,
                shutdown: false,
                error: false,
            }),
            cond: Condvar::new(),
        }
    }

    /// Blocks until there's a path to scan or the traversal is over, then
    /// claims one path if so.
    ///
    /// Waits while the queue is empty, shutdown is not set, and pending is
    /// nonzero (spurious wakeups are tolerated: the predicate is a loop,
    /// not an `if`). On wake, either exits (shutdown set, or queue empty
    /// with nothing pending) or pops exactly one path.
    pub fn acquire_work(&self) -> WorkItem {
        let mut guard = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        loop {
            if guard.shutdown || (guard.queue.is_empty() && guard.pending == 0) {
                return WorkItem::Exit;
            }
            if let Some(path) = guard.queue.pop() {
                return WorkItem::Scan(path);
            }
            guard = self
                .cond
                .wait(guard)
                .unwrap_or_else(std::sync::PoisonError::into_inner);
        }
    }

    /// Adds `blocks` to the running total: used both for a directory's own
    /// block count and for each non-directory child found while scanning it.
    pub fn add_blocks(&self, blocks: u64) {
        let mut guard = self.lock();
        guard.total += blocks;
    }

    /// Records that an unreadable entry was observed (sets the error flag)
    /// without otherwise changing `pending`.
    pub fn mark_error(&self) {
        let mut guard = self.lock();
        guard.error = true;
    }

    /// Enqueues a freshly discovered child directory and bumps `pending`,
    /// signalling one waiter (there is now exactly one more unit of work).
    ///
    /// On allocation failure the child is handed back to the caller, who is
    /// responsible for treating it as finished: set the error flag and
    /// don't expect a matching `pending` bump for it.
    pub fn push_child(&self, path: PathBuf) -> Result<(), PathBuf> {
        let mut guard = self.lock();
        guard.queue.push(path)?;
        guard.pending += 1;
        drop(guard);
        self.cond.notify_one();
        Ok(())
    }

    /// Marks one pending directory as finished (its scan, successful or
    /// not, has completed). Broadcasts if this was the last one: every
    /// worker waiting on "more work may arrive" must re-check the predicate.
    pub fn finish_directory(&self) {
        let mut guard = self.lock();
        guard.pending -= 1;
        let done = guard.pending == 0;
        drop(guard);
        if done {
            self.cond.notify_all();
        }
    }

    /// Sets the shutdown flag and wakes every waiter (used only when worker
    /// spawning fails during setup; see the root driver).
    pub fn shutdown(&self) {
        let mut guard = self.lock();
        guard.shutdown = true;
        drop(guard);
        self.cond.notify_all();
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.lock().total
    }

    #[must_use]
    pub fn had_error(&self) -> bool {
        self.lock().error
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
