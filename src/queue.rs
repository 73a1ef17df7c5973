//! Pending edit queue between producers and one hook worker
//!
//! Multi-producer, single-consumer, append-only. Producers publish a
//! whole batch of records with one compare-and-swap on the shared tail
//! cursor; the consumer takes the entire chain with one atomic
//! exchange and walks it in append order. Appends never block, and no
//! lock guards the queue contents; only the two atomic operations
//! touch shared state.
//!
//! [`pending_queue`] returns the two halves mpsc-style: a cloneable
//! [`QueueWriter`] for producer call sites and a unique [`QueueReader`]
//! owned by the worker loop.

use std::ptr;
use std::sync::atomic::{AtomicPtr, Ordering};
use std::sync::Arc;

use crate::edit::EditRecord;

/// One appended record.
///
/// `next` points at the previous (older) node and is written only
/// before the node becomes reachable from the shared tail; published
/// nodes are never mutated.
struct Node {
    record: EditRecord,
    next: *mut Node,
}

/// State shared by both halves: the most recently appended node, or
/// null when the queue is empty.
struct Shared {
    tail: AtomicPtr<Node>,
}

/// Producer half. Clone freely; `append` is safe from any thread.
#[derive(Clone)]
pub struct QueueWriter {
    shared: Arc<Shared>,
}

/// Consumer half. Not cloneable, so exactly one drain site can exist.
pub struct QueueReader {
    shared: Arc<Shared>,
}

/// Create an empty queue, split into its producer and consumer halves.
pub fn pending_queue() -> (QueueWriter, QueueReader) {
    let shared = Arc::new(Shared {
        tail: AtomicPtr::new(ptr::null_mut()),
    });
    (
        QueueWriter {
            shared: Arc::clone(&shared),
        },
        QueueReader { shared },
    )
}

impl QueueWriter {
    /// Append a batch of records as a single atomic publish.
    ///
    /// Returns `true` when the queue was empty beforehand, meaning the
    /// consumer may be asleep and needs a wake signal. An empty batch
    /// returns `false` immediately: no allocation, no publish, no
    /// signal. A drain observes either none or all of a batch.
    pub fn append<I>(&self, records: I) -> bool
    where
        I: IntoIterator<Item = EditRecord>,
    {
        // Link the batch locally before publishing anything. The chain
        // threads newest to oldest, so each node points at the one
        // created just before it.
        let mut oldest: *mut Node = ptr::null_mut();
        let mut newest: *mut Node = ptr::null_mut();
        for record in records {
            let node = Box::into_raw(Box::new(Node {
                record,
                next: newest,
            }));
            if oldest.is_null() {
                oldest = node;
            }
            newest = node;
        }
        if newest.is_null() {
            return false;
        }

        let mut old_tail = self.shared.tail.load(Ordering::Relaxed);
        loop {
            // SAFETY: `oldest` is not yet reachable from the shared
            // tail; this thread still owns the whole batch.
            unsafe { (*oldest).next = old_tail };
            match self.shared.tail.compare_exchange_weak(
                old_tail,
                newest,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => return old_tail.is_null(),
                Err(current) => old_tail = current,
            }
        }
    }
}

impl QueueReader {
    /// Take every pending record in one atomic step.
    ///
    /// The snapshot and the reset are the same exchange, so records
    /// appended while the returned batch is being processed wait for
    /// the next call, never lost and never seen twice. Records come back
    /// in append order.
    pub fn drain_all(&mut self) -> Vec<EditRecord> {
        let snapshot = self.shared.tail.swap(ptr::null_mut(), Ordering::Acquire);
        let mut records = Vec::new();
        let mut node = snapshot;
        while !node.is_null() {
            // SAFETY: the exchange above transferred ownership of every
            // node in the chain to this reader, and producers never
            // dereference published nodes, so each box is reclaimed
            // exactly once.
            let boxed = unsafe { Box::from_raw(node) };
            node = boxed.next;
            records.push(boxed.record);
        }
        // The chain threads newest to oldest; flip into append order.
        records.reverse();
        records
    }

    /// True when nothing is pending. Racy by nature; useful only for
    /// diagnostics and tests.
    pub fn is_empty(&self) -> bool {
        self.shared.tail.load(Ordering::Acquire).is_null()
    }
}

impl Drop for QueueReader {
    fn drop(&mut self) {
        // Reclaim anything still queued.
        self.drain_all();
    }
}
