//! Fixed-capacity slot buffer with blocking produce/consume.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::BufferError;
use crate::item::Item;
use crate::sync::{Arc, Condvar, Mutex, MutexGuard};

/// How a [`SlotBuffer`] picks the slot to fill and the slot to drain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotOrder {
    /// Insert into the lowest-index vacant slot, remove from the lowest-index
    /// occupied slot. Not FIFO once inserts and removes interleave.
    #[default]
    Positional,
    /// Ring order: items leave in the order they arrived.
    Fifo,
}

/// A thread-safe fixed-capacity buffer of optional slots.
///
/// `SlotBuffer<T>` holds up to `capacity` items. [`produce`](Self::produce)
/// blocks while every slot is occupied and [`consume`](Self::consume) blocks
/// while every slot is vacant. One mutex guards the slots and one condition
/// variable carries both "space available" and "item available" wake-ups,
/// which is sound for exactly one producer and one consumer: a notification
/// can only be meant for the other side. Waiters re-check their condition
/// on every wake, so spurious wake-ups are harmless.
///
/// Cloning shares the underlying buffer.
///
/// # Example
///
/// ```
/// use giztoy_slotbuf::{Item, SlotBuffer};
/// use std::thread;
///
/// let buf = SlotBuffer::new(2);
/// let producer_buf = buf.clone();
///
/// let producer = thread::spawn(move || {
///     for i in 0..5 {
///         producer_buf.produce(Item::new(i, 2)).unwrap();
///     }
///     producer_buf.close_write();
/// });
///
/// let mut seen = Vec::new();
/// while let Ok(item) = buf.consume() {
///     seen.push(item.value());
/// }
///
/// producer.join().unwrap();
/// seen.sort();
/// assert_eq!(seen, vec![0, 1, 2, 3, 4]);
/// ```
pub struct SlotBuffer<T> {
    inner: Arc<SlotBufferInner<T>>,
}

/// A slot buffer of work items.
pub type ItemBuffer = SlotBuffer<Item>;

struct SlotBufferInner<T> {
    state: Mutex<SlotState<T>>,
    changed: Condvar,
}

/// Slot storage. Only reachable through the mutex guard, so every method
/// here runs with the lock held.
struct SlotState<T> {
    slots: Vec<Option<T>>,
    order: SlotOrder,
    count: usize, // occupied slots
    head: usize,  // next slot to drain (fifo)
    tail: usize,  // next slot to fill (fifo)
    close_write: bool,
    shutdown: bool,
}

impl<T> SlotState<T> {
    fn new(capacity: usize, order: SlotOrder) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        SlotState {
            slots,
            order,
            count: 0,
            head: 0,
            tail: 0,
            close_write: false,
            shutdown: false,
        }
    }

    fn is_full(&self) -> bool {
        self.count == self.slots.len()
    }

    fn is_empty(&self) -> bool {
        self.count == 0
    }

    fn insert(&mut self, item: T) {
        assert!(!self.is_full(), "slotbuf: insert into a full buffer");

        let slot = match self.order {
            SlotOrder::Positional => self.slots.iter_mut().find(|slot| slot.is_none()),
            SlotOrder::Fifo => {
                let tail = self.tail;
                self.tail = (tail + 1) % self.slots.len();
                self.slots.get_mut(tail)
            }
        };
        match slot {
            Some(slot) if slot.is_none() => *slot = Some(item),
            _ => unreachable!("slotbuf: occupied count out of sync with slots"),
        }
        self.count += 1;
    }

    fn remove(&mut self) -> T {
        assert!(!self.is_empty(), "slotbuf: remove from an empty buffer");

        let item = match self.order {
            SlotOrder::Positional => self.slots.iter_mut().find_map(Option::take),
            SlotOrder::Fifo => {
                let head = self.head;
                self.head = (head + 1) % self.slots.len();
                self.slots[head].take()
            }
        };
        let Some(item) = item else {
            unreachable!("slotbuf: occupied count out of sync with slots");
        };
        self.count -= 1;
        item
    }
}

impl<T> Clone for SlotBuffer<T> {
    fn clone(&self) -> Self {
        SlotBuffer {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> SlotBuffer<T> {
    /// Creates a buffer with `capacity` slots and positional slot order.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        Self::with_order(capacity, SlotOrder::default())
    }

    /// Creates a buffer with `capacity` slots and the given slot order.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn with_order(capacity: usize, order: SlotOrder) -> Self {
        assert!(capacity > 0, "capacity must be greater than 0");
        SlotBuffer {
            inner: Arc::new(SlotBufferInner {
                state: Mutex::new(SlotState::new(capacity, order)),
                changed: Condvar::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SlotState<T>> {
        self.inner.state.lock().unwrap()
    }

    /// Returns the number of slots.
    pub fn capacity(&self) -> usize {
        self.lock().slots.len()
    }

    /// Returns the number of occupied slots.
    pub fn len(&self) -> usize {
        self.lock().count
    }

    /// Returns true if every slot is vacant.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Returns true if every slot is occupied.
    pub fn is_full(&self) -> bool {
        self.lock().is_full()
    }

    pub fn order(&self) -> SlotOrder {
        self.lock().order
    }

    /// Returns true once `close_write` or `shutdown` has been called.
    pub fn is_closed(&self) -> bool {
        let state = self.lock();
        state.close_write || state.shutdown
    }

    /// Inserts an item, blocking while the buffer is full.
    ///
    /// Returns `BufferError::Closed` if the write side is closed and
    /// `BufferError::Shutdown` if the buffer was shut down, including while
    /// this call was waiting. The item is dropped in both cases.
    pub fn produce(&self, item: T) -> Result<(), BufferError> {
        let mut state = self.lock();

        loop {
            if state.shutdown {
                return Err(BufferError::Shutdown);
            }
            if state.close_write {
                return Err(BufferError::Closed);
            }
            if !state.is_full() {
                break;
            }
            state = self.inner.changed.wait(state).unwrap();
        }

        state.insert(item);
        self.inner.changed.notify_one();
        Ok(())
    }

    /// Removes an item, blocking while the buffer is empty.
    ///
    /// After `close_write` the remaining items are still handed out, then
    /// `BufferError::Closed` is returned. After `shutdown` every call returns
    /// `BufferError::Shutdown` regardless of what is left in the slots.
    pub fn consume(&self) -> Result<T, BufferError> {
        let mut state = self.lock();

        loop {
            if state.shutdown {
                return Err(BufferError::Shutdown);
            }
            if !state.is_empty() {
                break;
            }
            if state.close_write {
                return Err(BufferError::Closed);
            }
            state = self.inner.changed.wait(state).unwrap();
        }

        let item = state.remove();
        self.inner.changed.notify_one();
        Ok(item)
    }

    /// Closes the write side.
    ///
    /// Further `produce` calls fail; `consume` drains what is left.
    pub fn close_write(&self) {
        let mut state = self.lock();
        if state.close_write {
            return;
        }
        state.close_write = true;
        self.inner.changed.notify_all();
    }

    /// Shuts the buffer down, waking every waiter.
    pub fn shutdown(&self) {
        let mut state = self.lock();
        if state.shutdown {
            return;
        }
        state.shutdown = true;
        self.inner.changed.notify_all();
    }
}

impl<T: Clone> SlotBuffer<T> {
    /// Returns a copy of every slot, indexed by position.
    pub fn snapshot(&self) -> Vec<Option<T>> {
        self.lock().slots.clone()
    }
}

impl<T> fmt::Debug for SlotBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("SlotBuffer")
            .field("capacity", &state.slots.len())
            .field("len", &state.count)
            .field("order", &state.order)
            .field("close_write", &state.close_write)
            .field("shutdown", &state.shutdown)
            .finish()
    }
}
