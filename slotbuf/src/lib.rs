//! Fixed-capacity slot buffer for one producer and one consumer.
//!
//! [`SlotBuffer<T>`] is a bounded buffer of `capacity` slots guarded by a
//! single mutex and a single condition variable:
//!
//! - [`produce`](SlotBuffer::produce) blocks while every slot is occupied
//! - [`consume`](SlotBuffer::consume) blocks while every slot is vacant
//!
//! ```
//! use giztoy_slotbuf::{Item, ItemBuffer};
//!
//! let buf = ItemBuffer::new(2);
//! buf.produce(Item::new(5, 3)).unwrap();
//! buf.produce(Item::new(7, 4)).unwrap();
//! assert!(buf.is_full());
//!
//! assert_eq!(buf.consume().unwrap(), Item::new(5, 3));
//! ```
//!
//! # Slot Order
//!
//! By default slots are picked positionally: the lowest vacant slot is filled
//! and the lowest occupied slot is drained, so items do not necessarily leave
//! in arrival order. [`SlotOrder::Fifo`] switches to ring order.
//!
//! ```
//! use giztoy_slotbuf::{SlotBuffer, SlotOrder};
//!
//! let buf = SlotBuffer::with_order(2, SlotOrder::Fifo);
//! buf.produce(1).unwrap();
//! buf.produce(2).unwrap();
//! assert_eq!(buf.consume().unwrap(), 1);
//! buf.produce(3).unwrap();
//! assert_eq!(buf.consume().unwrap(), 2);
//! ```
//!
//! # Closing
//!
//! - `close_write()`: rejects new items, lets the consumer drain the rest
//! - `shutdown()`: wakes and fails every pending and future call
//!
//! # Model Checking
//!
//! Built with `RUSTFLAGS="--cfg loom"`, the buffer runs on loom's
//! primitives and `tests/loom.rs` explores its interleavings.

mod error;
mod item;
mod slot_buffer;
mod sync;

pub use error::BufferError;
pub use item::Item;
pub use slot_buffer::{ItemBuffer, SlotBuffer, SlotOrder};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SlotBuffer<i32>>();
        assert_send_sync::<ItemBuffer>();
    }

    #[test]
    fn test_buffer_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<SlotBuffer<i32>>();
    }
}
