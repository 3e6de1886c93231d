//! Free time on a single calendar date.
//!
//! Finds the open slots inside the working window that existing blocks leave
//! free. Used to turn a "reschedule" strategy into a concrete time.

mod gap;

pub use gap::{find_open_slots, first_open_slot, OpenSlot, OpenSlotFinder};
