//! The unit of work passed from producer to consumer.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An immutable work item.
///
/// `value` is the payload the consumer reports. `delay_secs` is how long the
/// consumer spends "processing" the item once it has taken it out of the
/// buffer, in pacing units (seconds unless a run scales time).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Item {
    value: u32,
    delay_secs: u32,
}

impl Item {
    pub const fn new(value: u32, delay_secs: u32) -> Self {
        Item { value, delay_secs }
    }

    pub const fn value(&self) -> u32 {
        self.value
    }

    pub const fn delay_secs(&self) -> u32 {
        self.delay_secs
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{value: {}, delay: {}s}}", self.value, self.delay_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_accessors() {
        let item = Item::new(5, 3);
        assert_eq!(item.value(), 5);
        assert_eq!(item.delay_secs(), 3);
    }

    #[test]
    fn test_item_display() {
        assert_eq!(Item::new(7, 4).to_string(), "{value: 7, delay: 4s}");
    }
}
