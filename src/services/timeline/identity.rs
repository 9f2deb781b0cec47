// Identifier and colour generation for locally created timeline events

use chrono::Utc;

use crate::models::timeline_event::{ColorToken, LOCAL_ID_PREFIX};

/// Source of fresh, unique ids for locally created events.
pub trait IdGenerator: Send {
    fn next_id(&mut self) -> String;
}

/// `local-{millis}-{counter}`, both in base 36.
#[derive(Debug, Default)]
pub struct TimestampIdGenerator {
    counter: u64,
}

impl TimestampIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for TimestampIdGenerator {
    fn next_id(&mut self) -> String {
        self.counter += 1;
        let millis = Utc::now().timestamp_millis().max(0) as u64;
        format!(
            "{}{}-{}",
            LOCAL_ID_PREFIX,
            to_base36(millis),
            to_base36(self.counter)
        )
    }
}

/// `local-1`, `local-2`, ...
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    next: u64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&mut self) -> String {
        self.next += 1;
        format!("{}{}", LOCAL_ID_PREFIX, self.next)
    }
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

/// Walks the palette with a stride of 3. Since 3 and 8 are coprime every
/// colour is visited once per eight events.
#[derive(Debug, Clone)]
pub struct ColorCycle {
    index: usize,
}

const COLOR_STRIDE: usize = 3;

impl ColorCycle {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            index: (seed % ColorToken::ALL.len() as u64) as usize,
        }
    }

    /// Seeded from the wall clock so each session starts somewhere different.
    pub fn from_clock() -> Self {
        Self::from_seed(Utc::now().timestamp_millis().max(0) as u64)
    }

    pub fn next_color(&mut self) -> ColorToken {
        let color = ColorToken::cycled(self.index);
        self.index = (self.index + COLOR_STRIDE) % ColorToken::ALL.len();
        color
    }
}

impl Default for ColorCycle {
    fn default() -> Self {
        Self::from_seed(0)
    }
}
