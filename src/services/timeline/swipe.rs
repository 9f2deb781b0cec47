//! Horizontal page-swipe detection for day-to-day navigation.
//!
//! Separate from the interval-creation gesture: this tracker only cares about
//! horizontal movement and gives up on any move dominated by the vertical axis,
//! leaving that to the scroll area.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    /// Finger moved right-to-left: advance to the next day.
    Left,
    /// Finger moved left-to-right: go back to the previous day.
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeConfig {
    /// Minimum horizontal travel, in points.
    pub threshold: f32,
    /// Minimum average speed, in points per millisecond.
    pub min_velocity: f32,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            threshold: 50.0,
            min_velocity: 0.3,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct SwipeStart {
    x: f32,
    y: f32,
    time_ms: f64,
    width: f32,
}

#[derive(Debug, Clone, Default)]
pub struct SwipeTracker {
    config: SwipeConfig,
    start: Option<SwipeStart>,
    offset: f32,
}

impl SwipeTracker {
    pub fn new(config: SwipeConfig) -> Self {
        Self {
            config,
            start: None,
            offset: 0.0,
        }
    }

    pub fn is_swiping(&self) -> bool {
        self.start.is_some()
    }

    /// Current horizontal displacement, positive to the right.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Page-flip progress in `0.0..=1.0`.
    pub fn progress(&self) -> f32 {
        match self.start {
            Some(start) if start.width > 0.0 => (self.offset.abs() / start.width).min(1.0),
            _ => 0.0,
        }
    }

    /// Begin tracking. Presses on buttons, links and other interactive
    /// controls never start a swipe.
    pub fn press(&mut self, x: f32, y: f32, time_ms: f64, width: f32, on_interactive: bool) -> bool {
        if on_interactive {
            return false;
        }
        self.start = Some(SwipeStart {
            x,
            y,
            time_ms,
            width,
        });
        self.offset = 0.0;
        true
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        let Some(start) = self.start else {
            return;
        };
        let dx = x - start.x;
        let dy = y - start.y;
        if dy.abs() > dx.abs() {
            return;
        }
        self.offset = dx;
    }

    /// Finish tracking and report a swipe if it was long and fast enough.
    pub fn release(&mut self, time_ms: f64) -> Option<SwipeDirection> {
        let start = self.start.take()?;
        let dx = std::mem::take(&mut self.offset);

        let elapsed = (time_ms - start.time_ms).max(1.0);
        let velocity = f64::from(dx.abs()) / elapsed;

        if dx.abs() <= self.config.threshold || velocity <= f64::from(self.config.min_velocity) {
            return None;
        }

        if dx < 0.0 {
            Some(SwipeDirection::Left)
        } else {
            Some(SwipeDirection::Right)
        }
    }

    pub fn cancel(&mut self) {
        self.start = None;
        self.offset = 0.0;
    }
}
