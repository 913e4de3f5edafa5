//! Pure timing logic library with no platform dependencies.
//! Testable on host, driven by the app's fixed-interval tick pump.

/// Seconds applied per tick (the pump fires every 10 ms).
pub const TICK_SECS: f64 = 0.01;

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum RunState {
    Stopped,
    Running,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum TimerMode {
    Stopwatch,
    Countdown,
}

/// Reported by `tick()` when a countdown run completes.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum TickEvent {
    Finished,
}

pub struct TimerEngine {
    pub state: RunState,
    mode: TimerMode,
    elapsed_secs: f64,
    countdown_start_secs: u32,
}

impl TimerEngine {
    pub fn new(mode: TimerMode, countdown_start_secs: u32) -> Self {
        Self {
            state: RunState::Stopped,
            mode,
            elapsed_secs: 0.0,
            countdown_start_secs,
        }
    }

    pub fn start(&mut self) {
        if self.state == RunState::Running {
            return;
        }
        self.state = RunState::Running;
    }

    pub fn stop(&mut self) {
        if self.state != RunState::Running {
            return;
        }
        self.state = RunState::Stopped;
    }

    /// Rearm the clock: zero for a stopwatch, the configured start value for
    /// a countdown. Ignored while running.
    pub fn reset(&mut self) {
        if self.state == RunState::Running {
            return;
        }
        self.elapsed_secs = match self.mode {
            TimerMode::Stopwatch => 0.0,
            TimerMode::Countdown => f64::from(self.countdown_start_secs),
        };
    }

    /// Load the configured start value into the clock, even mid-run. Used
    /// whenever the timer screen appears in countdown mode.
    pub fn prime_countdown(&mut self) {
        self.elapsed_secs = f64::from(self.countdown_start_secs);
    }

    /// Apply one fixed-size step. Ignored while stopped. A countdown clamps
    /// onto zero, and the tick after it lands there stops the engine and
    /// reports `Finished`, once per completed run.
    pub fn tick(&mut self) -> Option<TickEvent> {
        if self.state != RunState::Running {
            return None;
        }
        match self.mode {
            TimerMode::Stopwatch => {
                self.elapsed_secs += TICK_SECS;
                None
            }
            TimerMode::Countdown => {
                if self.elapsed_secs > 0.0 {
                    self.elapsed_secs = (self.elapsed_secs - TICK_SECS).max(0.0);
                    None
                } else {
                    self.state = RunState::Stopped;
                    Some(TickEvent::Finished)
                }
            }
        }
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_secs
    }

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: TimerMode) {
        self.mode = mode;
    }

    pub fn set_countdown_start(&mut self, secs: u32) {
        self.countdown_start_secs = secs;
    }

    pub fn countdown_start_secs(&self) -> u32 {
        self.countdown_start_secs
    }
}

/// Format non-negative seconds as "MM:SS,CC". Minutes grow past two digits
/// without truncation; seconds and hundredths are always two digits.
pub fn format_ms_cs(secs: f64) -> String {
    let whole = secs as u64;
    let minutes = whole / 60;
    let seconds = whole % 60;
    let centis = ((secs - secs.floor()) * 100.0) as u64;
    format!("{:02}:{:02},{:02}", minutes, seconds, centis)
}
