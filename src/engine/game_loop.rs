/// Frame timing for the simulation
///
/// Implements a variable timestep loop: every frame the physics world is
/// stepped once with the wall-clock time since the previous frame, scaled by
/// `TIME_SCALE`. The delta is deliberately not clamped, so a stalled frame
/// produces one large step.
use std::time::{Duration, Instant};

/// Multiplier applied to elapsed wall-clock time (the simulation runs at 2x)
pub const TIME_SCALE: f64 = 2.0;

/// FPS tracking window (average over last N frames)
const FPS_WINDOW_SIZE: usize = 60;

/// Game loop timing state
pub struct GameLoop {
    /// Time of last frame
    last_frame_time: Instant,

    /// Whether the simulation is paused
    paused: bool,

    /// Frame timing history for FPS calculation
    frame_times: Vec<Duration>,

    /// Current frame number
    frame_count: u64,

    /// Total simulated time handed out through `dt`
    simulated_time: f64,

    /// Current FPS (updated periodically)
    current_fps: f32,

    /// Unscaled wall-clock time of the last frame (in seconds)
    render_delta_time: f32,
}

impl GameLoop {
    /// Create a new game loop
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            last_frame_time: now,
            paused: false,
            frame_times: Vec::with_capacity(FPS_WINDOW_SIZE),
            frame_count: 0,
            simulated_time: 0.0,
            current_fps: 0.0,
            render_delta_time: 0.0,
        }
    }

    /// Begin a new frame, returns the scaled physics `dt` (0 while paused)
    pub fn begin_frame(&mut self) -> f64 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.advance(frame_time)
    }

    /// Account for a frame that took `frame_time` of wall-clock time
    fn advance(&mut self, frame_time: Duration) -> f64 {
        self.frame_count += 1;

        // Store frame time for FPS calculation
        self.frame_times.push(frame_time);
        if self.frame_times.len() > FPS_WINDOW_SIZE {
            self.frame_times.remove(0);
        }

        // Update FPS counter every 10 frames
        if self.frame_count % 10 == 0 {
            self.update_fps();
        }

        self.render_delta_time = frame_time.as_secs_f32();

        if self.paused {
            return 0.0;
        }

        let dt = frame_time.as_secs_f64() * TIME_SCALE;
        self.simulated_time += dt;
        dt
    }

    /// Get the delta time since last render (in seconds, unscaled)
    pub fn render_delta_time(&self) -> f32 {
        self.render_delta_time
    }

    /// Get current FPS
    pub fn fps(&self) -> f32 {
        self.current_fps
    }

    /// Get total simulated time in seconds
    pub fn simulated_time(&self) -> f64 {
        self.simulated_time
    }

    /// Get total number of frames
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Check if the simulation is paused
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pause the simulation
    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Simulation paused");
        }
    }

    /// Resume the simulation
    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            // Drop the time spent paused so the next step isn't huge
            self.last_frame_time = Instant::now();
            log::info!("Simulation resumed");
        }
    }

    /// Toggle pause state
    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Update FPS calculation
    fn update_fps(&mut self) {
        if self.frame_times.is_empty() {
            self.current_fps = 0.0;
            return;
        }

        // Calculate average frame time
        let total: Duration = self.frame_times.iter().sum();
        let avg_frame_time = total / self.frame_times.len() as u32;

        // Convert to FPS
        self.current_fps = if avg_frame_time.as_secs_f32() > 0.0 {
            1.0 / avg_frame_time.as_secs_f32()
        } else {
            0.0
        };
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}
