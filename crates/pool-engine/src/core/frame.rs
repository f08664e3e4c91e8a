/// Per-frame callback scheduler.
///
/// Models the host's "request next animation frame" loop as an explicit
/// object: callbacks are registered once with [`FrameScheduler::on_each_frame`]
/// and every call to [`FrameScheduler::run_frame`] invokes each of them
/// exactly once, in registration order. Tests drive discrete ticks instead
/// of real frame timing.
pub struct FrameScheduler<S> {
    callbacks: Vec<(&'static str, FrameCallback<S>)>,
    frame: u64,
}

/// A callback run once per frame with mutable access to the shared state.
pub type FrameCallback<S> = Box<dyn FnMut(&mut S, FrameTick)>;

/// Timing information handed to every frame callback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTick {
    /// Monotonic frame counter, starting at 1 for the first frame.
    pub frame: u64,
    /// Wall-clock seconds since the previous frame, as reported by the host.
    pub dt: f32,
}

impl<S> FrameScheduler<S> {
    pub fn new() -> Self {
        Self {
            callbacks: Vec::new(),
            frame: 0,
        }
    }

    /// Register a callback to run on every subsequent frame.
    pub fn on_each_frame(
        &mut self,
        name: &'static str,
        callback: impl FnMut(&mut S, FrameTick) + 'static,
    ) {
        log::debug!("Frame callback registered: {}", name);
        self.callbacks.push((name, Box::new(callback)));
    }

    /// Run one frame: every registered callback once.
    pub fn run_frame(&mut self, state: &mut S, dt: f32) -> FrameTick {
        self.frame += 1;
        let tick = FrameTick { frame: self.frame, dt };
        for (_, callback) in self.callbacks.iter_mut() {
            callback(state, tick);
        }
        tick
    }

    /// Number of frames run so far.
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

}

impl<S> Default for FrameScheduler<S> {
    fn default() -> Self {
        Self::new()
    }
}
