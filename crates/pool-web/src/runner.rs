use pool_engine::{
    AnimationSurface, EngineContext, FrameScheduler, Game, GameConfig, InputEvent, InputQueue,
};

/// Everything the frame callbacks mutate.
pub struct RunnerState<G: Game> {
    pub game: G,
    pub ctx: EngineContext,
    pub input: InputQueue,
}

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game creates a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export generic
/// structs directly.
///
/// Every frame runs two scheduler callbacks: `step` (input, one physics step,
/// post-step resolution) and then `sync` (push state to the animation layer).
pub struct GameRunner<G: Game + 'static> {
    state: RunnerState<G>,
    scheduler: FrameScheduler<RunnerState<G>>,
    config: GameConfig,
    initialized: bool,
}

impl<G: Game + 'static> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let mut scheduler = FrameScheduler::new();
        scheduler.on_each_frame("step", |s: &mut RunnerState<G>, _| {
            s.ctx.clear_frame_data();
            s.game.update(&mut s.ctx, &s.input);
            s.input.drain();
            s.ctx.step_physics();
            s.game.post_step(&mut s.ctx);
        });
        scheduler.on_each_frame("sync", |s: &mut RunnerState<G>, _| {
            s.game.present(&mut s.ctx);
        });

        Self {
            state: RunnerState {
                game,
                ctx: EngineContext::with_config(&config),
                input: InputQueue::new(),
            },
            scheduler,
            config,
            initialized: false,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.state.game.init(&mut self.state.ctx);
        self.initialized = true;
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.state.input.push(event);
    }

    /// Run one frame. Physics advances by the configured fixed step
    /// regardless of `dt`.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }
        self.scheduler.run_frame(&mut self.state, dt);
        let max = self.config.max_events;
        if self.state.ctx.events.len() > max {
            log::warn!("Dropping {} game events over capacity", self.state.ctx.events.len() - max);
            self.state.ctx.events.truncate(max);
        }
    }

    /// Canvas pixel size reported by the host.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.ctx.set_canvas(width, height);
    }

    pub fn attach_surface(&mut self, surface: Box<dyn AnimationSurface>) {
        self.state.ctx.set_surface(surface);
        log::info!("Animation surface attached");
    }

    /// Apply host settings. Malformed JSON is logged and ignored.
    pub fn load_settings(&mut self, json: &str) {
        if let Err(e) = self.state.game.load_settings(json) {
            log::warn!("Ignoring malformed settings: {}", e);
        }
    }

    pub fn state(&self) -> &RunnerState<G> {
        &self.state
    }

    pub fn frame_count(&self) -> u64 {
        self.scheduler.frame_count()
    }

    // ---- Pointer accessors for host reads ----

    pub fn game_events_ptr(&self) -> *const f32 {
        self.state.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.state.ctx.events.len() as u32
    }

    pub fn world_width(&self) -> f32 {
        self.config.world_width
    }

    pub fn world_height(&self) -> f32 {
        self.config.world_height
    }

    pub fn max_events(&self) -> u32 {
        self.config.max_events as u32
    }
}
