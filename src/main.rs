//! Snowball Snowman headless entry point
//!
//! Windowing and rendering live elsewhere; this binary drives the simulation
//! with a scripted player that builds one snowman and logs what happens.
//! Set `SNOWMAN_TUNING=path/to/tuning.json` to override the layout.

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use glam::Vec2;
    use snowball_snowman::Tuning;
    use snowball_snowman::sim::{GameState, TickInput, tick};

    /// Give up on a walk after this many ticks
    const MAX_WALK_TICKS: u32 = 10_000;

    pub struct Demo {
        pub state: GameState,
    }

    impl Demo {
        pub fn new(tuning: Tuning) -> Self {
            Self {
                state: GameState::new(tuning),
            }
        }

        fn step(&mut self, input: &TickInput) {
            tick(&mut self.state, input);
            for event in self.state.drain_events() {
                log::info!("[tick {}] {:?}", self.state.time_ticks, event);
            }
        }

        fn player_pos(&self) -> Option<Vec2> {
            self.state.player.as_ref().map(|p| p.pos)
        }

        fn click(&mut self, point: Vec2) {
            self.step(&TickInput {
                activate: Some(point),
                ..Default::default()
            });
        }

        /// Walk toward `target` one step per tick, optionally holding roll
        fn walk_to(&mut self, target: Vec2, roll: bool) {
            let speed = self.state.tuning.player_speed;
            for _ in 0..MAX_WALK_TICKS {
                let Some(pos) = self.player_pos() else {
                    return;
                };
                let delta = target - pos;
                let axis = |d: f32| if d.abs() < speed { 0.0 } else { d.signum() };
                let dir = Vec2::new(axis(delta.x), axis(delta.y));
                if dir == Vec2::ZERO {
                    return;
                }
                self.step(&TickInput {
                    move_dir: dir,
                    roll,
                    ..Default::default()
                });
            }
            log::warn!("Gave up walking to {target}");
        }

        fn roll(&mut self, ticks: u32) {
            for _ in 0..ticks {
                self.step(&TickInput {
                    roll: true,
                    ..Default::default()
                });
            }
        }

        fn release(&mut self) {
            self.step(&TickInput::default());
        }

        /// Roll a ball for `ticks` near the zone seam and drop it at `drop_at`
        fn build_tier(&mut self, ticks: u32, drop_at: Vec2) {
            let world = self.state.world;
            let roll_at = Vec2::new(world.rolling_zone.max.x - 40.0, drop_at.y);
            self.walk_to(roll_at, false);
            self.roll(ticks);
            self.walk_to(drop_at, true);
            self.release();
        }

        pub fn run(&mut self) {
            let control = self.state.play_control.center();
            self.click(control);

            let world = self.state.world;
            let x = world.building_zone.center().x;
            let ground = world.height * 2.0 / 3.0;

            self.build_tier(250, Vec2::new(x, ground));
            self.build_tier(100, Vec2::new(x, ground - 80.0));
            self.build_tier(1, Vec2::new(x, ground - 150.0));
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use snowball_snowman::Tuning;
    use snowball_snowman::consts::TICK_HZ;

    env_logger::init();
    log::info!("Snowball Snowman (headless) starting...");

    let tuning = match std::env::var_os("SNOWMAN_TUNING") {
        Some(path) => Tuning::load(&path)
            .with_context(|| format!("loading tuning from {}", path.to_string_lossy()))?,
        None => Tuning::default(),
    };

    let mut demo = demo::Demo::new(tuning);
    demo.run();

    let state = &demo.state;
    if !state.phase.is_terminal() {
        log::warn!("Demo ended before the snowman was finished");
    }
    println!("Phase: {}", state.phase.as_str());
    println!(
        "Ticks: {} ({:.1}s at {} Hz)",
        state.time_ticks,
        state.time_ticks as f64 / f64::from(TICK_HZ),
        TICK_HZ
    );
    for snowman in state.snowmen() {
        let sizes: Vec<String> = snowman
            .tiers()
            .iter()
            .flatten()
            .filter_map(|&id| state.ball(id))
            .map(|b| format!("{:.1}", b.size()))
            .collect();
        println!(
            "{}: {:?} [{}]",
            snowman.id,
            snowman.stage(),
            sizes.join(", ")
        );
    }
    println!("Loose balls: {}", state.loose_balls().count());
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The simulation is driven by the host page; nothing to run here
}
