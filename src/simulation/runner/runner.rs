use std::time::Duration;

use super::{Command, FrameView, SimulationCore, Ticker};

/// Receives one frame per loop iteration and may hand back input
pub trait Presenter {
    fn present(&mut self, frame: FrameView<'_>);

    /// Commands to apply before the next ticks
    fn poll_commands(&mut self) -> Vec<Command> {
        Vec::new()
    }
}

/// Drives a simulation at its configured tick rate
pub struct SimulationLoop {
    sim: SimulationCore,
    ticker: Ticker,
}

impl SimulationLoop {
    pub fn new(sim: SimulationCore) -> Self {
        let ticker = Ticker::new(sim.config().ticks_per_second, sim.config().max_ticks_per_frame);
        Self { sim, ticker }
    }

    pub fn sim(&self) -> &SimulationCore {
        &self.sim
    }

    pub fn sim_mut(&mut self) -> &mut SimulationCore {
        &mut self.sim
    }

    pub fn into_inner(self) -> SimulationCore {
        self.sim
    }

    /// One loop iteration: apply input, run the due ticks, present once.
    /// Returns the number of ticks run.
    pub fn run_frame<P: Presenter>(&mut self, elapsed: Duration, presenter: &mut P) -> u32 {
        for command in presenter.poll_commands() {
            self.sim.apply_command(command);
        }
        let ticks = self.ticker.advance(elapsed);
        self.sim.step_n(ticks);
        presenter.present(self.sim.frame_view());
        ticks
    }

    /// Run until `running` is cleared, sleeping out the rest of each tick period
    #[cfg(not(target_arch = "wasm32"))]
    pub fn run<P: Presenter>(&mut self, running: &std::sync::atomic::AtomicBool, presenter: &mut P) {
        use std::sync::atomic::Ordering;
        use std::time::Instant;
        use tracing::info;

        info!(tps = self.sim.config().ticks_per_second, "simulation loop started");
        let mut last = Instant::now();
        while running.load(Ordering::Relaxed) {
            let frame_start = Instant::now();
            let elapsed = frame_start - last;
            last = frame_start;
            self.run_frame(elapsed, presenter);
            std::thread::sleep(self.ticker.period().saturating_sub(frame_start.elapsed()));
        }
        info!(tick = self.sim.tick(), "simulation loop stopped");
    }
}
