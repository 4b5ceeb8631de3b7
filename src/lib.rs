pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod patterns;
pub mod render;
pub mod rng;
pub mod scheduler;

use std::time::Instant;

use tracing::info;

pub use config::Params;
pub use engine::{Coord, Universe};
pub use error::{ConfigError, LifeError};
pub use grid::{Cells, EdgePolicy, Grid};
pub use scheduler::{Playback, Scheduler};

/// Result of a headless run: the final universe and its rendered frame.
pub struct Run {
    pub universe: Universe,
    pub rgba: Vec<u8>,
    pub canvas_w: u32,
    pub canvas_h: u32,
}

pub struct Timing {
    pub name: &'static str,
    pub ms: f64,
}

/// Build a universe from `params`, advance it `generations` frames and
/// render the last one.
pub fn run(params: &Params, generations: u64) -> Result<(Run, Vec<Timing>), ConfigError> {
    let mut timings = Vec::new();
    let total_start = Instant::now();

    // 1. Build
    let t = Instant::now();
    let mut universe = params.build()?;
    timings.push(Timing {
        name: "build",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });
    info!(
        width = universe.width(),
        height = universe.height(),
        live = universe.live_count(),
        "universe ready"
    );

    // 2. Simulate, one tick per frame
    let t = Instant::now();
    let mut scheduler = Scheduler::new();
    scheduler.play();
    for _ in 0..generations {
        scheduler.frame(&mut universe);
    }
    scheduler.pause();
    timings.push(Timing {
        name: "simulate",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    // 3. Render
    let t = Instant::now();
    let style = render::Style::default();
    let cells = universe.cells();
    let too_large = || ConfigError::CanvasTooLarge {
        width: cells.width(),
        height: cells.height(),
    };
    let (canvas_w, canvas_h) = style.canvas_size(&cells).ok_or_else(too_large)?;
    let rgba = render::render_cells(&cells, &style).ok_or_else(too_large)?;
    timings.push(Timing {
        name: "render",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    let total_ms = total_start.elapsed().as_secs_f64() * 1000.0;
    timings.push(Timing {
        name: "TOTAL",
        ms: total_ms,
    });

    let run = Run {
        universe,
        rgba,
        canvas_w,
        canvas_h,
    };

    Ok((run, timings))
}
