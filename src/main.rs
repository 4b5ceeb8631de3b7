use std::path::PathBuf;

use lifegrid::config::Params;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    let generations: u64 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(100);
    let out_dir: PathBuf = args
        .get(2)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("artifacts"));
    let params = match args.get(3) {
        Some(path) => Params::load(&PathBuf::from(path)).expect("failed to load config"),
        None => Params::default(),
    };

    std::fs::create_dir_all(&out_dir).expect("failed to create output directory");

    info!(
        width = params.width,
        height = params.height,
        generations,
        "simulating"
    );

    let (run, timings) = lifegrid::run(&params, generations).expect("failed to build universe");

    for t in &timings {
        info!("{:20} {:8.1} ms", t.name, t.ms);
    }

    let path = out_dir.join("final.png");
    image::save_buffer(
        &path,
        &run.rgba,
        run.canvas_w,
        run.canvas_h,
        image::ColorType::Rgba8,
    )
    .expect("failed to save image");
    info!(path = %path.display(), live = run.universe.live_count(), "saved");

    if run.universe.width() <= 80 {
        print!("{}", run.universe);
    }
}
