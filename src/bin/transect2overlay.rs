use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use transect_overlay::batch::OverlayBatch;
use transect_overlay::data_loader::{load_transect, probe_dimensions};
use transect_overlay::io::{write_outputs, write_report};
use transect_overlay::rig::CameraRig;
use transect_overlay::visualization::log_footprint;

#[derive(Parser)]
#[command(version, about, author)]
struct Cli {
    /// folder of transect JPEG frames
    #[arg(short, long)]
    directory: PathBuf,

    /// base name of the .kml and .json outputs
    #[arg(short, long, default_value = "output")]
    output: String,

    /// camera rig JSON
    #[arg(long)]
    rig: Option<String>,

    /// horizontal field of view in degrees
    #[arg(long)]
    fov: Option<f64>,

    #[arg(long)]
    image_width: Option<u32>,

    #[arg(long)]
    image_height: Option<u32>,

    /// camera offset from the navigation reference, meters
    #[arg(long, allow_hyphen_values = true)]
    offset_x: Option<f64>,

    #[arg(long, allow_hyphen_values = true)]
    offset_y: Option<f64>,

    /// take image width and height from the first frame
    #[arg(long)]
    probe_dimensions: bool,

    /// write a run summary JSON here
    #[arg(long)]
    report: Option<PathBuf>,

    /// save a footprint preview recording (.rrd)
    #[arg(long)]
    rerun: Option<String>,
}

fn build_rig(cli: &Cli) -> Result<CameraRig, Box<dyn std::error::Error>> {
    let mut rig = match &cli.rig {
        Some(path) => CameraRig::from_json_file(path)?,
        None => CameraRig::default(),
    };
    if let Some(fov) = cli.fov {
        rig.field_of_view = fov;
    }
    if cli.probe_dimensions {
        if let Some((w, h)) = probe_dimensions(&cli.directory)? {
            log::info!("using {}x{} from the first frame", w, h);
            rig.image_width = w;
            rig.image_height = h;
        }
    }
    if let Some(w) = cli.image_width {
        rig.image_width = w;
    }
    if let Some(h) = cli.image_height {
        rig.image_height = h;
    }
    if let Some(x) = cli.offset_x {
        rig.offset_x = x;
    }
    if let Some(y) = cli.offset_y {
        rig.offset_y = y;
    }
    rig.validate()?;
    Ok(rig)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    let rig = build_rig(&cli)?;
    log::debug!("{:?}", rig);

    let recording = match &cli.rerun {
        Some(path) => Some(rerun::RecordingStreamBuilder::new("transect_overlay").save(path)?),
        None => None,
    };

    let now = Instant::now();
    let frames = load_transect(&cli.directory)?;
    log::info!(
        "reading {} frames took {:.3} sec",
        frames.len(),
        now.elapsed().as_secs_f64()
    );

    let mut batch = OverlayBatch::new(rig);
    let mut anchor = None;
    for frame in frames {
        let id = frame.as_ref().map(|raw| raw.id).ok();
        let footprint = batch.ingest(frame);
        if let (Some(recording), Some(footprint), Some(id)) = (&recording, footprint, id) {
            let anchor = *anchor.get_or_insert(footprint.origin);
            log_footprint(recording, anchor, id, &footprint)?;
        }
    }

    write_outputs(&cli.output, &batch)?;
    if let Some(path) = &cli.report {
        write_report(path, &batch)?;
    }
    if !batch.diagnostics().is_empty() {
        log::warn!("{} frames skipped", batch.diagnostics().len());
    }
    Ok(())
}
