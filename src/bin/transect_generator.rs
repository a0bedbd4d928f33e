use std::io::Cursor;
use std::path::Path;

use clap::{Parser, Subcommand};
use image::{DynamicImage, ImageFormat, RgbImage};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use transect_overlay::metadata::insert_comment;
use transect_overlay::pose::format_coordinate;
use transect_overlay::projection::to_geodetic;
use transect_overlay::types::{GeoCoord, PlanarPoint};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a synthetic transect of JPEG frames with pose comments
    Generate {
        /// Output directory
        #[arg(short, long)]
        output: String,

        /// Number of frames to generate
        #[arg(short, long, default_value = "20")]
        num_frames: usize,

        /// Start latitude, decimal degrees
        #[arg(long, default_value = "45.5", allow_hyphen_values = true)]
        latitude: f64,

        /// Start longitude, decimal degrees
        #[arg(long, default_value = "-70.25", allow_hyphen_values = true)]
        longitude: f64,

        /// Track bearing in degrees
        #[arg(long, default_value = "30.0")]
        heading: f64,

        /// Meters between consecutive frames
        #[arg(long, default_value = "2.0")]
        spacing: f64,

        /// Altitude above the sea floor, meters
        #[arg(long, default_value = "3.0")]
        altitude: f64,

        /// Image width
        #[arg(long, default_value = "800")]
        width: u32,

        /// Image height
        #[arg(long, default_value = "600")]
        height: u32,

        #[arg(long, default_value = "0")]
        seed: u64,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    match args.command {
        Commands::Generate {
            output,
            num_frames,
            latitude,
            longitude,
            heading,
            spacing,
            altitude,
            width,
            height,
            seed,
        } => {
            let track = Track {
                start: GeoCoord::new(latitude, longitude),
                heading,
                spacing,
                altitude,
            };
            generate_transect(&output, &track, num_frames, width, height, seed)?;
        }
    }

    Ok(())
}

struct Track {
    start: GeoCoord,
    heading: f64,
    spacing: f64,
    altitude: f64,
}

fn pose_comment(position: GeoCoord, track: &Track, rng: &mut ChaCha8Rng) -> String {
    let roll: f64 = rng.random_range(-5.0..5.0);
    let pitch: f64 = rng.random_range(-5.0..5.0);
    let heading = (track.heading + rng.random_range(-3.0f64..3.0)).rem_euclid(360.0);
    let altitude = track.altitude + rng.random_range(-0.2f64..0.2);
    format!(
        "<entry><auvstate><lat>{}</lat><lon>{}</lon><altitude>{:.3}</altitude>\
         <heading>{:.2}</heading><pitch>{:.2}</pitch><roll>{:.2}</roll>\
         <surge>0.50</surge></auvstate><camera><white-balance_bu>1.0</white-balance_bu>\
         <jpeg_quality>90</jpeg_quality></camera></entry>",
        format_coordinate(position.lat, true),
        format_coordinate(position.lon, false),
        altitude,
        heading,
        pitch,
        roll
    )
}

fn generate_transect(
    output_dir: &str,
    track: &Track,
    num_frames: usize,
    width: u32,
    height: u32,
    seed: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    use std::fs;

    fs::create_dir_all(output_dir)?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let mut jpeg: Vec<u8> = Vec::new();
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, image::Rgb([20, 60, 90])))
        .write_to(&mut Cursor::new(&mut jpeg), ImageFormat::Jpeg)?;

    let bearing = track.heading.to_radians();
    let step = PlanarPoint::new(bearing.sin(), bearing.cos()) * track.spacing;
    for frame_idx in 0..num_frames {
        let position = to_geodetic(track.start, step * frame_idx as f64);
        let comment = pose_comment(position, track, &mut rng);
        let filename = format!("frame{:06}_cam0.jpg", frame_idx);
        fs::write(Path::new(output_dir).join(filename), insert_comment(&jpeg, &comment))?;
    }

    log::info!("generated {} frames in {}", num_frames, output_dir);
    Ok(())
}
