use std::path::PathBuf;

use clap::{value_t, App, AppSettings, Arg};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hdr::{RleMode, WriteOptions};
use lib::SkydomeConfig;
use sky_model::SkyParams;

fn main() {
    let matches = App::new("Skydome")
        .version("0.1")
        .about("Renders an analytic daylight sky to a Radiance .hdr skydome image")
        .setting(AppSettings::AllowNegativeNumbers)
        .arg(
            Arg::with_name("OUTPUT")
                .help("output .hdr file")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("WIDTH")
                .help("image width in pixels, at least 8")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::with_name("HEIGHT")
                .help("image height in pixels")
                .required(true)
                .index(3),
        )
        .arg(
            Arg::with_name("TURBIDITY")
                .help("atmospheric turbidity, 2 to 10")
                .required(true)
                .index(4),
        )
        .arg(
            Arg::with_name("ALBEDO")
                .help("ground albedo, 0 to 1")
                .required(true)
                .index(5),
        )
        .arg(
            Arg::with_name("SOLAR_ELEVATION")
                .help("sun elevation above the horizon in radians, 0 to π/2")
                .required(true)
                .index(6),
        )
        .arg(
            Arg::with_name("rle_runs")
                .long("rle-runs")
                .help("Compresses runs of identical bytes instead of writing every scanline literally"),
        )
        .arg(
            Arg::with_name("comment")
                .long("comment")
                .value_name("TEXT")
                .help("Sets the text of the header's comment line")
                .takes_value(true),
        )
        .get_matches();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skydome=info,lib=info,hdr=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    let width = value_t!(matches, "WIDTH", usize).unwrap_or_else(|e| e.exit());
    let height = value_t!(matches, "HEIGHT", usize).unwrap_or_else(|e| e.exit());
    let turbidity = value_t!(matches, "TURBIDITY", f64).unwrap_or_else(|e| e.exit());
    let albedo = value_t!(matches, "ALBEDO", f64).unwrap_or_else(|e| e.exit());
    let solar_elevation = value_t!(matches, "SOLAR_ELEVATION", f64).unwrap_or_else(|e| e.exit());

    let mut options = WriteOptions::default();
    if matches.is_present("rle_runs") {
        options.rle = RleMode::Adaptive;
    }
    if let Some(comment) = matches.value_of("comment") {
        options.comment = comment.into();
    }

    let config = SkydomeConfig {
        output: PathBuf::from(matches.value_of_os("OUTPUT").unwrap()),
        width,
        height,
        sky: SkyParams {
            turbidity,
            albedo,
            solar_elevation,
        },
        options,
    };

    if let Err(e) = lib::run(&config) {
        tracing::error!("{}", e);
        std::process::exit(e.exit_code());
    }
}
