use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Arg, ArgAction, ArgMatches, Command, crate_version, value_parser};
use mosaique_rs::image_pipeline::{
    Algorithm, BakeConfig, DecodedMosaicSet, MosaicChannel, MosaicView, Msq3BakePipeline,
    RgbImageWriter, StandardTiffWriter, TiffCompression,
    debayer::demosaic,
    metrics,
    mosaicing::{apply_bayer_mosaic, colorized_view},
    msq3,
    tiff::{read_gray8_tiff, read_rgb8_tiff},
};
use mosaique_rs::logger;

use tracing::{error, info, warn};

fn create_app() -> Command {
    Command::new("mosaique")
        .version(crate_version!())
        .about("Decode MSQ3 containers and demosaic their Bayer mosaics")
        .subcommand_required(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Print debug messages"),
        )
        .subcommand(
            Command::new("bake")
                .about("Demosaic all three mosaics of an MSQ3 file into TIFF images")
                .arg(Arg::new("INPUT").required(true).value_parser(value_parser!(PathBuf)).help("Input .msq3 file"))
                .arg(
                    Arg::new("OUTPUT")
                        .short('o')
                        .long("output")
                        .value_parser(value_parser!(PathBuf))
                        .default_value(".")
                        .help("Output directory"),
                )
                .arg(
                    Arg::new("algorithm")
                        .short('a')
                        .long("algorithm")
                        .value_parser(value_parser!(Algorithm))
                        .default_value("bilinear")
                        .help("'bilinear' or 'mhc'"),
                )
                .arg(
                    Arg::new("compression")
                        .short('c')
                        .long("compression")
                        .value_parser(value_parser!(TiffCompression))
                        .default_value("none")
                        .help("'none', 'lzw', 'deflate-fast', 'deflate' or 'deflate-best'"),
                )
                .arg(
                    Arg::new("predictor")
                        .long("predictor")
                        .value_parser(value_parser!(u16))
                        .help("TIFF predictor (2 = horizontal differencing)"),
                )
                .arg(
                    Arg::new("sequential")
                        .long("sequential")
                        .action(ArgAction::SetTrue)
                        .help("Demosaic on a single thread"),
                )
                .arg(
                    Arg::new("timings")
                        .long("timings")
                        .action(ArgAction::SetTrue)
                        .help("Print a per-step timing summary"),
                ),
        )
        .subcommand(
            Command::new("info")
                .about("Show MSQ3 header and channel sizes")
                .arg(Arg::new("INPUT").required(true).value_parser(value_parser!(PathBuf)).help("Input .msq3 file")),
        )
        .subcommand(
            Command::new("evaluate")
                .about("Mosaic an RGB TIFF, demosaic it again and report PSNR and SSIM")
                .arg(Arg::new("INPUT").required(true).value_parser(value_parser!(PathBuf)).help("Reference RGB TIFF"))
                .arg(
                    Arg::new("algorithm")
                        .short('a')
                        .long("algorithm")
                        .value_parser(value_parser!(Algorithm))
                        .help("Only evaluate 'bilinear' or 'mhc' (default: both)"),
                )
                .arg(
                    Arg::new("cfa-view")
                        .long("cfa-view")
                        .value_parser(value_parser!(PathBuf))
                        .help("Also write the colourised mosaic to this TIFF file"),
                ),
        )
        .subcommand(
            Command::new("pack")
                .about("Pack three 8-bit grayscale TIFF mosaics into an MSQ3 file")
                .arg(Arg::new("R").required(true).value_parser(value_parser!(PathBuf)).help("R mosaic"))
                .arg(Arg::new("G").required(true).value_parser(value_parser!(PathBuf)).help("G mosaic"))
                .arg(Arg::new("B").required(true).value_parser(value_parser!(PathBuf)).help("B mosaic"))
                .arg(
                    Arg::new("OUTPUT")
                        .short('o')
                        .long("output")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Output .msq3 file"),
                )
                .arg(
                    Arg::new("quality")
                        .short('q')
                        .long("quality")
                        .value_parser(value_parser!(u8).range(0..=100))
                        .default_value("100")
                        .help("Quality byte stored in the header (0-100)"),
                ),
        )
}

fn main() {
    let matches = create_app().get_matches();
    logger::init(matches.get_flag("verbose"));

    let result = match matches.subcommand() {
        Some(("bake", options)) => bake(options),
        Some(("info", options)) => show_info(options),
        Some(("evaluate", options)) => evaluate(options),
        Some(("pack", options)) => pack(options),
        _ => Ok(()),
    };

    if let Err(e) = result {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn bake(options: &ArgMatches) -> Result<()> {
    let input: &PathBuf = options.get_one("INPUT").context("INPUT not available")?;
    let output: &PathBuf = options.get_one("OUTPUT").context("OUTPUT not available")?;

    let config = BakeConfig::builder()
        .algorithm(*options.get_one::<Algorithm>("algorithm").context("algorithm has no default")?)
        .compression(*options.get_one::<TiffCompression>("compression").context("compression has no default")?)
        .predictor(options.get_one::<u16>("predictor").copied())
        .parallel(!options.get_flag("sequential"))
        .build();
    let pipeline = Msq3BakePipeline::new(config);

    info!("Algorithm: {}", pipeline.config().algorithm);
    info!("Compression: {:?}", pipeline.config().compression);

    let report = pipeline
        .bake_file(input, output)
        .with_context(|| format!("Failed to bake {}", input.display()))?;

    for path in &report.outputs {
        println!("{}", path.display());
    }
    if options.get_flag("timings") {
        print!("{}", report.timings.summary());
    }
    Ok(())
}

fn show_info(options: &ArgMatches) -> Result<()> {
    let input: &PathBuf = options.get_one("INPUT").context("INPUT not available")?;
    let data = std::fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;

    if !msq3::is_container(&data) {
        bail!("{} is not an MSQ3 file", input.display());
    }

    let header = msq3::read_header(&data)?;
    println!("Version:    {}", header.version);
    println!("Dimensions: {}x{}", header.width, header.height);
    println!("Quality:    {}", header.quality);

    match msq3::decode(&data) {
        Ok(set) => {
            let expected = set.pixel_count();
            for channel in MosaicChannel::ALL {
                let len = set.channel(channel).len();
                let note = if len == expected { "raw" } else { "size differs from width x height" };
                println!("Channel {}:  {} bytes ({})", channel, len, note);
            }
        }
        Err(e) => warn!("Channel data unreadable: {}", e),
    }
    Ok(())
}

fn evaluate(options: &ArgMatches) -> Result<()> {
    let input: &PathBuf = options.get_one("INPUT").context("INPUT not available")?;
    let data = std::fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;
    let source = read_rgb8_tiff(&data).with_context(|| format!("Failed to load {}", input.display()))?;
    let (width, height) = (source.width, source.height);

    let cfa = apply_bayer_mosaic(&source.to_rgb(), width, height)?;
    if let Some(path) = options.get_one::<PathBuf>("cfa-view") {
        let view = colorized_view(&cfa, width, height)?;
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        StandardTiffWriter.write_rgb(&view, &mut file, &BakeConfig::default())?;
        info!(path = %path.display(), "Saved colourised mosaic");
    }

    let algorithms = match options.get_one::<Algorithm>("algorithm") {
        Some(algorithm) => vec![*algorithm],
        None => vec![Algorithm::Bilinear, Algorithm::Mhc],
    };
    let view = MosaicView::plane(&cfa, width, height, MosaicChannel::R)?;
    for algorithm in algorithms {
        let reconstructed = demosaic(&view, algorithm);
        match metrics::evaluate(&source, &reconstructed) {
            Some(m) => println!("{:<9} PSNR {:>6.2} dB  SSIM {:.4}", algorithm, m.psnr, m.ssim),
            None => warn!("{}x{} is too small to score", width, height),
        }
    }
    Ok(())
}

fn pack(options: &ArgMatches) -> Result<()> {
    let read_plane = |name: &str| -> Result<(u32, u32, Vec<u8>)> {
        let path: &PathBuf = options.get_one(name).context("mosaic path not available")?;
        let data = std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
        read_gray8_tiff(&data).with_context(|| format!("Failed to load mosaic {}", path.display()))
    };

    let (width, height, channel_r) = read_plane("R")?;
    let (gw, gh, channel_g) = read_plane("G")?;
    let (bw, bh, channel_b) = read_plane("B")?;
    if (gw, gh) != (width, height) || (bw, bh) != (width, height) {
        bail!(
            "mosaic dimensions differ: R {}x{}, G {}x{}, B {}x{}",
            width, height, gw, gh, bw, bh
        );
    }

    let set = DecodedMosaicSet {
        width,
        height,
        quality: *options.get_one::<u8>("quality").context("quality has no default")?,
        channel_r,
        channel_g,
        channel_b,
    };
    let bytes = msq3::encode(&set)?;

    let output: &PathBuf = options.get_one("OUTPUT").context("OUTPUT not available")?;
    std::fs::write(output, &bytes).with_context(|| format!("Failed to write {}", output.display()))?;
    info!(path = %output.display(), bytes = bytes.len(), "Packed MSQ3 file");
    Ok(())
}
