use std::{error::Error, fs, path::PathBuf};

use clap::{Parser, ValueEnum};
use image::Rgb;
use tracing::info;
use tracing_subscriber::EnvFilter;

use qrgen::{reader, ECLevel, EciMode, QRBuilder, Version};

/// Encode text into a QR code, or read one back from an image
#[derive(Parser)]
#[command(name = "qrgen")]
#[command(version)]
#[command(about = "Encode text into a QR code, or read one back from an image", long_about = None)]
struct Args {
    /// Text to encode
    #[arg(conflicts_with_all = ["file", "decode"], required_unless_present_any = ["file", "decode"])]
    text: Option<String>,

    /// Read the text to encode from a file
    #[arg(short, long, conflicts_with = "decode")]
    file: Option<PathBuf>,

    /// Error correction level
    #[arg(short, long, value_enum, ignore_case = true, default_value_t = Level::M)]
    ec_level: Level,

    /// Symbol version, smallest fitting one when absent
    #[arg(short = 'v', long = "qr-version", value_parser = clap::value_parser!(u8).range(1..=40))]
    qr_version: Option<u8>,

    /// Always encode in byte mode
    #[arg(long)]
    force_byte: bool,

    /// Prepend a UTF-8 byte order mark to utf-8 byte data
    #[arg(long)]
    bom: bool,

    /// Character set announced through an ECI header
    #[arg(long, value_enum, ignore_case = true, default_value_t = Eci::Default)]
    eci: Eci,

    /// Save the symbol as an image instead of printing it
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pixels per module in the saved image
    #[arg(short, long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    scale: u32,

    /// Dark module color as hex, e.g. 000000
    #[arg(long, default_value = "000000", value_parser = parse_color)]
    dark: Rgb<u8>,

    /// Light module color as hex, e.g. ffffff
    #[arg(long, default_value = "ffffff", value_parser = parse_color)]
    light: Rgb<u8>,

    /// Decode the QR code in an image and print its content
    #[arg(long)]
    decode: Option<PathBuf>,

    /// Log pipeline stages
    #[arg(long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Level {
    L,
    M,
    Q,
    H,
}

impl From<Level> for ECLevel {
    fn from(level: Level) -> Self {
        match level {
            Level::L => ECLevel::L,
            Level::M => ECLevel::M,
            Level::Q => ECLevel::Q,
            Level::H => ECLevel::H,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Eci {
    Default,
    Utf8,
    Iso88591,
    Iso88592,
}

impl From<Eci> for EciMode {
    fn from(eci: Eci) -> Self {
        match eci {
            Eci::Default => EciMode::Default,
            Eci::Utf8 => EciMode::Utf8,
            Eci::Iso88591 => EciMode::Iso88591,
            Eci::Iso88592 => EciMode::Iso88592,
        }
    }
}

fn parse_color(s: &str) -> Result<Rgb<u8>, String> {
    let hex = s.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(format!("expected 6 hex digits, got '{s}'"));
    }
    let mut rgb = [0u8; 3];
    for (i, ch) in rgb.iter_mut().enumerate() {
        *ch = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).map_err(|e| format!("'{s}': {e}"))?;
    }
    Ok(Rgb(rgb))
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    if let Some(path) = &args.decode {
        let img = image::open(path)?;
        return match reader::decode(&img) {
            Some(content) => {
                println!("{content}");
                Ok(())
            }
            None => Err(format!("no QR code found in {}", path.display()).into()),
        };
    }

    let text = match (&args.text, &args.file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => fs::read_to_string(path)?,
        (None, None) => return Err("no text to encode".into()),
    };

    let mut builder = QRBuilder::new(&text);
    builder
        .ec_level(args.ec_level.into())
        .force_byte_mode(args.force_byte)
        .utf8_bom(args.bom)
        .eci(args.eci.into());
    if let Some(v) = args.qr_version {
        builder.version(Version::new(v));
    }
    let qr = builder.build()?;

    match &args.output {
        Some(path) => {
            qr.to_image(args.scale, args.dark, args.light).save(path)?;
            info!("Saved {} to {}", qr.metadata(), path.display());
        }
        None => print!("{}", qr.to_str(1)),
    }

    Ok(())
}
