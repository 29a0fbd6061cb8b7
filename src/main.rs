//! Render text or an image for a thermal printer.
//!
//! cargo run -- -t "Hello\nWorld" --align center -o label.png
//!
use std::{io::Write, path::PathBuf, process::ExitCode};

use clap::{Parser, ValueEnum};
use log::{error, info, LevelFilter};
use thermal_label::{
    binarize, read_image, to_matrix, Align, Binarization, Error, Renderer, TextStyle,
    DEFAULT_FONT, DEFAULT_FONT_SIZE, PRINT_WIDTH,
};

/// Prints an image or text on your thermal printer.
#[derive(Parser, Debug)]
#[command(name = "thermal-label", version, about, long_about = None)]
struct Args {
    /// Path to the image file to print
    filename: Option<PathBuf>,

    /// Text to convert to an image and print (use \n for new lines)
    #[arg(short = 't', long)]
    text: Option<String>,

    #[arg(short = 'l', long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    /// Binarization algorithm; with 'none' the image must already be the print width
    #[arg(short = 'b', long = "img-binarization-algo", value_enum, default_value_t = Algo::FloydSteinberg)]
    algo: Algo,

    /// Path to a TTF font file to use for the text
    #[arg(short = 'f', long, default_value = DEFAULT_FONT)]
    font: PathBuf,

    #[arg(long, default_value_t = DEFAULT_FONT_SIZE)]
    font_size: u32,

    #[arg(long)]
    bold: bool,

    #[arg(long)]
    italic: bool,

    #[arg(long)]
    strikethrough: bool,

    #[arg(long, value_enum, default_value_t = TextAlign::Left)]
    align: TextAlign,

    /// Print head width in pixels
    #[arg(short = 'w', long, default_value_t = PRINT_WIDTH)]
    width: u32,

    /// Where to write the binarized raster
    #[arg(short = 'o', long, default_value = "output_image.png")]
    output: PathBuf,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Error => LevelFilter::Error,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Algo {
    MeanThreshold,
    FloydSteinberg,
    Halftone,
    None,
}

impl From<Algo> for Binarization {
    fn from(algo: Algo) -> Self {
        match algo {
            Algo::MeanThreshold => Binarization::MeanThreshold,
            Algo::FloydSteinberg => Binarization::FloydSteinberg,
            Algo::Halftone => Binarization::Halftone,
            Algo::None => Binarization::None,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TextAlign {
    Left,
    Center,
    Right,
}

impl From<TextAlign> for Align {
    fn from(align: TextAlign) -> Self {
        match align {
            TextAlign::Left => Align::Left,
            TextAlign::Center => Align::Center,
            TextAlign::Right => Align::Right,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level.into())
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            error!("🛑 {}", err);
            ExitCode::FAILURE
        }
    }
}

impl Args {
    /// Text to render, if any. An empty `--text` counts as absent.
    fn text(&self) -> Option<&str> {
        self.text.as_deref().filter(|text| !text.is_empty())
    }
}

/// Returns `Ok(false)` when there is nothing to print.
fn run(args: &Args) -> Result<bool, Error> {
    // Text takes precedence over a filename.
    let raster = if let Some(text) = args.text() {
        let style = TextStyle::new(&args.font, args.font_size)
            .bold(args.bold)
            .italic(args.italic)
            .strikethrough(args.strikethrough)
            .align(args.align.into());
        Renderer::new().render(&text.replace("\\n", "\n"), &style, args.width)?
    } else if let Some(filename) = &args.filename {
        if !filename.exists() {
            info!("🛑 File not found. Exiting.");
            return Ok(false);
        }
        match args.algo {
            // printed pixel for pixel, so no resampling either
            Algo::None => image::open(filename)?.to_luma8(),
            _ => read_image(filename, args.width)?,
        }
    } else {
        info!("🛑 No input provided. Exiting.");
        return Ok(false);
    };

    let bw = binarize(&raster, args.algo.into(), args.width)?;
    info!("✅ Read image: ({}, {}) (h, w) pixels", bw.height(), bw.width());

    let matrix = to_matrix(&bw);
    let bytes: usize = matrix.iter().map(|row| row.len()).sum();
    info!("✅ Packed {} rows, {} bytes", matrix.len(), bytes);

    bw.save(&args.output)?;
    info!("✅ Wrote {:?}", args.output);
    Ok(true)
}
