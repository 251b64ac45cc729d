//! `zenconvert INPUT OUTPUT`: convert an image, picking codecs by extension.
//!
//! Exit codes: 0 success, 1 bad arguments or a failed decode/encode,
//! 2 unknown input format, 3 unknown output format.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use log::LevelFilter;
use simple_logger::SimpleLogger;
use zenconvert::{ConvertError, ConvertRequest, DEFAULT_JPEG_QUALITY, Dispatcher, Side, Unstoppable};

#[derive(Parser, Debug)]
#[command(name = "zenconvert", version, about = "Convert images between PPM, JPEG and BMP")]
struct Cli {
    /// Image to read (.ppm, .jpg, .jpeg)
    input: PathBuf,

    /// Image to write (.ppm, .jpg, .jpeg)
    output: PathBuf,

    /// Also accept .bmp for input and output
    #[arg(long)]
    enable_bmp: bool,

    /// JPEG output quality
    #[arg(
        long,
        default_value_t = DEFAULT_JPEG_QUALITY,
        value_parser = clap::value_parser!(u8).range(1..=100)
    )]
    quality: u8,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(1),
            };
        }
    };

    if let Err(e) = SimpleLogger::new()
        .with_level(LevelFilter::Warn)
        .env()
        .init()
    {
        eprintln!("failed to initialize logger: {e}");
    }

    let dispatcher = if cli.enable_bmp {
        Dispatcher::with_bmp()
    } else {
        Dispatcher::default()
    };

    let result = ConvertRequest::new(&cli.input, &cli.output)
        .with_dispatcher(dispatcher)
        .with_jpeg_quality(cli.quality)
        .run(Unstoppable);

    match result {
        Ok(()) => {
            println!("Successfully converted");
            ExitCode::SUCCESS
        }
        Err(e) => {
            match &e {
                ConvertError::FormatUnknown {
                    side: Side::Input, ..
                } => println!("Unknown format of the input file"),
                ConvertError::FormatUnknown {
                    side: Side::Output,
                    ..
                } => println!("Unknown format of the output file"),
                other => eprintln!("{other}"),
            }
            ExitCode::from(e.exit_code())
        }
    }
}
