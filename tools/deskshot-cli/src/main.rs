//! Deskshot CLI: capture the desktop and each display to image files.
//!
//! Usage:
//!   deskshot                      Desktop composite plus one file per display
//!   deskshot --display 2          Only display 2
//!   deskshot -f jpg -q 85 -o out  JPEG at quality 85 into ./out
//!   deskshot --list-displays      Show detected displays

use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{ArgAction, Parser};
use deskshot_common::config::AppConfig;

mod commands;

#[derive(Parser, Debug)]
#[command(
    name = "deskshot",
    about = "Capture the desktop and every display as image files",
    version,
    author,
    disable_version_flag = true
)]
struct Cli {
    /// Capture only this display (1-based)
    #[arg(short, long, value_name = "N")]
    display: Option<u32>,

    /// Output directory, created if missing [default: current directory]
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Output image format
    #[arg(
        short,
        long,
        default_value = "png",
        value_parser = ["png", "jpg", "jpeg", "bmp"]
    )]
    format: String,

    /// JPEG quality, ignored for other formats [default: 100]
    #[arg(short, long, value_name = "1-100", value_parser = clap::value_parser!(u8).range(1..=100))]
    quality: Option<u8>,

    /// List detected displays and exit
    #[arg(long)]
    list_displays: bool,

    /// Enable verbose logging
    #[arg(long)]
    verbose: bool,

    /// Print version
    #[arg(short = 'v', long, action = ArgAction::Version)]
    #[allow(dead_code)]
    version: Option<bool>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(usage_exit_code(&e));
        }
    };

    let mut config = AppConfig::load();
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    deskshot_common::logging::init_logging(&config.logging);
    tracing::debug!(?cli, "Parsed arguments");

    let result = if cli.list_displays {
        commands::list::run(&config).await
    } else {
        commands::capture::run(
            commands::capture::CaptureOptions {
                display: cli.display,
                output: cli.output,
                format: cli.format,
                quality: cli.quality,
            },
            &config,
        )
        .await
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(1)
        }
    }
}

/// Help and version are successful exits; every other usage error is 1.
fn usage_exit_code(err: &clap::Error) -> u8 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}
