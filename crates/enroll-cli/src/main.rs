//! `enroll` — student-registration kiosk CLI.
//!
//! Thin presentation glue over the capture, processing and directory
//! crates. The directory lives in process memory only, so the single-shot
//! record commands operate on the seeded demo data; `demo` runs the whole
//! registration flow end to end.

mod commands;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

use enroll_capture::SyntheticCamera;
use enroll_core::AppConfig;
use enroll_directory::InMemoryDirectory;

#[derive(Parser, Debug)]
#[command(name = "enroll")]
#[command(about = "Student registration kiosk: capture, crop, register, list")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Capture a photo from the camera and write it as a data URI
    Capture {
        /// Specific camera device id
        #[arg(long)]
        device: Option<String>,
        /// Requested capture resolution, e.g. 1280x720
        #[arg(long, value_name = "WxH")]
        resolution: Option<String>,
        /// Camera facing mode: user or environment
        #[arg(long)]
        facing: Option<String>,
        /// Zoom level, clamped into the device range; ignored on devices
        /// without zoom
        #[arg(long)]
        zoom: Option<f32>,
        /// Center-crop the capture to the passport aspect
        #[arg(long)]
        passport: bool,
        /// Output file for the data URI
        #[arg(long, default_value = "photo.uri")]
        output: PathBuf,
    },
    /// Register a student with a previously captured photo
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        code: String,
        #[arg(long, default_value = "")]
        class: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long, default_value = "")]
        address: String,
        /// File containing the photo data URI
        #[arg(long)]
        photo: PathBuf,
    },
    /// List registered students
    List {
        /// Output format: json or table
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Show one student
    Show { id: i64 },
    /// Update fields of a student
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        code: Option<String>,
        #[arg(long)]
        class: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        address: Option<String>,
        /// Remove the stored photo
        #[arg(long)]
        clear_photo: bool,
    },
    /// Remove a student
    Remove { id: i64 },
    /// Scripted end-to-end flow: capture, crop, register, list
    Demo,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env();

    // The directory and camera are constructed here and passed down; the
    // store is process memory only, seeded with the demo records.
    let directory = InMemoryDirectory::with_seed_data();
    let camera = Arc::new(SyntheticCamera::new());

    match cli.command {
        Command::Capture {
            device,
            resolution,
            facing,
            zoom,
            passport,
            output,
        } => {
            commands::capture(
                &config,
                camera,
                commands::CaptureArgs {
                    device,
                    resolution,
                    facing,
                    zoom,
                    passport,
                    output,
                },
            )
            .await
        }
        Command::Register {
            name,
            code,
            class,
            phone,
            address,
            photo,
        } => {
            commands::register(&config, &directory, name, code, class, phone, address, photo)
                .await
        }
        Command::List { format } => commands::list(&directory, &format).await,
        Command::Show { id } => commands::show(&directory, id).await,
        Command::Update {
            id,
            name,
            code,
            class,
            phone,
            address,
            clear_photo,
        } => {
            commands::update(&directory, id, name, code, class, phone, address, clear_photo)
                .await
        }
        Command::Remove { id } => commands::remove(&directory, id).await,
        Command::Demo => commands::demo(&config, camera, &directory).await,
    }
}
