use std::{
    fs::{self, OpenOptions},
    path::{Path, PathBuf},
};

use clap::{Parser, Subcommand};
use scene::{FrameRing, SceneError};
use shading_contract::{glsl, layout::all_layouts, slots, BufferSlot, ContractError, Vertex};
use tracing::{debug, info};
use tracing_subscriber::{filter, layer::SubscriberExt, util::SubscriberInitExt, Layer};

mod demo_frame;

// --- Configuration ---
const APP_NAME: &str = "contract-inspect";
const SPHERE_SECTORS: u32 = 32;
const SPHERE_STACKS: u32 = 16;

// --- Error Handling ---
#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error("Scene Error: {0}")]
    Scene(#[from] SceneError),
    #[error("Contract Error: {0}")]
    Contract(#[from] ContractError),
    #[error("I/O Error writing {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Whether or not to create debug log (default false)
    #[arg(short, long, default_value_t = false)]
    debug_log: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print binding slots, record sizes and field offsets
    Layout,
    /// Print the GLSL declarations matching the host records
    Glsl {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Record the stock viewer frame and write each buffer's raw bytes
    Dump {
        /// Directory to write the .bin files into
        #[arg(short, long, default_value = "frame-dump")]
        output: PathBuf,
        /// Texture repeat count written to the fragment uniforms
        #[arg(long, default_value_t = 1)]
        tiling: u32,
        /// Viewport aspect ratio used for the projection matrix
        #[arg(long, default_value_t = 16.0 / 9.0)]
        aspect: f32,
    },
}

fn print_layout() {
    println!("Buffer slots:");
    for slot in BufferSlot::ALL {
        let kind = slot
            .descriptor()
            .map_or("vertex input".to_string(), |(ty, stages)| {
                format!("{ty:?} ({stages:?}), set {}", slots::BUFFER_DESCRIPTOR_SET)
            });
        println!("  {:<18} {:>3}  {}", slot.name(), slot.index(), kind);
    }

    println!("Vertex attributes (stride {}):", std::mem::size_of::<Vertex>());
    for attribute in Vertex::get_attribute_descriptions() {
        println!(
            "  location {}  offset {:>3}  {:?}",
            attribute.location, attribute.offset, attribute.format
        );
    }

    for layout in all_layouts() {
        println!(
            "{} ({} bytes, align {}):",
            layout.name, layout.size, layout.align
        );
        for field in &layout.fields {
            println!("  {:>4}  {:<18} {:?}", field.offset, field.name, field.kind);
        }
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<(), AppError> {
    fs::write(path, bytes).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

fn dump_frame(output: &Path, aspect: f32, tiling: u32) -> Result<(), AppError> {
    fs::create_dir_all(output).map_err(|source| AppError::Io {
        path: output.to_path_buf(),
        source,
    })?;

    let mut ring = FrameRing::new();
    let slot = demo_frame::record_demo_frame(&mut ring, aspect, tiling)?;
    ring.submit(slot)?;
    let frame = ring.frame(slot)?;
    debug!(
        "Frame slot {} holds {} draws and {} lights",
        slot,
        frame.draw_count(),
        frame.fragment_uniforms().light_count
    );

    let (vertices, indices) = demo_frame::create_sphere(1.0, SPHERE_SECTORS, SPHERE_STACKS);

    write_file(
        &output.join("vertices.bin"),
        bytemuck::cast_slice(vertices.as_slice()),
    )?;
    write_file(
        &output.join("indices.bin"),
        bytemuck::cast_slice(indices.as_slice()),
    )?;
    write_file(&output.join("uniforms.bin"), frame.uniforms_bytes())?;
    write_file(&output.join("lights.bin"), frame.lights_bytes())?;
    write_file(
        &output.join("fragment_uniforms.bin"),
        frame.fragment_uniforms_bytes(),
    )?;
    write_file(&output.join("materials.bin"), frame.materials_bytes())?;

    ring.retire(slot)?;
    Ok(())
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(true)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .with_filter(filter::LevelFilter::INFO);

    let registry = tracing_subscriber::registry().with(fmt_layer);

    if args.debug_log {
        let log_file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(format!("{APP_NAME}-debug.log"))?;

        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_ansi(false)
            .without_time()
            .with_writer(log_file)
            .with_filter(filter::LevelFilter::DEBUG);

        registry.with(json_layer).init();
    } else {
        registry.init();
    }

    match args.command {
        Command::Layout => print_layout(),
        Command::Glsl { output: None } => print!("{}", glsl::contract_header()),
        Command::Glsl { output: Some(path) } => {
            write_file(&path, glsl::contract_header().as_bytes())?;
        }
        Command::Dump {
            output,
            tiling,
            aspect,
        } => dump_frame(&output, aspect, tiling)?,
    }

    Ok(())
}
