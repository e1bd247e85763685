//! worldtweak CLI - seeded island map generator.
//!
//! Generates a layered island from Perlin noise and writes it out as a
//! color-mapped PNG, with optional raw noise dumps.

use clap::{Parser, Subcommand, ValueEnum};
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::time::Instant;

use worldtweak::export::{
    export_layer_map_png, export_noise_png, export_noise_raw, LayerMapOptions, PngExportOptions,
    RawFormat,
};
use worldtweak::terrain::{MaskConfig, TerrainConfig, TerrainField, TerrainGenerator};

/// Seeded island map generator.
#[derive(Parser)]
#[command(name = "worldtweak")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Parameters shared by every subcommand. Flags override the config file.
#[derive(clap::Args)]
struct TerrainArgs {
    /// JSON config to start from (defaults otherwise).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// World width in cells.
    #[arg(long)]
    width: Option<u32>,

    /// World height in cells.
    #[arg(long)]
    height: Option<u32>,

    /// Seed for reproducible generation (random if omitted and not in the config).
    #[arg(short, long)]
    seed: Option<u32>,

    /// Base noise frequency.
    #[arg(short, long)]
    frequency: Option<f32>,

    /// Number of noise octaves.
    #[arg(long)]
    octaves: Option<u32>,

    /// Turn off the radial falloff (cells past the disc stay deep ocean).
    #[arg(long)]
    no_mask: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an island and export it.
    Generate {
        #[command(flatten)]
        terrain: TerrainArgs,

        /// Output directory for generated files.
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,

        /// Base name for output files.
        #[arg(short, long, default_value = "island")]
        name: String,

        /// Also export the raw noise as a 16-bit grayscale PNG.
        #[arg(long)]
        noise_map: bool,

        /// Also export the raw noise as a RAW file.
        #[arg(long)]
        raw: Option<RawExport>,

        /// Save the effective configuration next to the images.
        #[arg(long)]
        save_config: bool,
    },

    /// Print the layer table and per-layer coverage without writing files.
    Info {
        #[command(flatten)]
        terrain: TerrainArgs,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum RawExport {
    /// 16-bit RAW little-endian.
    R16,
    /// 16-bit RAW big-endian.
    R16Be,
    /// 32-bit float RAW (exact values).
    Float,
}

impl From<RawExport> for RawFormat {
    fn from(value: RawExport) -> Self {
        match value {
            RawExport::R16 => RawFormat::R16LittleEndian,
            RawExport::R16Be => RawFormat::R16BigEndian,
            RawExport::Float => RawFormat::R32Float,
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            terrain,
            output,
            name,
            noise_map,
            raw,
            save_config,
        } => {
            let config = resolve_config(&terrain);
            run_generate(&config, &output, &name, noise_map, raw, save_config);
        }
        Commands::Info { terrain } => {
            let config = resolve_config(&terrain);
            run_info(&config);
        }
    }
}

fn resolve_config(args: &TerrainArgs) -> TerrainConfig {
    let mut config = match &args.config {
        Some(path) => TerrainConfig::from_json_file(path).unwrap_or_else(|e| {
            eprintln!("Error loading config {}: {}", path.display(), e);
            std::process::exit(1);
        }),
        None => TerrainConfig {
            seed: time_seed(),
            ..Default::default()
        },
    };

    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(frequency) = args.frequency {
        config.frequency = frequency;
    }
    if let Some(octaves) = args.octaves {
        config.octaves = octaves;
    }
    if args.no_mask {
        config.mask = MaskConfig {
            enabled: false,
            ..config.mask
        };
    }

    debug!("Effective config: {:?}", config);
    config
}

/// Seed from the wall clock, for runs without an explicit seed.
fn time_seed() -> u32 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as u32)
        .unwrap_or(0)
}

fn generate(config: &TerrainConfig) -> TerrainField {
    let params = config.to_params();
    TerrainGenerator::new().generate(&params).unwrap_or_else(|e| {
        eprintln!("Error during generation: {}", e);
        std::process::exit(1);
    })
}

fn run_generate(
    config: &TerrainConfig,
    output: &Path,
    name: &str,
    noise_map: bool,
    raw: Option<RawExport>,
    save_config: bool,
) {
    println!("worldtweak - Island Generator");
    println!("=============================");
    println!("Size: {}x{}", config.width, config.height);
    println!("Seed: {}", config.seed);
    println!("Frequency: {}  Octaves: {}", config.frequency, config.octaves);
    println!("Mask: {}", if config.mask.enabled { "on" } else { "off" });
    println!("Output: {}", output.display());

    let start = Instant::now();
    let field = generate(config);
    println!("Generation completed in {:.2?}", start.elapsed());

    std::fs::create_dir_all(output).unwrap_or_else(|e| {
        eprintln!("Error creating output directory: {}", e);
        std::process::exit(1);
    });

    let layer_path = output.join(format!("{}_layers.png", name));
    export_layer_map_png(&field, &config.layers, &layer_path, &LayerMapOptions::default())
        .unwrap_or_else(|e| {
            eprintln!("Error exporting layer map: {}", e);
            std::process::exit(1);
        });
    info!("Wrote {}", layer_path.display());

    if noise_map {
        let path = output.join(format!("{}_noise.png", name));
        export_noise_png(&field, &path, &PngExportOptions::auto_range(&field)).unwrap_or_else(|e| {
            eprintln!("Error exporting noise map: {}", e);
            std::process::exit(1);
        });
        info!("Wrote {}", path.display());
    }

    if let Some(raw) = raw {
        let options = PngExportOptions::auto_range(&field);
        let path = output.join(format!("{}_noise.raw", name));
        export_noise_raw(&field, &path, raw.into(), options.min_value, options.max_value)
            .unwrap_or_else(|e| {
                eprintln!("Error exporting RAW: {}", e);
                std::process::exit(1);
            });
        info!("Wrote {}", path.display());
    }

    if save_config {
        let path = output.join(format!("{}.json", name));
        config.to_json_file(&path).unwrap_or_else(|e| {
            eprintln!("Error saving config: {}", e);
            std::process::exit(1);
        });
        info!("Wrote {}", path.display());
    }

    print_layer_table(config, &field);
}

fn run_info(config: &TerrainConfig) {
    println!("Island Configuration");
    println!("====================");
    let cells = config.width as u64 * config.height as u64;
    println!("Size: {}x{} ({} cells)", config.width, config.height, cells);
    println!("Seed: {}", config.seed);
    println!("Frequency: {}  Octaves: {}", config.frequency, config.octaves);

    let field = generate(config);
    print_layer_table(config, &field);

    match field.value_range() {
        Some((min, max)) => println!("Noise range: [{:.4}, {:.4}]", min, max),
        None => println!("Noise range: (every cell masked)"),
    }
}

fn print_layer_table(config: &TerrainConfig, field: &TerrainField) {
    let histogram = field.band_histogram();
    let total = field.cell_count().max(1) as f64;

    println!("\n{:<16} {:>8} {:>10} {:>8}", "Layer", "From", "Cells", "Share");
    for (layer, count) in config.layers.layers().iter().zip(histogram.iter()) {
        println!(
            "{:<16} {:>8.2} {:>10} {:>7.1}%",
            layer.name,
            layer.lower_bound,
            count,
            *count as f64 / total * 100.0
        );
    }
}
