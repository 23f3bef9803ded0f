use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use markscan_core::detection::{extract_edges, find_quadrilaterals, normalize_corners};
use markscan_core::io::load_resized;
use markscan_core::pipeline::GradingConfig;

use super::grade::load_config;

#[derive(Args)]
pub struct DetectArgs {
    /// Input image
    pub image: PathBuf,

    /// Grading config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: &DetectArgs) -> Result<()> {
    let config = match args.config {
        Some(ref path) => load_config(path)?,
        None => GradingConfig::default(),
    };

    let frame = load_resized(&args.image, config.frame_size)
        .with_context(|| format!("Failed to load {}", args.image.display()))?;
    let edges = extract_edges(&frame, &config.edges);
    let detection = find_quadrilaterals(&edges.edges, &config.detection);

    println!("File:            {}", args.image.display());
    println!("Resized to:      {}", config.frame_size);
    println!("Contours:        {}", detection.contours.len());
    println!("Quadrilaterals:  {}", detection.quads.len());

    for (i, quad) in detection.quads.iter().enumerate() {
        let c = normalize_corners(&quad.points);
        let role = match i {
            0 => "  (sheet)",
            1 => "  (grade box)",
            _ => "",
        };
        println!();
        println!("  #{}  area {:.0} px{}", i + 1, quad.area, role);
        println!(
            "      TL ({:.0}, {:.0})  TR ({:.0}, {:.0})",
            c.top_left.x, c.top_left.y, c.top_right.x, c.top_right.y
        );
        println!(
            "      BL ({:.0}, {:.0})  BR ({:.0}, {:.0})",
            c.bottom_left.x, c.bottom_left.y, c.bottom_right.x, c.bottom_right.y
        );
    }

    Ok(())
}
