// hero2png - Render a hero effect offline to a PNG
//
// Mounts the effect on the software rasterizer, replays the pointer events
// once per tick and writes the last frame.
//
// Usage: cargo run --bin hero2png -- wave --width 1600 --pointer 700,420

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use hero_engine::surface::Raster;
use hero_engine::{EffectHost, HeroConfig, HeroKind, Hsl, Mount, Point};
use log::info;

#[derive(Parser)]
#[command(name = "hero2png")]
#[command(about = "Render a hero banner effect to a PNG", long_about = None)]
#[command(version)]
struct Args {
    /// metaball, voronoi or wave
    effect: HeroKind,

    #[arg(long, default_value_t = 1280)]
    width: u32,

    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Frames to run before capturing
    #[arg(long, default_value_t = 120)]
    ticks: u32,

    /// Pointer position held for every tick, as X,Y
    #[arg(long, value_parser = parse_point)]
    pointer: Option<Point>,

    /// Click position, as X,Y (repeatable)
    #[arg(long, value_parser = parse_point)]
    click: Vec<Point>,

    #[arg(long, default_value_t = 12.0, allow_negative_numbers = true)]
    hue: f64,

    #[arg(long, default_value_t = 70.0)]
    saturation: f64,

    #[arg(long, default_value_t = 45.0)]
    lightness: f64,

    #[arg(long)]
    seed: Option<u32>,

    /// JSON file overriding the effect configuration
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, default_value = "hero.png")]
    out: PathBuf,
}

fn parse_point(s: &str) -> std::result::Result<Point, String> {
    let (x, y) = s.split_once(',').ok_or_else(|| format!("expected X,Y, got {s:?}"))?;
    let x: f64 = x.trim().parse().map_err(|e| format!("bad x in {s:?}: {e}"))?;
    let y: f64 = y.trim().parse().map_err(|e| format!("bad y in {s:?}: {e}"))?;
    Ok(Point::new(x, y))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            HeroConfig::from_json(&json).with_context(|| format!("parsing {}", path.display()))?
        }
        None => HeroConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let theme = Hsl::new(args.hue, args.saturation, args.lightness);
    let mut host = EffectHost::new(Raster::new(args.width, args.height));
    host.attach(Mount::new(args.effect, theme).with_config(config))?;

    for &at in &args.click {
        host.pointer_down(at);
    }
    for _ in 0..args.ticks {
        if let Some(at) = args.pointer {
            host.pointer_move(at);
        }
        host.frame();
    }

    let img = host.into_surface().into_image();
    img.save(&args.out).with_context(|| format!("writing {}", args.out.display()))?;
    info!("Wrote {}x{} {} after {} ticks to {}", args.width, args.height, args.effect, args.ticks, args.out.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_points() {
        assert_eq!(parse_point("10,-4.5").unwrap(), Point::new(10.0, -4.5));
        assert_eq!(parse_point(" 3 , 4 ").unwrap(), Point::new(3.0, 4.0));
        assert!(parse_point("10").is_err());
        assert!(parse_point("a,b").is_err());
    }

    #[test]
    fn parses_cli() {
        let args = Args::try_parse_from(["hero2png", "voronoi", "--click", "1,2", "--click", "3,4", "--hue", "-20"]).unwrap();
        assert_eq!(args.effect, HeroKind::Voronoi);
        assert_eq!(args.click.len(), 2);
        assert_eq!(args.hue, -20.0);
        assert!(Args::try_parse_from(["hero2png", "sparkles"]).is_err());
    }
}
