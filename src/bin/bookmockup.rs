use bookmockup::color::Rgba;
use bookmockup::config::ConfigFile;
use bookmockup::geometry::Point;
use bookmockup::{image_loader, image_output, BookScene, CoverLayout, Renderer};
use clap::Parser;
use log::{debug, info};
use std::error::Error;
use std::path::PathBuf;

/// Render a 3D book mockup from a flat cover image.
#[derive(Parser, Debug)]
#[command(name = "bookmockup", version, about)]
struct Args {
  /// Cover image (a back | spine | front wrap unless --front-only)
  #[arg(long, required_unless_present = "dump_geometry")]
  cover: Option<PathBuf>,

  /// Output image; PNG unless the extension says JPEG
  #[arg(long, short, default_value = "mockup.png")]
  output: PathBuf,

  /// JSON config; flags below override its values
  #[arg(long)]
  config: Option<PathBuf>,

  /// Canvas size as WxH (e.g., 1200x1200)
  #[arg(long, value_parser = parse_size)]
  size: Option<(u32, u32)>,

  /// Total canvas margin in pixels
  #[arg(long)]
  border: Option<u32>,

  /// Fixed scale in pixels per inch instead of fitting the canvas
  #[arg(long)]
  dpi: Option<f64>,

  /// Anchor the spine's bottom corner at X,Y instead of centring
  #[arg(long, value_parser = parse_origin)]
  origin: Option<Point>,

  /// Yaw of the book in degrees
  #[arg(long, allow_hyphen_values = true)]
  yaw: Option<f64>,

  /// Camera tilt in degrees
  #[arg(long, allow_hyphen_values = true)]
  tilt: Option<f64>,

  /// Angle between the covers in degrees
  #[arg(long)]
  open: Option<f64>,

  /// Book size in inches as WxHxD (e.g., 6x9x1)
  #[arg(long, value_parser = parse_book)]
  book: Option<(f64, f64, f64)>,

  /// Background colour (RRGGBB); transparent by default
  #[arg(long)]
  background: Option<Rgba>,

  /// The cover image is the front cover only
  #[arg(long)]
  front_only: bool,

  /// Skip the ground shadow
  #[arg(long)]
  no_shadow: bool,

  /// Print the computed scene as JSON and exit
  #[arg(long)]
  dump_geometry: bool,

  /// Debug logging (RUST_LOG still wins)
  #[arg(long, short)]
  verbose: bool,
}

fn parse_size(s: &str) -> Result<(u32, u32), String> {
  let (w, h) = s
    .split_once('x')
    .ok_or_else(|| "size must be WxH (e.g., 1200x1200)".to_string())?;
  let w = w.parse::<u32>().map_err(|_| "invalid width")?;
  let h = h.parse::<u32>().map_err(|_| "invalid height")?;
  if w == 0 || h == 0 {
    return Err("width and height must be > 0".to_string());
  }
  Ok((w, h))
}

fn parse_book(s: &str) -> Result<(f64, f64, f64), String> {
  let parts: Vec<&str> = s.split('x').collect();
  let [w, h, d] = parts.as_slice() else {
    return Err("book must be WxHxD in inches (e.g., 6x9x1)".to_string());
  };
  let parse = |v: &str| v.parse::<f64>().map_err(|_| format!("invalid dimension '{v}'"));
  Ok((parse(*w)?, parse(*h)?, parse(*d)?))
}

fn parse_origin(s: &str) -> Result<Point, String> {
  let (x, y) = s
    .split_once(',')
    .ok_or_else(|| "origin must be X,Y".to_string())?;
  let parse = |v: &str| v.trim().parse::<f64>().map_err(|_| format!("invalid coordinate '{v}'"));
  Ok(Point::new(parse(x)?, parse(y)?))
}

fn load_config(args: &Args) -> Result<ConfigFile, Box<dyn Error>> {
  let mut file = match &args.config {
    Some(path) => ConfigFile::from_json_file(path)?,
    None => ConfigFile::default(),
  };
  let book = &mut file.book;
  if let Some((w, h)) = args.size {
    book.output_width = w;
    book.output_height = h;
  }
  if let Some(border) = args.border {
    book.output_border = border;
  }
  if let Some(dpi) = args.dpi {
    book.output_dpi = Some(dpi);
  }
  if let Some(origin) = args.origin {
    book.output_origin = Some(origin);
  }
  if let Some(yaw) = args.yaw {
    book.y_angle = yaw;
  }
  if let Some(tilt) = args.tilt {
    book.x_angle = tilt;
  }
  if let Some(open) = args.open {
    book.partial_open_angle = open;
  }
  if let Some((w, h, d)) = args.book {
    book.book_width = w;
    book.book_height = h;
    book.spine_width = d;
  }
  if let Some(background) = args.background {
    file.style.background = Some(background);
  }
  if args.no_shadow {
    file.style.shadow = false;
  }
  Ok(file)
}

fn main() -> Result<(), Box<dyn Error>> {
  let args = Args::parse();

  let default_filter = if args.verbose { "debug" } else { "warn" };
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
    .init();

  let config = load_config(&args)?;
  debug!("config: {:?}", config);

  if args.dump_geometry {
    let scene = BookScene::compute(&config.book)?;
    println!("{}", scene.to_json()?);
    return Ok(());
  }

  let Some(cover_path) = &args.cover else {
    return Err("--cover is required".into());
  };
  let cover = image_loader::load_cover(cover_path)?;
  let layout = if args.front_only {
    CoverLayout::FrontOnly
  } else {
    CoverLayout::Wrap
  };

  let pixmap = Renderer::new(config.book)
    .with_style(config.style)
    .with_layout(layout)
    .render(&cover)?;
  image_output::write_image(&pixmap, &args.output)?;
  info!("wrote {}", args.output.display());
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_sizes_and_book_dimensions() {
    assert_eq!(parse_size("1200x800"), Ok((1200, 800)));
    assert!(parse_size("0x600").is_err());
    assert!(parse_size("800").is_err());
    assert_eq!(parse_book("6x9x1.25"), Ok((6.0, 9.0, 1.25)));
    assert!(parse_book("6x9").is_err());
    assert_eq!(parse_origin("400, 650.5"), Ok(Point::new(400.0, 650.5)));
  }

  #[test]
  fn flags_override_defaults() {
    let args = Args::parse_from([
      "bookmockup",
      "--cover",
      "c.png",
      "--yaw",
      "-45",
      "--book",
      "5x8x0.5",
      "--no-shadow",
      "--background",
      "ffffff",
    ]);
    let config = load_config(&args).unwrap();
    assert_eq!(config.book.y_angle, -45.0);
    assert_eq!(config.book.spine_width, 0.5);
    assert!(!config.style.shadow);
    assert_eq!(config.style.background, Some(Rgba::WHITE));
    assert_eq!(config.book.output_width, 1200);
  }
}
