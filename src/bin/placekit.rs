//! # PlaceKit CLI
//!
//! Fetch placeholder images and text, or print random placeholder data.
//!
//! Usage: `cargo run --features cli --bin placekit -- kitten 200 300 --out kitten.png`

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand, ValueEnum};
use dotenvy::dotenv;
use log::info;
use std::path::PathBuf;
use tokio::sync::oneshot;

use placekit::{
    Config, Dimension, FetchResult, ImageProvider, NumericRange, ParagraphLength, PlaceKit, Rect,
    TextOptions,
};

#[derive(Parser)]
#[command(name = "placekit", version, about = "Placeholder content for early development")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Kitten image from placekitten.com
    Kitten {
        width: f64,
        height: f64,
        #[arg(long)]
        greyscale: bool,
        #[arg(long, default_value = "kitten.png")]
        out: PathBuf,
    },
    /// Meat-themed image from baconmockup.com
    Bacon {
        width: f64,
        height: f64,
        #[arg(long, default_value = "bacon.png")]
        out: PathBuf,
    },
    /// Generic placeholder image from placehold.it
    Placeholder {
        width: f64,
        height: f64,
        #[arg(long, default_value = "placeholder.png")]
        out: PathBuf,
    },
    /// Random photo from lorempixel.com
    Random {
        width: f64,
        height: f64,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        greyscale: bool,
        #[arg(long, default_value = "random.png")]
        out: PathBuf,
    },
    /// Filler text from loripsum.net
    Text {
        #[arg(long, default_value_t = 1)]
        paragraphs: u32,
        #[arg(long, value_enum, default_value_t = Length::Medium)]
        length: Length,
        #[arg(long)]
        all_caps: bool,
        #[arg(long)]
        prude: bool,
    },
    /// Random person name
    Name {
        #[arg(long, value_enum, default_value_t = NamePart::Full)]
        part: NamePart,
    },
    /// Random business name
    Business {
        #[arg(long, default_value_t = 2)]
        words: usize,
    },
    /// Random US-style phone number
    Phone,
    /// Random integer in [0, less_than)
    Int { less_than: i64 },
    /// Random float in [0, less_than)
    Float { less_than: f64 },
    /// Random float in [low, high]
    Range { low: f64, high: f64 },
    /// Random value in [0, 1]
    Percent,
    /// Random size with each side in [min, max]
    Size { min: f64, max: f64 },
    /// Random rect inside the given rect
    Rect { x: f64, y: f64, width: f64, height: f64 },
    /// Random point inside the given rect
    Point { x: f64, y: f64, width: f64, height: f64 },
}

#[derive(Clone, Copy, ValueEnum)]
enum Length {
    VeryShort,
    Short,
    Medium,
    Long,
    VeryLong,
}

impl From<Length> for ParagraphLength {
    fn from(length: Length) -> Self {
        match length {
            Length::VeryShort => ParagraphLength::VeryShort,
            Length::Short => ParagraphLength::Short,
            Length::Medium => ParagraphLength::Medium,
            Length::Long => ParagraphLength::Long,
            Length::VeryLong => ParagraphLength::VeryLong,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum NamePart {
    First,
    Last,
    Full,
}

/// Fetch an image, wait for its completion and save it to `out`
async fn save_image(
    kit: &PlaceKit,
    provider: ImageProvider,
    size: Dimension,
    category: Option<&str>,
    out: PathBuf,
) -> Result<()> {
    let (tx, rx) = oneshot::channel();
    kit.place_image(provider, size, category, move |result| {
        let _ = tx.send(result);
    })?;

    let image = rx.await.map_err(|_| anyhow!("fetch was cancelled"))??;
    image.save(&out)?;
    println!("Saved {}x{} {provider} image to {}", image.width(), image.height(), out.display());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    let cli = Cli::parse();
    let kit = PlaceKit::from_config(&config)?;
    info!("PlaceKit ready");

    match cli.command {
        Command::Kitten {
            width,
            height,
            greyscale,
            out,
        } => {
            let provider = if greyscale {
                ImageProvider::GreyscaleKitten
            } else {
                ImageProvider::Kitten
            };
            save_image(&kit, provider, Dimension::new(width, height), None, out).await?;
        }
        Command::Bacon { width, height, out } => {
            save_image(&kit, ImageProvider::Bacon, Dimension::new(width, height), None, out).await?;
        }
        Command::Placeholder { width, height, out } => {
            let size = Dimension::new(width, height);
            save_image(&kit, ImageProvider::PlaceHolder, size, None, out).await?;
        }
        Command::Random {
            width,
            height,
            category,
            greyscale,
            out,
        } => {
            let provider = if greyscale {
                ImageProvider::GreyscaleRandom
            } else {
                ImageProvider::Random
            };
            let size = Dimension::new(width, height);
            save_image(&kit, provider, size, category.as_deref(), out).await?;
        }
        Command::Text {
            paragraphs,
            length,
            all_caps,
            prude,
        } => {
            let mut options = TextOptions::empty();
            options.set(TextOptions::ALL_CAPS, all_caps);
            options.set(TextOptions::PRUDE, prude);

            let (tx, rx) = oneshot::channel::<FetchResult<String>>();
            kit.place_text(paragraphs, length.into(), options, move |result| {
                let _ = tx.send(result);
            })?;
            let text = rx.await.map_err(|_| anyhow!("fetch was cancelled"))??;
            println!("{text}");
        }
        Command::Name { part } => {
            let name = match part {
                NamePart::First => kit.place_random_first_name(),
                NamePart::Last => kit.place_random_last_name(),
                NamePart::Full => kit.place_random_full_name(),
            };
            println!("{name}");
        }
        Command::Business { words } => println!("{}", kit.place_random_business_name(words)?),
        Command::Phone => println!("{}", kit.place_random_phone_number()),
        Command::Int { less_than } => println!("{}", kit.place_random_integer(less_than)?),
        Command::Float { less_than } => println!("{}", kit.place_random_float(less_than)?),
        Command::Range { low, high } => {
            println!("{}", kit.place_random_float_in(NumericRange::new(low, high)?))
        }
        Command::Percent => println!("{}", kit.place_random_percentage()),
        Command::Size { min, max } => {
            let size = kit.place_random_size(NumericRange::new(min, max)?)?;
            println!("{} x {}", size.width, size.height);
        }
        Command::Rect {
            x,
            y,
            width,
            height,
        } => {
            let rect = kit.place_random_rect(&Rect::new(x, y, width, height))?;
            println!(
                "origin ({}, {}) size {} x {}",
                rect.origin.x, rect.origin.y, rect.size.width, rect.size.height
            );
        }
        Command::Point {
            x,
            y,
            width,
            height,
        } => {
            let point = kit.place_random_point(&Rect::new(x, y, width, height))?;
            println!("({}, {})", point.x, point.y);
        }
    }

    Ok(())
}
