use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use serde::Deserialize;
use slidesmith::{
    BlockFont, BrandKit, Canvas, FontBook, LayoutBox, PostPlan, RenderThreading, SlideContent,
    StyleHints, StyleSpec, TextPainter,
};

#[derive(Parser, Debug)]
#[command(name = "slidesmith", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,

    #[command(flatten)]
    text: TextArgs,

    /// More log output (repeatable).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors.
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Args, Debug)]
struct TextArgs {
    /// Font file to load, optionally with a weight suffix (`Inter-Bold.ttf:700`). Repeatable.
    #[arg(long = "font", value_name = "PATH[:WEIGHT]", global = true)]
    fonts: Vec<String>,

    /// Use placeholder block glyphs instead of font files.
    #[arg(long, global = true)]
    block_font: bool,

    /// Brand kit JSON; missing fields keep their defaults.
    #[arg(long, global = true)]
    brand: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fit text into a box and print the resulting text block as JSON.
    Layout(LayoutArgs),
    /// Render the branded headline slide as a PNG.
    Headline(HeadlineArgs),
    /// Render every slide of a post JSON into a directory.
    Post(PostArgs),
}

#[derive(Parser, Debug)]
struct LayoutArgs {
    /// Text to fit.
    #[arg(long)]
    text: String,

    /// Box width in pixels.
    #[arg(long)]
    width: f32,

    /// Box height in pixels.
    #[arg(long)]
    height: f32,

    /// Candidate font sizes, largest first.
    #[arg(long, value_delimiter = ',', default_value = "72,60,48,36")]
    sizes: Vec<f32>,

    /// Style JSON; missing fields keep their defaults.
    #[arg(long)]
    style: Option<PathBuf>,

    /// Override the style's line limit.
    #[arg(long)]
    max_lines: Option<usize>,
}

#[derive(Parser, Debug)]
struct HeadlineArgs {
    /// Headline text.
    #[arg(long)]
    text: String,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct PostArgs {
    /// Post JSON: headline, slides with title/text/background, optional hints.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output directory for `slide_NN.png`.
    #[arg(long)]
    out_dir: PathBuf,

    /// Render slides in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct PostFile {
    #[serde(alias = "headline_slide_text")]
    headline: String,
    #[serde(alias = "symbolic_slides")]
    slides: Vec<PostFileSlide>,
    hints: StyleHints,
}

#[derive(Deserialize, Debug)]
struct PostFileSlide {
    #[serde(flatten)]
    content: SlideContent,
    /// Relative paths resolve against the post file's directory.
    background: Option<PathBuf>,
}

enum Painter {
    Block(BlockFont),
    Fonts(FontBook),
}

impl Painter {
    fn as_dyn(&self) -> &dyn TextPainter {
        match self {
            Self::Block(b) => b,
            Self::Fonts(f) => f,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);
    match cli.cmd {
        Command::Layout(args) => cmd_layout(&cli.text, args),
        Command::Headline(args) => cmd_headline(&cli.text, args),
        Command::Post(args) => cmd_post(&cli.text, args),
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => tracing::Level::ERROR,
        (false, 0) => tracing::Level::WARN,
        (false, 1) => tracing::Level::INFO,
        (false, 2) => tracing::Level::DEBUG,
        (false, _) => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn parse_font_arg(arg: &str) -> anyhow::Result<(PathBuf, u16)> {
    if let Some((path, weight)) = arg.rsplit_once(':')
        && !weight.is_empty()
        && weight.chars().all(|c| c.is_ascii_digit())
    {
        let weight = weight
            .parse::<u16>()
            .with_context(|| format!("font weight in '{arg}'"))?;
        return Ok((PathBuf::from(path), weight));
    }
    Ok((PathBuf::from(arg), 400))
}

fn load_painter(args: &TextArgs) -> anyhow::Result<Painter> {
    if args.block_font {
        return Ok(Painter::Block(BlockFont::default()));
    }
    anyhow::ensure!(
        !args.fonts.is_empty(),
        "no fonts given; pass --font PATH[:WEIGHT] or --block-font"
    );
    let mut book = FontBook::new();
    for arg in &args.fonts {
        let (path, weight) = parse_font_arg(arg)?;
        let family = book.load_font_file(&path, weight)?;
        tracing::info!(family = %family, weight, path = %path.display(), "font loaded");
    }
    tracing::debug!(faces = ?book.faces().collect::<Vec<_>>(), "font book ready");
    Ok(Painter::Fonts(book))
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let f = std::fs::File::open(path).with_context(|| format!("open '{}'", path.display()))?;
    serde_json::from_reader(std::io::BufReader::new(f))
        .with_context(|| format!("parse json '{}'", path.display()))
}

fn load_brand(args: &TextArgs) -> anyhow::Result<BrandKit> {
    let brand = match &args.brand {
        Some(path) => BrandKit::from_path(path)?,
        None => BrandKit::default(),
    };
    brand.validate()?;
    Ok(brand)
}

fn write_png(canvas: &Canvas, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let png = slidesmith::encode_png(canvas)?;
    std::fs::write(path, png).with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

fn cmd_layout(text_args: &TextArgs, args: LayoutArgs) -> anyhow::Result<()> {
    let painter = load_painter(text_args)?;
    let mut style: StyleSpec = match &args.style {
        Some(path) => read_json(path)?,
        None => StyleSpec::default(),
    };
    if args.max_lines.is_some() {
        style.max_lines = args.max_lines;
    }
    let block = slidesmith::layout(
        &args.text,
        LayoutBox::new(args.width, args.height),
        &args.sizes,
        &style,
        painter.as_dyn(),
    )?;
    println!("{}", serde_json::to_string_pretty(&block)?);
    Ok(())
}

fn cmd_headline(text_args: &TextArgs, args: HeadlineArgs) -> anyhow::Result<()> {
    let painter = load_painter(text_args)?;
    let brand = load_brand(text_args)?;
    let slide = slidesmith::compose_headline(&args.text, &brand, painter.as_dyn())?;
    write_png(&slide.canvas, &args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_post(text_args: &TextArgs, args: PostArgs) -> anyhow::Result<()> {
    let painter = load_painter(text_args)?;
    let brand = load_brand(text_args)?;
    let post: PostFile = read_json(&args.in_path)?;
    let assets_root = args.in_path.parent().unwrap_or_else(|| Path::new("."));

    let backgrounds: Vec<Option<Canvas>> = post
        .slides
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let path = assets_root.join(s.background.as_ref()?);
            match slidesmith::load_canvas(&path) {
                Ok(canvas) => Some(canvas),
                Err(err) => {
                    tracing::error!(slide = i + 1, error = %err, "background not loaded");
                    None
                }
            }
        })
        .collect();
    let plan = PostPlan {
        headline: post.headline,
        slides: post.slides.into_iter().map(|s| s.content).collect(),
        hints: post.hints,
    };
    let threading = RenderThreading {
        parallel: args.parallel,
        threads: args.threads,
    };

    let results =
        slidesmith::compose_post(&plan, &backgrounds, &brand, painter.as_dyn(), threading)?;
    let total = results.len();
    let mut failed = 0;
    for (index, result) in results.into_iter().enumerate() {
        let out = args.out_dir.join(format!("slide_{:02}.png", index + 1));
        match result
            .map_err(anyhow::Error::from)
            .and_then(|slide| write_png(&slide.canvas, &out))
        {
            Ok(()) => eprintln!("wrote {}", out.display()),
            Err(err) => {
                failed += 1;
                eprintln!("slide {}: {err:#}", index + 1);
            }
        }
    }
    anyhow::ensure!(failed == 0, "{failed} of {total} slides failed");
    Ok(())
}
