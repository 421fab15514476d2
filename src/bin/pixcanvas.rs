use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use pixcanvas::{CanvasScript, OutputFormat, RenderOpts, TypefaceRegistry};

#[derive(Parser, Debug)]
#[command(name = "pixcanvas", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render an operation list or a JSON script to an image file.
    Render(RenderArgs),
    /// Compile a JSON script into operation list bytes.
    Compile(CompileArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Encoded operation list.
    #[arg(long, conflicts_with = "script", required_unless_present = "script")]
    ops: Option<PathBuf>,

    /// JSON canvas script. Image paths resolve relative to its directory.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Typeface to register as `alias=path`. Repeatable; the first one is the default face.
    #[arg(long = "font", value_parser = parse_font)]
    fonts: Vec<(String, PathBuf)>,

    /// Output format. Falls back to $PIXCANVAS_FORMAT, then webp.
    #[arg(long)]
    format: Option<OutputFormat>,

    /// Output image path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct CompileArgs {
    /// Input JSON canvas script.
    #[arg(long)]
    script: PathBuf,

    /// Output operation list path.
    #[arg(long)]
    out: PathBuf,
}

fn parse_font(s: &str) -> Result<(String, PathBuf), String> {
    match s.split_once('=') {
        Some((alias, path)) if !alias.is_empty() && !path.is_empty() => {
            Ok((alias.to_string(), PathBuf::from(path)))
        }
        _ => Err(format!("expected alias=path, got '{s}'")),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();

    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Compile(args) => cmd_compile(args),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let ops = match (&args.ops, &args.script) {
        (Some(path), _) => {
            std::fs::read(path).with_context(|| format!("read ops '{}'", path.display()))?
        }
        (None, Some(script)) => compile_script(script)?,
        (None, None) => anyhow::bail!("one of --ops or --script is required"),
    };

    let mut registry = TypefaceRegistry::new();
    for (alias, path) in &args.fonts {
        let bytes =
            std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
        registry
            .try_register(&bytes, alias)
            .with_context(|| format!("register font '{alias}' from '{}'", path.display()))?;
    }

    let mut opts = RenderOpts::from_env();
    if let Some(format) = args.format {
        opts.format = format;
    }
    let image = pixcanvas::render(&ops, &registry, &opts).context("render canvas")?;

    write_output(&args.out, &image.bytes)?;
    eprintln!(
        "wrote {} ({} bytes, {})",
        args.out.display(),
        image.len(),
        image.format
    );
    Ok(())
}

fn cmd_compile(args: CompileArgs) -> anyhow::Result<()> {
    let bytes = compile_script(&args.script)?;
    write_output(&args.out, &bytes)?;
    eprintln!("wrote {} ({} bytes)", args.out.display(), bytes.len());
    Ok(())
}

fn compile_script(path: &Path) -> anyhow::Result<Vec<u8>> {
    let script = CanvasScript::from_path(path)?;
    let assets_root = path.parent().unwrap_or_else(|| Path::new("."));
    script
        .to_wire(assets_root)
        .with_context(|| format!("compile script '{}'", path.display()))
}

fn write_output(out: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(out, bytes).with_context(|| format!("write '{}'", out.display()))
}
