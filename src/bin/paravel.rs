use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use paravel::{EditorState, Evaluator, FrameIndex, SceneDocument};

#[derive(Parser, Debug)]
#[command(name = "paravel", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a starter scene document.
    Init(InitArgs),
    /// Summarize a scene document.
    Info(InfoArgs),
    /// Evaluate a single frame as JSON.
    Eval(EvalArgs),
    /// Evaluate a frame range as JSON lines.
    Frames(FramesArgs),
    /// Apply a JSON stream of editor commands to a document.
    Apply(ApplyArgs),
}

#[derive(Parser, Debug)]
struct InitArgs {
    /// Output path (stdout if omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct InfoArgs {
    /// Input scene document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct EvalArgs {
    /// Input scene document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frame index (0-based).
    #[arg(long)]
    frame: i64,

    /// Output path (stdout if omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FramesArgs {
    /// Input scene document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// First frame of the range (0-based).
    #[arg(long, default_value_t = 0)]
    start: i64,

    /// One past the last frame; defaults to the document duration.
    #[arg(long)]
    end: Option<i64>,

    /// Output path (stdout if omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ApplyArgs {
    /// Input scene document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Command stream: a JSON array of editor commands.
    #[arg(long)]
    commands: PathBuf,

    /// Output path (stdout if omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Init(args) => cmd_init(args),
        Command::Info(args) => cmd_info(args),
        Command::Eval(args) => cmd_eval(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Apply(args) => cmd_apply(args),
    }
}

fn read_document_json(path: &Path) -> anyhow::Result<SceneDocument> {
    let f = File::open(path).with_context(|| format!("open document '{}'", path.display()))?;
    let r = BufReader::new(f);
    let doc: SceneDocument = serde_json::from_reader(r).with_context(|| "parse document JSON")?;
    Ok(doc)
}

fn write_output(out: Option<&Path>, body: &str) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(path, body).with_context(|| format!("write '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => println!("{body}"),
    }
    Ok(())
}

fn cmd_init(args: InitArgs) -> anyhow::Result<()> {
    let doc = SceneDocument::default();
    let body = doc.to_json_string_pretty()?;
    write_output(args.out.as_deref(), &body)
}

fn cmd_info(args: InfoArgs) -> anyhow::Result<()> {
    let doc = read_document_json(&args.in_path)?;

    let element_count: usize = doc.layers.iter().map(|l| l.elements.len()).sum();
    println!(
        "{} ({}x{} @ {} fps)",
        doc.composition_name, doc.width, doc.height, doc.fps
    );
    println!("duration: {} frames", doc.duration_in_frames);
    println!(
        "camera:   ({}, {}) zoom {} -> ({}, {}) zoom {}",
        doc.camera.initial_x,
        doc.camera.initial_y,
        doc.camera.initial_zoom,
        doc.camera.final_x,
        doc.camera.final_y,
        doc.camera.final_zoom,
    );
    println!("layers:   {} ({} elements)", doc.layers.len(), element_count);
    for layer in &doc.layers {
        println!(
            "  [{}] {} parallax ({}, {}) {} elements{}",
            layer.z_index,
            layer.name,
            layer.parallax_factor.x,
            layer.parallax_factor.y,
            layer.elements.len(),
            if layer.is_visible { "" } else { " (hidden)" },
        );
    }
    Ok(())
}

fn cmd_eval(args: EvalArgs) -> anyhow::Result<()> {
    let doc = read_document_json(&args.in_path)?;
    doc.validate()?;

    let evaluated = Evaluator::eval_frame(&doc, FrameIndex(args.frame));
    let body = serde_json::to_string_pretty(&evaluated).context("serialize frame")?;
    write_output(args.out.as_deref(), &body)
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let doc = read_document_json(&args.in_path)?;
    doc.validate()?;

    let end = args.end.unwrap_or(doc.duration_in_frames);
    let mut out: Box<dyn Write> = match &args.out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            let f = File::create(path).with_context(|| format!("create '{}'", path.display()))?;
            Box::new(BufWriter::new(f))
        }
        None => Box::new(std::io::stdout().lock()),
    };

    for frame in args.start..end {
        let evaluated = Evaluator::eval_frame(&doc, FrameIndex(frame));
        let line = serde_json::to_string(&evaluated).context("serialize frame")?;
        writeln!(out, "{line}")?;
    }
    out.flush()?;

    if let Some(path) = &args.out {
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}

fn cmd_apply(args: ApplyArgs) -> anyhow::Result<()> {
    let doc = read_document_json(&args.in_path)?;

    let f = File::open(&args.commands)
        .with_context(|| format!("open commands '{}'", args.commands.display()))?;
    let commands: Vec<paravel::Command> =
        serde_json::from_reader(BufReader::new(f)).with_context(|| "parse command JSON")?;

    let mut state = EditorState {
        document: doc,
        ..EditorState::default()
    };
    for command in commands {
        state = state.apply(command);
    }

    let body = state.document.to_json_string_pretty()?;
    write_output(args.out.as_deref(), &body)
}
