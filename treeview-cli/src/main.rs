mod config;
mod paths;
mod script;

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode, WriteLogger};
use treeview::prelude::*;

use config::Overrides;
use script::Step;

#[derive(Parser)]
#[command(name = "treeview")]
#[command(about = "Load a tree definition, replay a script against it and print the rows")]
struct Cli {
    /// Tree definition as a JSON array of nodes, or `-` for stdin
    data: PathBuf,

    /// Options file (TOML); defaults to options.toml in the config directory
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Script of commands and clicks to replay, one per line
    #[arg(long, short)]
    script: Option<PathBuf>,

    /// Search for a pattern after loading
    #[arg(long)]
    search: Option<String>,

    #[arg(long)]
    levels: Option<usize>,

    #[arg(long)]
    multi_select: bool,

    #[arg(long)]
    show_checkbox: bool,

    #[arg(long)]
    show_tags: bool,

    #[arg(long)]
    enable_links: bool,

    #[arg(long)]
    prevent_unselect: bool,

    /// Let every node be selected, whatever its own flag says
    #[arg(long)]
    selectable: bool,

    /// Allow `menu` / `choose` script steps
    #[arg(long)]
    context_menu: bool,

    /// Print events as they are emitted
    #[arg(long, short)]
    events: bool,

    /// Print rows with their highlight colours
    #[arg(long)]
    color: bool,

    /// Pad or truncate rows to this many columns
    #[arg(long)]
    width: Option<usize>,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[arg(long, short)]
    verbose: bool,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            levels: self.levels,
            multi_select: self.multi_select,
            show_checkbox: self.show_checkbox,
            show_tags: self.show_tags,
            enable_links: self.enable_links,
            prevent_unselect: self.prevent_unselect,
            selectable: self.selectable,
            context_menu: self.context_menu,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let options = config::load_options(cli.config.as_deref())?;
    let options = cli.overrides().apply(options)?;
    let data = read_input(&cli.data)?;

    let mut builder = TreeView::builder(data).options(options);
    if cli.events {
        builder = builder.on_any(print_event);
    }
    let mut tree = builder.build().context("failed to load tree")?;

    if let Some(pattern) = &cli.search {
        tree.search(pattern, SearchOptions::new())?;
    }

    if let Some(path) = &cli.script {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display()))?;
        for step in script::parse(&text)? {
            run_step(&mut tree, step, &cli)?;
        }
    }

    print_rows(&tree, &cli);
    Ok(())
}

fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    match &cli.log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            WriteLogger::init(level, Config::default(), file)?;
        }
        None => TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto)?,
    }
    Ok(())
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        return io::read_to_string(io::stdin()).context("failed to read tree from stdin");
    }
    fs::read_to_string(path).with_context(|| format!("failed to read tree {}", path.display()))
}

fn run_step(tree: &mut TreeView, step: Step, cli: &Cli) -> anyhow::Result<()> {
    match step {
        Step::Command(json) => match tree.invoke(&json)? {
            Some(Outcome::Done) | None => {}
            Some(outcome) => println!("{}", serde_json::to_string(&outcome)?),
        },
        Step::Click { line, part } => {
            if !tree.click_line(line, part) {
                log::warn!("click on line {line} ({part:?}) hit nothing");
            }
        }
        Step::Menu { line } => {
            if !tree.context_menu_line(line) {
                log::warn!("no context menu opened on line {line}");
            }
        }
        Step::Choose { entry } => {
            if !tree.choose_menu_item(entry) {
                log::warn!("menu entry {entry} did nothing");
            }
        }
        Step::Print => print_rows(tree, cli),
    }
    Ok(())
}

fn print_event(event: &TreeEvent) {
    if !matches!(event.kind(), EventKind::Rendered | EventKind::NodeRendered) {
        println!("> {event}");
    }
}

fn print_rows(tree: &TreeView, cli: &Cli) {
    let mut glyphs = terminal_glyphs(tree.options());
    if let Some(width) = cli.width {
        glyphs = glyphs.width(width);
    }
    for line in tree.lines(&glyphs) {
        if cli.color {
            println!("{}", line.to_ansi());
        } else {
            println!("{}", line.text);
        }
    }
    let menu = tree.menu_lines(&glyphs);
    if let Some(node) = tree.context_menu_node() {
        println!("[menu on node {node}]");
        for (n, line) in menu.iter().enumerate() {
            println!("  {n}: {}", line.text);
        }
    }
}
