//! Command line surface of `llclasses`.

use crate::scan::{ProjectScanner, ScanSummary};
use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use classtree::export::{
    export_dot, export_dot_split, export_html, export_json, export_text, write_dot_files,
    PresentOptions, TreeCharset,
};
use classtree::{ClassGraph, PatternList, ShowOptions};
use classtree_parser_api::ParserConfig;
use log::{debug, info, LevelFilter};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

/// Renderer selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Html,
    Json,
    Graphviz,
}

/// List and draw the class hierarchy of Java and C++ source trees.
#[derive(Parser, Debug)]
#[command(name = "llclasses")]
#[command(about = "Class hierarchy presenter for Java and C++ sources", long_about = None)]
#[command(disable_help_flag = true)]
pub struct Cli {
    /// Print help
    #[arg(long, action = ArgAction::Help)]
    pub help: Option<bool>,

    /// Show the class names table
    #[arg(short = 'n', long = "names")]
    pub names: bool,

    /// Do not show the class tree
    #[arg(short = 't', long = "no-tree")]
    pub no_tree: bool,

    /// Draw the tree with box graphics (default)
    #[arg(short = 'g', long = "graphics", conflicts_with_all = ["ascii", "spaces"])]
    pub graphics: bool,

    /// Draw the tree with ASCII characters
    #[arg(short = 'x', long = "ascii", conflicts_with = "spaces")]
    pub ascii: bool,

    /// Indent the tree with spaces only
    #[arg(short = 's', long = "spaces")]
    pub spaces: bool,

    /// Render an HTML page
    #[arg(short = 'h', long = "html", conflicts_with_all = ["json", "graphviz"])]
    pub html: bool,

    /// Render JSON nodes and links
    #[arg(short = 'j', long = "json", conflicts_with = "graphviz")]
    pub json: bool,

    /// Render a Graphviz digraph
    #[arg(short = 'z', long = "graphviz")]
    pub graphviz: bool,

    /// Show every class, not just public definitions
    #[arg(short = 'A', long = "all-classes")]
    pub all_classes: bool,

    /// Show interfaces
    #[arg(short = 'I', long = "interfaces")]
    pub interfaces: bool,

    /// Parse imports instead of classes, keeping DEPTH leading segments
    /// (negative drops trailing segments). Implies --all-classes
    #[arg(
        short = 'M',
        long = "imports",
        value_name = "DEPTH",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "1000",
        allow_negative_numbers = true
    )]
    pub imports: Option<i32>,

    /// Ignore classes matching PATTERN (`*` wildcard)
    #[arg(short = 'v', long = "ignore-class", value_name = "PATTERN")]
    pub ignore_class: Vec<String>,

    /// Only keep classes matching PATTERN (`*` wildcard)
    #[arg(short = 'i', long = "include-class", value_name = "PATTERN")]
    pub include_class: Vec<String>,

    /// Skip files and directories whose path matches PATTERN (`*` wildcard)
    #[arg(short = 'V', long = "ignore-path", value_name = "PATTERN")]
    pub ignore_path: Vec<String>,

    /// Title for the diagram or page, repeat for split Graphviz files
    #[arg(short = 'L', long = "title", value_name = "TITLE")]
    pub title: Vec<String>,

    /// Output file, or output directory for split Graphviz files
    #[arg(short = 'O', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Write one Graphviz file per root tree
    #[arg(short = 'Z', long = "split")]
    pub split: bool,

    /// Start a new Graphviz file every COUNT nodes
    #[arg(short = 'N', long = "nodes-per-file", value_name = "COUNT")]
    pub nodes_per_file: Option<usize>,

    /// Raise log verbosity (repeat for more)
    #[arg(short = 'l', long = "log-level", action = ArgAction::Count)]
    pub log_level: u8,

    /// Source files or directories to scan
    #[arg(required = true, value_name = "PATH")]
    pub paths: Vec<PathBuf>,
}

impl Cli {
    /// Selected renderer.
    pub fn format(&self) -> OutputFormat {
        if self.html {
            OutputFormat::Html
        } else if self.json {
            OutputFormat::Json
        } else if self.graphviz || self.split || self.nodes_per_file.is_some() {
            OutputFormat::Graphviz
        } else {
            OutputFormat::Text
        }
    }

    /// Parser settings for this run.
    pub fn parser_config(&self) -> ParserConfig {
        ParserConfig::default()
            .with_import_depth(self.imports.unwrap_or(0))
            .with_trace_declarations(self.log_level >= 3)
            .with_dump_class_list(self.log_level >= 2)
    }

    /// Presenter settings for this run.
    pub fn present_options(&self) -> PresentOptions {
        let charset = if self.ascii {
            TreeCharset::Ascii
        } else if self.spaces {
            TreeCharset::Spaces
        } else {
            TreeCharset::Graphics
        };
        PresentOptions {
            show: ShowOptions {
                // Import targets are never definitions
                show_all_classes: self.all_classes || self.imports.is_some(),
                show_interfaces: self.interfaces,
            },
            show_names: self.names,
            show_tree: !self.no_tree,
            charset,
            titles: self.title.clone(),
            split_by_tree: self.split,
            nodes_per_file: self.nodes_per_file.unwrap_or(0),
        }
    }

    /// Log filter for the `-l` count.
    pub fn log_filter(&self) -> LevelFilter {
        match self.log_level {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 | 3 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

/// Scan, present and release.
pub fn run(cli: &Cli) -> Result<ScanSummary> {
    let ignore = PatternList::from_globs(&cli.ignore_class).context("invalid --ignore-class")?;
    let include =
        PatternList::from_globs(&cli.include_class).context("invalid --include-class")?;
    let ignore_paths =
        PatternList::from_globs(&cli.ignore_path).context("invalid --ignore-path")?;

    let mut graph = ClassGraph::with_filters(ignore, include);
    let scanner = ProjectScanner::new(cli.parser_config()).with_ignore_paths(ignore_paths);
    let summary = scanner.scan_paths(&cli.paths, &mut graph);

    let metrics = scanner.metrics();
    debug!(
        "Parsed {}/{} files, {} statements, {} declarations in {:?}",
        metrics.files_succeeded,
        metrics.files_attempted,
        metrics.total_statements,
        metrics.total_declarations,
        metrics.total_parse_time
    );
    eprintln!(
        "Files read: {} classes extracted: {}",
        summary.files_read, summary.class_count
    );

    if !graph.is_empty() {
        present(cli, &graph)?;
    }
    let freed = graph.release();
    debug!("Released {} classes", freed);
    Ok(summary)
}

fn present(cli: &Cli, graph: &ClassGraph) -> Result<()> {
    let options = cli.present_options();
    let format = cli.format();

    if format == OutputFormat::Graphviz && (options.split_by_tree || options.nodes_per_file > 0) {
        let dir = cli.output.clone().unwrap_or_else(|| PathBuf::from("."));
        let documents = export_dot_split(graph, &options)?;
        let written = write_dot_files(&documents, &dir)
            .with_context(|| format!("cannot write Graphviz files to {}", dir.display()))?;
        info!("Wrote {} Graphviz files", written.len());
        return Ok(());
    }

    let rendered = match format {
        OutputFormat::Text => export_text(graph, &options)?,
        OutputFormat::Html => export_html(graph, &options)?,
        OutputFormat::Json => export_json(graph, &options)?,
        OutputFormat::Graphviz => export_dot(graph, &options)?,
    };

    match &cli.output {
        Some(path) => fs::write(path, rendered)
            .with_context(|| format!("cannot write {}", path.display()))?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
