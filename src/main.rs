// algotrace: step-replay visualizer for algorithms and data structures

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Mutex;
use std::thread;

use clap::{Args, Parser, Subcommand, ValueEnum};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use indexmap::IndexMap;
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use algotrace::config::{Config, EngineConfig};
use algotrace::engine::MonotonicClock;
use algotrace::error::{AppError, TraceError};
use algotrace::inputs::InputSettings;
use algotrace::trace::sorting::{Shape, SortInput, SortStep};
use algotrace::trace::structures::{
    Bst, HashTable, Heap, HeapKind, LinkedList, Queue, Stack, Structure, Trie, KINDS,
};
use algotrace::trace::{graph, searching, sorting, strings, Registry, TraceStep};
use algotrace::ui::{AlgorithmScene, App, Scene, StructureScene, Visual};
use algotrace::view::{
    race, GraphView, Race, RaceResult, SearchView, SortView, StringView, StructureView,
};

/// Step-replay visualizer for algorithms and data structures.
#[derive(Parser)]
#[command(name = "algotrace", version, about)]
struct Cli {
    /// JSON configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Initial playback speed multiplier.
    #[arg(long, global = true)]
    speed: Option<f64>,

    /// Write logs to this file (the TUI logs nowhere otherwise).
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Log at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every algorithm and data structure.
    List,

    /// Run one algorithm headless and print its steps as JSON lines.
    Trace {
        family: Family,

        /// Algorithm id, or the structure kind for `structures`.
        algorithm: String,

        /// Print step counts per kind instead of the steps.
        #[arg(long)]
        summary: bool,

        #[command(flatten)]
        input: InputArgs,
    },

    /// Open the interactive visualizer.
    Tui {
        family: Family,

        /// Algorithm id, or the structure kind for `structures`.
        #[arg(short, long)]
        algorithm: Option<String>,

        #[command(flatten)]
        input: InputArgs,
    },

    /// Race sorting algorithms over the same input.
    Race {
        /// Comma-separated sorting ids (default: all).
        #[arg(value_delimiter = ',')]
        algorithms: Vec<String>,

        /// Print the standings as JSON.
        #[arg(long)]
        json: bool,

        /// Play the race in real time and announce finishers as they cross.
        #[arg(long, conflicts_with = "json")]
        live: bool,

        #[command(flatten)]
        input: InputArgs,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Family {
    Sorting,
    Searching,
    Graph,
    Strings,
    Structures,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ShapeArg {
    Random,
    Nearly,
    Reversed,
    FewUnique,
}

impl From<ShapeArg> for Shape {
    fn from(shape: ShapeArg) -> Self {
        match shape {
            ShapeArg::Random => Shape::Random,
            ShapeArg::Nearly => Shape::Nearly,
            ShapeArg::Reversed => Shape::Reversed,
            ShapeArg::FewUnique => Shape::FewUnique,
        }
    }
}

#[derive(Args, Debug, Default)]
struct InputArgs {
    /// Number of generated elements.
    #[arg(long)]
    size: Option<usize>,

    /// Seed for generated inputs and randomized algorithms.
    #[arg(long)]
    seed: Option<u64>,

    /// Shape of generated sorting arrays.
    #[arg(long, value_enum)]
    shape: Option<ShapeArg>,

    /// Search target (drawn from the array by default).
    #[arg(long)]
    target: Option<u32>,

    /// Graph start node.
    #[arg(long, default_value_t = 0)]
    source: u32,

    /// Graph goal node for path-finding algorithms.
    #[arg(long)]
    to: Option<u32>,

    /// Text searched by string matchers.
    #[arg(long)]
    text: Option<String>,

    /// Pattern searched for by string matchers.
    #[arg(long)]
    pattern: Option<String>,

    /// Structure operation such as `insert:42`; repeat for a sequence.
    #[arg(long = "op")]
    ops: Vec<String>,
}

/// Where log output goes
enum LogSink {
    Off,
    Stderr,
    File(File),
}

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    let sink = match (&cli.command, &cli.log_file) {
        (_, Some(path)) => LogSink::File(File::create(path)?),
        (Commands::Tui { .. }, None) => LogSink::Off,
        _ => LogSink::Stderr,
    };
    init_logging(cli.verbose, sink)?;

    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(speed) = cli.speed {
        config.engine.initial_speed = speed;
    }

    match cli.command {
        Commands::List => {
            list(&mut io::stdout().lock())?;
        }
        Commands::Trace {
            family,
            algorithm,
            summary,
            input,
        } => {
            let settings = settings(&mut config, &input)?;
            let mut out = BufWriter::new(io::stdout().lock());
            trace(family, &algorithm, &settings, &input.ops, summary, &mut out)?;
            out.flush()?;
        }
        Commands::Tui {
            family,
            algorithm,
            input,
        } => {
            let settings = settings(&mut config, &input)?;
            let scene = scene(
                family,
                algorithm.as_deref(),
                settings,
                &input.ops,
                config.engine.clone(),
            )?;
            run_tui(scene, &config)?;
        }
        Commands::Race {
            algorithms,
            json,
            live,
            input,
        } => {
            let settings = settings(&mut config, &input)?;
            let mut out = io::stdout().lock();
            if live {
                run_live_race(&algorithms, &settings, &config, &mut out)?;
            } else {
                run_race(&algorithms, &settings, json, &mut out)?;
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool, sink: LogSink) -> Result<(), AppError> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let installed = match sink {
        LogSink::Off => return Ok(()),
        LogSink::Stderr => builder.with_writer(io::stderr).try_init(),
        LogSink::File(file) => builder
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init(),
    };
    installed.map_err(|e| AppError::Logging(e.to_string()))
}

/// Apply command-line overrides to `config` and derive the input settings
fn settings(config: &mut Config, args: &InputArgs) -> Result<InputSettings, AppError> {
    if let Some(size) = args.size {
        config.input.size = size;
    }
    if let Some(seed) = args.seed {
        config.input.seed = seed;
    }
    config.validate()?;

    let mut settings = InputSettings::from_config(&config.input);
    if let Some(shape) = args.shape {
        settings.shape = shape.into();
    }
    settings.target = args.target;
    settings.source = args.source;
    settings.to = args.to;
    if let Some(text) = &args.text {
        settings.text = text.clone();
    }
    if let Some(pattern) = &args.pattern {
        settings.pattern = pattern.clone();
    }
    Ok(settings)
}

// ========== list ==========

fn list(out: &mut impl Write) -> io::Result<()> {
    list_registry(out, &sorting::registry())?;
    list_registry(out, &searching::registry())?;
    list_registry(out, &graph::registry())?;
    list_registry(out, &strings::registry())?;
    writeln!(out, "structures")?;
    for kind in KINDS {
        writeln!(out, "  {}", kind)?;
    }
    Ok(())
}

fn list_registry<I, S>(out: &mut impl Write, registry: &Registry<I, S>) -> io::Result<()> {
    writeln!(out, "{}", registry.family())?;
    for info in registry.infos() {
        writeln!(
            out,
            "  {:<16} {:<22} time {:<14} space {}",
            info.id, info.name, info.time, info.space
        )?;
    }
    Ok(())
}

// ========== trace ==========

fn trace(
    family: Family,
    algorithm: &str,
    settings: &InputSettings,
    ops: &[String],
    summary: bool,
    out: &mut impl Write,
) -> Result<(), AppError> {
    let seed = settings.seed;
    match family {
        Family::Sorting => {
            let steps = sorting::registry().run(algorithm, &settings.sort_input(seed))?;
            emit(&steps, summary, out)
        }
        Family::Searching => {
            let steps = searching::registry().run(algorithm, &settings.search_input(seed))?;
            emit(&steps, summary, out)
        }
        Family::Graph => {
            let steps = graph::registry().run(algorithm, &settings.graph_input(seed))?;
            emit(&steps, summary, out)
        }
        Family::Strings => {
            let steps = strings::registry().run(algorithm, &settings.match_input())?;
            emit(&steps, summary, out)
        }
        Family::Structures => with_structure(
            algorithm,
            TraceStructure {
                ops,
                summary,
                out,
            },
        )?,
    }
}

/// Print steps as JSON lines, or a per-kind count
fn emit<S: TraceStep>(steps: &[S], summary: bool, out: &mut impl Write) -> Result<(), AppError> {
    if summary {
        let mut counts: IndexMap<&'static str, usize> = IndexMap::new();
        for step in steps {
            *counts.entry(step.kind()).or_default() += 1;
        }
        writeln!(out, "{} steps", steps.len())?;
        for (kind, count) in counts {
            writeln!(out, "  {:<12} {}", kind, count)?;
        }
    } else {
        for step in steps {
            serde_json::to_writer(&mut *out, step)?;
            writeln!(out)?;
        }
    }
    info!(steps = steps.len(), "trace written");
    Ok(())
}

// ========== structures ==========

/// Something to do with a structure picked by name at runtime
trait StructureTask {
    type Output;

    fn run<T>(self, kind: &'static str, initial: T) -> Self::Output
    where
        T: Structure + 'static,
        StructureView<T>: Visual<T>;
}

/// Call `task` with the initial structure named `name`
fn with_structure<W: StructureTask>(name: &str, task: W) -> Result<W::Output, TraceError> {
    let kind = KINDS
        .iter()
        .copied()
        .find(|k| *k == name)
        .ok_or_else(|| TraceError::UnknownAlgorithm {
            id: name.to_string(),
            available: KINDS.join(", "),
        })?;
    Ok(match kind {
        "linked-list" => task.run(kind, LinkedList::new(vec![12, 7, 33, 4])),
        "stack" => task.run(kind, Stack { items: vec![4, 8, 15] }),
        "queue" => task.run(kind, Queue { items: vec![16, 23, 42] }),
        "bst" => task.run(kind, Bst::sample()),
        "heap-min" => task.run(kind, Heap::sample(HeapKind::Min)),
        "heap-max" => task.run(kind, Heap::sample(HeapKind::Max)),
        "hash-table" => task.run(kind, HashTable::sample()),
        _ => task.run(kind, Trie::sample()),
    })
}

/// Operations played when none are given on the command line
fn default_ops(kind: &str) -> Vec<String> {
    let ops: &[&str] = match kind {
        "linked-list" => &[
            "insert-head:5",
            "insert-tail:40",
            "insert-at:2:25",
            "search:33",
            "delete-tail",
            "reverse",
        ],
        "stack" => &["push:16", "push:23", "peek", "pop", "pop"],
        "queue" => &["enqueue:4", "enqueue:8", "peek", "dequeue", "dequeue"],
        "bst" => &["insert:55", "search:35", "delete:30", "inorder", "levelorder"],
        "heap-min" | "heap-max" => &["insert:3", "insert:40", "extract", "extract"],
        "hash-table" => &["insert:kiwi:4", "get:cherry", "insert:apple:6", "remove:fig"],
        _ => &["insert:cars", "search:card", "starts-with:do", "delete:dog"],
    };
    ops.iter().map(|s| s.to_string()).collect()
}

fn ops_or_default(kind: &str, ops: &[String]) -> Vec<String> {
    if ops.is_empty() {
        default_ops(kind)
    } else {
        ops.to_vec()
    }
}

struct TraceStructure<'a, W> {
    ops: &'a [String],
    summary: bool,
    out: &'a mut W,
}

impl<W: Write> StructureTask for TraceStructure<'_, W> {
    type Output = Result<(), AppError>;

    fn run<T>(self, kind: &'static str, initial: T) -> Self::Output
    where
        T: Structure + 'static,
        StructureView<T>: Visual<T>,
    {
        let mut current = initial;
        let mut steps = Vec::new();
        for text in ops_or_default(kind, self.ops) {
            let op = T::Op::from_str(&text)?;
            let outcome = current.run(&op);
            debug!(kind, op = %text, steps = outcome.steps.len(), "ran operation");
            steps.extend(outcome.steps);
            current = outcome.after;
        }
        emit(&steps, self.summary, self.out)
    }
}

struct BuildScene<'a> {
    ops: &'a [String],
    config: EngineConfig,
}

impl StructureTask for BuildScene<'_> {
    type Output = Result<Box<dyn Scene>, TraceError>;

    fn run<T>(self, kind: &'static str, initial: T) -> Self::Output
    where
        T: Structure + 'static,
        StructureView<T>: Visual<T>,
    {
        let ops = ops_or_default(kind, self.ops);
        Ok(Box::new(StructureScene::new(kind, initial, &ops, self.config)?))
    }
}

// ========== tui ==========

fn scene(
    family: Family,
    algorithm: Option<&str>,
    settings: InputSettings,
    ops: &[String],
    config: EngineConfig,
) -> Result<Box<dyn Scene>, TraceError> {
    let seed = settings.seed;
    let scene: Box<dyn Scene> = match family {
        Family::Sorting => Box::new(AlgorithmScene::<_, _, SortView>::new(
            "Sorting",
            sorting::registry(),
            algorithm,
            seed,
            Box::new(move |seed| settings.sort_input(seed)),
            config,
        )?),
        Family::Searching => Box::new(AlgorithmScene::<_, _, SearchView>::new(
            "Searching",
            searching::registry(),
            algorithm,
            seed,
            Box::new(move |seed| settings.search_input(seed)),
            config,
        )?),
        Family::Graph => Box::new(AlgorithmScene::<_, _, GraphView>::new(
            "Graph",
            graph::registry(),
            algorithm,
            seed,
            Box::new(move |seed| settings.graph_input(seed)),
            config,
        )?),
        Family::Strings => Box::new(AlgorithmScene::<_, _, StringView>::new(
            "Strings",
            strings::registry(),
            algorithm,
            seed,
            Box::new(move |_: u64| settings.match_input()),
            config,
        )?),
        Family::Structures => {
            let name = algorithm.unwrap_or(KINDS[0]);
            with_structure(name, BuildScene { ops, config })??
        }
    };
    Ok(scene)
}

fn run_tui(scene: Box<dyn Scene>, config: &Config) -> Result<(), AppError> {
    info!(family = scene.family(), title = %scene.title(), "starting tui");

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(scene, config.ui.frame_interval());
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.map_err(AppError::from)
}

// ========== race ==========

/// Requested sorting ids, or every registered one
fn race_ids<'a>(
    registry: &'a Registry<SortInput, SortStep>,
    algorithms: &'a [String],
) -> Vec<&'a str> {
    if algorithms.is_empty() {
        registry.ids().collect()
    } else {
        algorithms.iter().map(String::as_str).collect()
    }
}

fn write_standing(out: &mut impl Write, r: &RaceResult) -> io::Result<()> {
    writeln!(
        out,
        "{:>2}. {:<16} {:>6} steps {:>6} comparisons {:>6} swaps",
        r.place.unwrap_or_default(),
        r.name,
        r.steps,
        r.comparisons,
        r.swaps
    )
}

fn run_race(
    algorithms: &[String],
    settings: &InputSettings,
    json: bool,
    out: &mut impl Write,
) -> Result<(), AppError> {
    let registry = sorting::registry();
    let ids = race_ids(&registry, algorithms);
    let input = settings.sort_input(settings.seed);
    let results = race::standings(&registry, &ids, &input)?;

    if json {
        serde_json::to_writer_pretty(&mut *out, &results)?;
        writeln!(out)?;
        return Ok(());
    }
    writeln!(
        out,
        "{} elements, seed {}",
        input.values.len(),
        settings.seed
    )?;
    for r in &results {
        write_standing(out, r)?;
    }
    Ok(())
}

fn run_live_race(
    algorithms: &[String],
    settings: &InputSettings,
    config: &Config,
    out: &mut impl Write,
) -> Result<(), AppError> {
    let registry = sorting::registry();
    let ids = race_ids(&registry, algorithms);
    let input = settings.sort_input(settings.seed);
    let mut race = Race::new(&registry, &ids, &input, &config.engine, MonotonicClock::new())?;

    writeln!(
        out,
        "{} elements, seed {}, {} racers",
        input.values.len(),
        settings.seed,
        race.racers().len()
    )?;
    out.flush()?;
    let frame = config.ui.frame_interval();
    play_race(&mut race, || thread::sleep(frame), out)?;
    Ok(())
}

/// Run `race` to the end, printing each racer as it finishes. `wait` is
/// called before every frame.
fn play_race(race: &mut Race, mut wait: impl FnMut(), out: &mut impl Write) -> io::Result<()> {
    if race.racers().is_empty() {
        return Ok(());
    }
    race.start();
    let mut announced = 0;
    while !race.is_finished() {
        wait();
        race.tick();
        for r in race.results() {
            if let Some(place) = r.place.filter(|p| *p > announced) {
                write_standing(out, &r)?;
                out.flush()?;
                announced = place;
            }
        }
    }
    Ok(())
}
