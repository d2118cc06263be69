use clap::Parser;
use eoka_codegen::{Generator, Library, Options, Recording};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "eoka-codegen")]
#[command(about = "Generate an automation script from a recorded browser session")]
#[command(version)]
struct Cli {
    /// Recording to convert (JSON array or JSON lines)
    recording: PathBuf,

    /// Options file (YAML)
    #[arg(short = 'c', long = "options", value_name = "FILE")]
    options: Option<PathBuf>,

    /// Target library (overrides options file)
    #[arg(short, long)]
    library: Option<Library>,

    /// Write the script here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Emit top-level code instead of an async entry point
    #[arg(long)]
    no_wrap: bool,

    /// Launch the browser with a visible window
    #[arg(long)]
    headful: bool,

    /// Do not wait for navigations
    #[arg(long)]
    no_wait_for_navigation: bool,

    /// Do not wait for selectors before clicking
    #[arg(long)]
    no_wait_for_selector: bool,

    /// Do not separate blocks with blank lines
    #[arg(long)]
    no_blank_lines: bool,

    /// Verbose output (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Report what would be generated without writing the script
    #[arg(long)]
    check: bool,

    /// Quiet mode (only errors)
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    /// Options file (or baseline) with command line overrides applied.
    fn options(&self) -> eoka_codegen::Result<Options> {
        let mut options = match self.options {
            Some(ref path) => Options::load(path)?,
            None => Options::default(),
        };
        if let Some(library) = self.library {
            options.library = library;
        }
        if self.no_wrap {
            options.wrap_async = false;
        }
        if self.headful {
            options.headless = false;
        }
        if self.no_wait_for_navigation {
            options.wait_for_navigation = false;
        }
        if self.no_wait_for_selector {
            options.wait_for_selector_on_click = false;
        }
        if self.no_blank_lines {
            options.blank_lines_between_blocks = false;
        }
        Ok(options)
    }
}

fn main() -> eoka_codegen::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = if cli.quiet {
        Level::ERROR
    } else {
        match cli.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            _ => Level::DEBUG,
        }
    };

    FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    let options = cli.options()?;
    let recording = Recording::load(&cli.recording)?;
    let generated = Generator::new(options).generate(&recording.events);

    if cli.check {
        println!("Recording: {}", cli.recording.display());
        println!("  Events: {}", recording.len());
        println!("  Blocks: {}", generated.blocks.len());
        println!("  Frames declared: {}", generated.frame_declarations());
        if !generated.skipped.is_empty() {
            println!("  Skipped: {}", generated.skipped.len());
            for skipped in &generated.skipped {
                println!(
                    "    - #{} {}: {}",
                    skipped.index, skipped.action, skipped.reason
                );
            }
        }
        return Ok(());
    }

    match cli.output {
        Some(ref path) => {
            std::fs::write(path, &generated.script)?;
            if !cli.quiet {
                eprintln!("Wrote {}", path.display());
            }
        }
        None => print!("{}", generated.script),
    }

    Ok(())
}
