//! `emojipick` - terminal emoji picker
//!
//! Opens a searchable emoji grid. Picking an emoji restores the terminal
//! and prints the glyph on stdout, so it composes with shell pipelines.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin emojipick
//! cargo run --bin emojipick -- --light --query heart
//! cargo run --bin emojipick -- --headless-smoke
//! emojipick | xclip -selection clipboard
//! ```
//!
//! Press Esc to clear the search or quit, Ctrl+C or Ctrl+Q to quit.

use emojipick::buffer::{FrameBuffer, Rect};
use emojipick::glyph_pool::GlyphPool;
use emojipick::input::{Event, InputParser, KeyEvent};
use emojipick::renderer::HitGrid;
use emojipick::terminal::{is_tty, set_stdin_nonblocking, terminal_size};
use emojipick::{
    ColorMode, Dataset, EmojiPicker, PickerOptions, PickerOutcome, Renderer, RendererOptions,
    ThemeMode,
};
use std::ffi::OsString;
use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

// ============================================================================
// CLI Parsing
// ============================================================================

const HELP_TEXT: &str = "emojipick - searchable terminal emoji picker

USAGE:
    emojipick [OPTIONS]

OPTIONS:
    -h, --help              Print this help message and exit
    --dark                  Dark palette (default)
    --light                 Light palette
    --size <WxH>            Widget size in cells (default: 44x24)
    --query <TEXT>          Start with a search query
    --seed <N>              Seed for hover colors (default: random)

    --config <FILE>         Load picker options from JSON; flags override it
    --data <FILE>           Load the emoji dataset from JSON

    --no-mouse              Disable mouse tracking
    --no-alt-screen         Don't enter alternate screen
    --colors <MODE>         Color output: truecolor, 256, 16, none
                            (default: truecolor)

    --headless-smoke        Run headless smoke test (no TTY required)

    --log-file <FILE>       Write logs to FILE
    --log-level <LEVEL>     trace, debug, info, warn, error (default: info)

KEYS:
    type to search, Backspace/Ctrl+U to edit, Esc to clear or quit
    arrows/PgUp/PgDn/Home/End scroll, Tab/Shift+Tab switch category
    Enter picks the hovered emoji or the first search result

EXAMPLES:
    emojipick                           # Interactive mode
    emojipick --light --query party     # Light theme, pre-filtered
    emojipick --headless-smoke          # CI smoke test
";

/// Frame pacing for the interactive loop.
const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Application configuration parsed from command-line arguments.
#[derive(Clone, Debug)]
#[allow(clippy::struct_excessive_bools)] // Config naturally has many boolean flags
pub struct Config {
    // Picker
    pub theme: Option<ThemeMode>,
    pub size: Option<(u32, u32)>,
    pub query: Option<String>,
    pub seed: Option<u64>,

    // Files
    pub config_path: Option<PathBuf>,
    pub data_path: Option<PathBuf>,

    // Renderer options
    pub enable_mouse: bool,
    pub use_alt_screen: bool,
    pub color_mode: ColorMode,

    // Headless/testing
    pub headless_smoke: bool,

    // Logging
    pub log_file: Option<PathBuf>,
    pub log_level: tracing::Level,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: None,
            size: None,
            query: None,
            seed: None,
            config_path: None,
            data_path: None,
            enable_mouse: true,
            use_alt_screen: true,
            color_mode: ColorMode::TrueColor,
            headless_smoke: false,
            log_file: None,
            log_level: tracing::Level::INFO,
        }
    }
}

/// Result of CLI parsing.
pub enum ParseResult {
    /// Successfully parsed configuration.
    Config(Config),
    /// User requested help.
    Help,
    /// Parse error with message.
    Error(String),
}

/// Pull the value following `flag`, or describe what is missing.
fn flag_value(args: &mut impl Iterator<Item = OsString>, flag: &str) -> Result<String, String> {
    args.next()
        .map(|v| v.to_string_lossy().to_string())
        .ok_or_else(|| format!("{flag} requires a value"))
}

impl Config {
    /// Parse configuration from command-line arguments.
    pub fn from_args<I>(args: I) -> ParseResult
    where
        I: IntoIterator<Item = OsString>,
    {
        match Self::parse(args) {
            Ok(Some(config)) => ParseResult::Config(config),
            Ok(None) => ParseResult::Help,
            Err(msg) => ParseResult::Error(msg),
        }
    }

    fn parse<I>(args: I) -> Result<Option<Self>, String>
    where
        I: IntoIterator<Item = OsString>,
    {
        let mut config = Self::default();
        let mut args = args.into_iter();

        // Skip program name
        args.next();

        while let Some(arg) = args.next() {
            let arg_str = arg.to_string_lossy();

            match arg_str.as_ref() {
                "-h" | "--help" => return Ok(None),

                "--dark" => config.theme = Some(ThemeMode::Dark),
                "--light" => config.theme = Some(ThemeMode::Light),

                "--size" => {
                    let value = flag_value(&mut args, "--size")?;
                    config.size = Some(parse_size(&value).ok_or_else(|| {
                        format!("Invalid --size: {value} (use WxH format, e.g., 44x24)")
                    })?);
                }

                "--query" => config.query = Some(flag_value(&mut args, "--query")?),

                "--seed" => {
                    let value = flag_value(&mut args, "--seed")?;
                    config.seed = Some(
                        value
                            .parse::<u64>()
                            .map_err(|_| format!("Invalid --seed value: {value}"))?,
                    );
                }

                "--config" => config.config_path = Some(flag_value(&mut args, "--config")?.into()),
                "--data" => config.data_path = Some(flag_value(&mut args, "--data")?.into()),

                "--no-mouse" => config.enable_mouse = false,
                "--no-alt-screen" => config.use_alt_screen = false,

                "--colors" => {
                    let value = flag_value(&mut args, "--colors")?;
                    config.color_mode = value.parse::<ColorMode>().map_err(|e| {
                        format!("Invalid --colors: {e} (valid: truecolor, 256, 16, none)")
                    })?;
                }

                "--headless-smoke" => config.headless_smoke = true,

                "--log-file" => config.log_file = Some(flag_value(&mut args, "--log-file")?.into()),
                "--log-level" => {
                    let value = flag_value(&mut args, "--log-level")?;
                    config.log_level = value
                        .parse::<tracing::Level>()
                        .map_err(|_| format!("Invalid --log-level: {value}"))?;
                }

                other => {
                    if other.starts_with('-') {
                        return Err(format!("Unknown option: {other}"));
                    }
                    return Err(format!("Unexpected argument: {other}"));
                }
            }
        }

        Ok(Some(config))
    }

    /// Picker options: the config file if any, then flag overrides.
    pub fn picker_options(&self) -> emojipick::Result<PickerOptions> {
        let mut options = match &self.config_path {
            Some(path) => PickerOptions::from_path(path)?,
            None => PickerOptions {
                hover_seed: clock_seed(),
                ..PickerOptions::default()
            },
        };
        if let Some(theme) = self.theme {
            options.theme = theme;
        }
        if let Some((width, height)) = self.size {
            options.width = width;
            options.height = height;
        }
        if let Some(seed) = self.seed {
            options.hover_seed = seed;
        }
        options.validate()?;
        Ok(options)
    }

    /// Get renderer options from config.
    #[must_use]
    pub fn renderer_options(&self) -> RendererOptions {
        RendererOptions {
            use_alt_screen: self.use_alt_screen,
            enable_mouse: self.enable_mouse,
            color_mode: self.color_mode,
            ..RendererOptions::default()
        }
    }
}

/// Parse a size string like "44x24" into (width, height).
fn parse_size(s: &str) -> Option<(u32, u32)> {
    let (w, h) = s.split_once('x')?;
    let w = w.parse::<u32>().ok()?;
    let h = h.parse::<u32>().ok()?;
    if w == 0 || h == 0 {
        return None;
    }
    Some((w, h))
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_nanos() as u64)
}

// ============================================================================
// Entry Point
// ============================================================================

fn main() -> io::Result<()> {
    let config = match Config::from_args(std::env::args_os()) {
        ParseResult::Config(config) => config,
        ParseResult::Help => {
            print!("{HELP_TEXT}");
            return Ok(());
        }
        ParseResult::Error(msg) => {
            eprintln!("Error: {msg}");
            eprintln!("Run with --help for usage information.");
            std::process::exit(1);
        }
    };

    if let Err(err) = init_logging(&config) {
        eprintln!("Error: cannot open log file: {err}");
        std::process::exit(1);
    }

    let result = if config.headless_smoke {
        run_headless_smoke(&config)
    } else {
        run_interactive(&config)
    };
    if let Err(err) = result {
        tracing::error!(%err, "emojipick failed");
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
    Ok(())
}

/// Install a file subscriber; stdout belongs to the picker.
fn init_logging(config: &Config) -> io::Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = File::create(path)?;
    let _ = tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_ansi(false)
        .with_target(true)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}

fn load_dataset(config: &Config) -> emojipick::Result<Dataset> {
    match &config.data_path {
        Some(path) => Dataset::from_path(path),
        None => Ok(Dataset::builtin().clone()),
    }
}

// ============================================================================
// Headless Smoke Test
// ============================================================================

/// Render, search and select without a terminal.
fn run_headless_smoke(config: &Config) -> emojipick::Result<()> {
    let dataset = load_dataset(config)?;
    let options = config.picker_options()?;
    let (width, height) = (options.width, options.height);
    eprintln!("Running headless smoke test ({width}x{height})...");

    let mut buffer = FrameBuffer::new(width, height);
    let mut pool = GlyphPool::new();
    let mut hits = HitGrid::new(width, height);
    let area = Rect::new(0, 0, width, height);
    let mut picker = EmojiPicker::new(&dataset, options)?;

    picker.render(&mut buffer, &mut pool, &mut hits, area);
    let header = buffer.row_text(&pool, picker.regions().map_or(0, |r| r.grid.y));

    let query = config.query.as_deref().unwrap_or("smile");
    for c in query.chars() {
        picker.handle_event(&Event::Key(KeyEvent::char(c)));
    }
    hits.clear();
    picker.render(&mut buffer, &mut pool, &mut hits, area);
    let results = picker.results_len();
    let outcome = picker.handle_event(&Event::Key(KeyEvent::key(emojipick::KeyCode::Enter)));

    eprintln!("  Records: {}", dataset.len());
    eprintln!("  First header: {}", header.trim());
    eprintln!("  Query {query:?}: {results} results");
    let PickerOutcome::Selected(emoji) = outcome else {
        eprintln!("Headless smoke test FAILED: Enter selected nothing");
        return Err(io::Error::other(format!("query {query:?} selected nothing")).into());
    };
    eprintln!("  Selected: {emoji}");
    eprintln!("Headless smoke test PASSED");
    Ok(())
}

// ============================================================================
// Interactive Mode
// ============================================================================

/// Center the widget on the screen, shrinking it to fit.
fn widget_area(options: &PickerOptions, screen: (u32, u32)) -> Rect {
    let width = options.width.min(screen.0);
    let height = options.height.min(screen.1);
    Rect::new((screen.0 - width) / 2, (screen.1 - height) / 2, width, height)
}

/// Run interactive mode with terminal.
fn run_interactive(config: &Config) -> emojipick::Result<()> {
    if !is_tty(&io::stdin()) {
        eprintln!("Error: stdin is not a terminal");
        eprintln!();
        eprintln!("emojipick requires an interactive terminal to run.");
        eprintln!("For non-interactive use, try: emojipick --headless-smoke");
        std::process::exit(1);
    }

    let dataset = load_dataset(config)?;
    let options = config.picker_options()?;
    let mut picker = EmojiPicker::new(&dataset, options)?;
    if let Some(query) = &config.query {
        picker.set_query(query);
    }

    // Determine terminal size, fall back to 80x24.
    let (cols, rows) = terminal_size().unwrap_or((80, 24));
    let mut screen = (u32::from(cols), u32::from(rows));
    let mut renderer = Renderer::new_with_options(
        io::stdout(),
        screen.0,
        screen.1,
        config.renderer_options(),
    )?;
    let nonblocking = set_stdin_nonblocking()?;

    let mut parser = InputParser::new();
    let mut input_buf = [0u8; 1024];
    let mut selected = None;

    'frames: loop {
        let frame_start = Instant::now();

        // --- Input phase ---
        let events = match io::stdin().read(&mut input_buf) {
            Ok(n) if n > 0 => parser.feed(&input_buf[..n]),
            Ok(_) => Vec::new(),
            Err(err) if err.kind() == io::ErrorKind::WouldBlock => parser.flush(),
            Err(err) => return Err(err.into()),
        };

        for event in &events {
            if let Event::Key(key) = event {
                if key.is_ctrl('c') || key.is_ctrl('q') {
                    break 'frames;
                }
            }
            if let Event::Resize { width, height } = event {
                screen = (u32::from(*width), u32::from(*height));
                renderer.resize(screen.0, screen.1)?;
            }
            match picker.handle_event(event) {
                PickerOutcome::Continue => {}
                PickerOutcome::Selected(emoji) => {
                    selected = Some(emoji);
                    break 'frames;
                }
                PickerOutcome::Dismissed => break 'frames,
            }
        }

        // --- Update phase ---
        if let Ok((cols, rows)) = terminal_size() {
            let current = (u32::from(cols), u32::from(rows));
            if current != screen {
                screen = current;
                renderer.resize(screen.0, screen.1)?;
            }
        }
        picker.tick(frame_start);

        // --- Render phase ---
        let area = widget_area(picker.options(), screen);
        picker.draw(renderer.frame(), area);

        // --- Present ---
        renderer.present()?;

        // --- Frame pacing ---
        if let Some(remaining) = FRAME_DURATION.checked_sub(frame_start.elapsed()) {
            std::thread::sleep(remaining);
        }
    }

    renderer.cleanup()?;
    drop(renderer);
    drop(nonblocking);
    if let Some(emoji) = selected {
        println!("{emoji}");
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
