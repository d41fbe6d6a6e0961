use chrono::{DateTime, FixedOffset, Local};
use clap::{Parser, Subcommand};
use daily_moss::input::parse_line;
use daily_moss::loader::{FsImageLoader, ImageLoader};
use daily_moss::navigation::NavAction;
use daily_moss::session::{Session, Update};
use daily_moss::store::JsonFileStore;
use daily_moss::theme::Theme;
use daily_moss::view::Refresh;
use daily_moss::{check, config, gallery, output, streak};
use std::io::BufRead;
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "daily-moss")]
#[command(about = "A new moss every day")]
#[command(long_about = "\
A new moss every day

Each calendar date maps to one image of the gallery. Page back through
earlier days (never past day 1, never beyond today) and keep your streak of
consecutive daily visits going.

Browse keys (type one per line, then Enter):
  left  | h | prev     previous day
  right | l | next     next day
  reset | r | <Enter>  back to today
  theme | t            toggle light/dark
  swipe <from> <to>    horizontal swipe in pixels
  quit  | q

Run 'daily-moss gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Directory containing config.toml; relative gallery paths resolve here
    #[arg(long, default_value = ".", global = true)]
    config: PathBuf,

    /// Store file (overrides storage.path from config)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Pin the clock to an RFC 3339 instant, e.g. 2026-03-02T09:00:00+01:00.
    /// Dates are still read in the local zone (TZ)
    #[arg(long, global = true, value_parser = parse_instant)]
    now: Option<DateTime<FixedOffset>>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show today's moss (counts towards the streak)
    Today,
    /// Show the moss from a number of days ago
    Show {
        /// Days to step back from today; stops at day 1
        #[arg(long, default_value_t = 0)]
        back: u32,
    },
    /// Browse interactively, reading keys from stdin
    Browse,
    /// Print the stored streak without recording a visit
    Streak,
    /// Print the theme preference
    Theme {
        /// Switch between light and dark before printing
        #[arg(long)]
        toggle: bool,
    },
    /// Validate that every gallery image exists and decodes
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn parse_instant(s: &str) -> Result<DateTime<FixedOffset>, String> {
    DateTime::parse_from_rfc3339(s).map_err(|e| format!("invalid RFC 3339 instant: {e}"))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Command::GenConfig = cli.command {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let site_config = config::load_config(&cli.config)?;
    let store_path = cli
        .store
        .clone()
        .unwrap_or_else(|| cli.config.join(&site_config.storage.path));
    let mut store = JsonFileStore::open(&store_path);
    let pinned = cli.now;
    // Keep the real zone so day boundaries follow daylight-saving changes
    let clock = move || pinned.map_or_else(Local::now, |t| t.with_timezone(&Local));
    let loader = FsImageLoader::new(&cli.config);

    match cli.command {
        Command::Today => {
            let now = clock();
            let mut session = Session::start(&site_config, &mut store, &now);
            loader.preload(&session.preload_uris(&now));
            let refresh = session.refresh(&now);
            render(&mut session, &loader, refresh);
        }
        Command::Show { back } => {
            let now = clock();
            let mut session = Session::start(&site_config, &mut store, &now);
            let mut last = session.refresh(&now);
            for _ in 0..back {
                match session.navigate(NavAction::StepBack, &now) {
                    Update::Refreshed(refresh) => last = refresh,
                    _ => break,
                }
            }
            render(&mut session, &loader, last);
        }
        Command::Browse => {
            let now = clock();
            let mut session = Session::start(&site_config, &mut store, &now);
            loader.preload(&session.preload_uris(&now));
            let refresh = session.refresh(&now);
            render(&mut session, &loader, refresh);

            for line in std::io::stdin().lock().lines() {
                let line = line?;
                let event = match parse_line(&line) {
                    Ok(Some(event)) => event,
                    Ok(None) => break,
                    Err(token) => {
                        eprintln!("unrecognized input: {token}");
                        continue;
                    }
                };
                match session.handle_event(event, &clock(), &mut store) {
                    Update::Refreshed(refresh) => render(&mut session, &loader, refresh),
                    Update::ThemeChanged(theme) => output::print_theme(theme),
                    Update::Unchanged => {}
                }
            }
        }
        Command::Streak => {
            output::print_streak(streak::load_record(&store).as_ref());
        }
        Command::Theme { toggle } => {
            let mut theme = Theme::load(&store);
            if toggle {
                theme = theme.toggled();
                theme.save(&mut store)?;
            }
            output::print_theme(theme);
        }
        Command::Check => {
            let gallery = gallery::Gallery::from_config(&site_config.gallery);
            let dir = cli.config.join(gallery.root());
            let report = check::check_gallery(&gallery, &dir)?;
            output::print_check_report(gallery.root(), &report);
            if !report.is_ok() {
                return Err("gallery check failed".into());
            }
        }
        // Printed before loading config
        Command::GenConfig => {}
    }

    Ok(())
}

/// Load the requested image, apply the completion and print the result.
fn render(session: &mut Session, loader: &impl ImageLoader, refresh: Refresh) {
    let outcome = loader.load(&refresh.request.uri);
    session.complete_image(refresh.request.ticket, &outcome);
    if let Some(state) = session.state() {
        output::print_display(state);
    }
}
