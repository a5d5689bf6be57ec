use clap::{error::ErrorKind, CommandFactory, Parser, Subcommand, ValueEnum};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use hangman::{
    app::{App, Flow},
    app_dirs::AppDirs,
    calculator::{parse_keys, Calculator},
    categories::{Catalog, WordSource},
    config::{Config, ConfigStore, FileConfigStore},
    forms::{self, ContactMessage, Registration},
    game::GameSession,
    runtime::{CrosstermEventSource, EventSource, HangmanEvent, Runner},
    stats::ScoreStore,
    storage::FileStore,
    ui::ui,
    util::group_thousands,
    TICK_RATE_MS,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    fs::{self, OpenOptions},
    io::{self, stdin, BufRead, Write},
    path::{Path, PathBuf},
    sync::Mutex,
    time::Duration,
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding the log filter, e.g. `HANGMAN_LOG=debug`.
const LOG_ENV: &str = "HANGMAN_LOG";

/// hangman in the terminal, with per-category scores
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Guess the word letter by letter before the hangman is complete. Scores are kept per category between sessions."
)]
pub struct Cli {
    /// directory holding scores, form submissions and the log
    #[clap(long, global = true)]
    data_dir: Option<PathBuf>,

    /// config file to read scoring rules and the default category from
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    /// JSON file with categories to use instead of the built-in ones
    #[clap(long, global = true)]
    words: Option<PathBuf>,

    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
enum Command {
    /// play in the terminal (the default)
    Play {
        /// category to start with instead of the picker
        #[clap(short, long)]
        category: Option<String>,
    },
    /// print the score of every category
    Stats {
        /// write CSV to stdout instead of a table
        #[clap(long)]
        csv: bool,
    },
    /// reset the score of every category
    Reset {
        /// do not ask for confirmation
        #[clap(short, long)]
        yes: bool,
    },
    /// press calculator keys and print the display, e.g. `calc 12+3.5=`
    Calc {
        #[clap(required = true, allow_hyphen_values = true)]
        keys: Vec<String>,
    },
    /// leave a contact message
    Contact {
        #[clap(long)]
        name: String,
        #[clap(long)]
        email: String,
        #[clap(long, default_value = "")]
        phone: String,
        #[clap(long)]
        message: String,
    },
    /// register an account
    Register {
        #[clap(long)]
        name: String,
        #[clap(long)]
        email: String,
        #[clap(long)]
        password: String,
    },
    /// list stored form submissions
    Submissions {
        #[clap(value_enum)]
        form: Form,
    },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum, strum_macros::Display)]
enum Form {
    Contact,
    Register,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let Some(data_dir) = cli.data_dir.clone().or_else(AppDirs::data_dir) else {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "could not determine a data directory")
            .exit();
    };
    init_tracing(&data_dir);

    let config_store = cli
        .config
        .as_ref()
        .map_or_else(FileConfigStore::new, FileConfigStore::with_path);
    let config = config_store.load();
    tracing::debug!(path = %config_store.path().display(), ?config, "loaded config");

    let store = FileStore::new(&data_dir);

    match cli.command.clone().unwrap_or(Command::Play { category: None }) {
        Command::Play { category } => play(&cli, config, store, category),
        Command::Stats { csv } => print_stats(&cli, store, csv),
        Command::Reset { yes } => reset(&cli, config, store, yes),
        Command::Calc { keys } => {
            let buttons = parse_keys(&keys.join(" "))?;
            println!("{}", Calculator::new().press_all(buttons));
            Ok(())
        }
        Command::Contact {
            name,
            email,
            phone,
            message,
        } => {
            let mut store = store;
            let entry = forms::submit(
                &mut store,
                ContactMessage {
                    name,
                    email,
                    phone,
                    message,
                },
            )?;
            println!("Thanks {}, your message was saved.", entry.record.name);
            Ok(())
        }
        Command::Register {
            name,
            email,
            password,
        } => {
            let mut store = store;
            let entry = forms::submit(
                &mut store,
                Registration {
                    name,
                    email,
                    password,
                },
            )?;
            println!("Registered {} <{}>.", entry.record.name, entry.record.email);
            Ok(())
        }
        Command::Submissions { form } => print_submissions(&store, form),
    }
}

fn init_tracing(data_dir: &Path) {
    let env_filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    let log_path = AppDirs::log_path(data_dir);
    let file = fs::create_dir_all(data_dir).and_then(|_| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
    });

    match file {
        Ok(file) => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .with(env_filter)
                .init();
            tracing::info!(path = %log_path.display(), "logging initialized");
        }
        // stdout belongs to the TUI, so no log file means no logs
        Err(_) => tracing_subscriber::registry().with(env_filter).init(),
    }
}

fn load_catalog(cli: &Cli) -> Result<Catalog, Box<dyn Error>> {
    let catalog = match &cli.words {
        Some(path) => Catalog::from_path(path)?,
        None => Catalog::builtin()?,
    };
    tracing::debug!(categories = catalog.len(), "loaded word catalog");
    Ok(catalog)
}

fn new_session(cli: &Cli, config: &Config, store: FileStore) -> Result<GameSession, Box<dyn Error>> {
    Ok(GameSession::new(
        Box::new(load_catalog(cli)?),
        ScoreStore::new(Box::new(store)),
        config.scoring,
    ))
}

fn play(
    cli: &Cli,
    config: Config,
    store: FileStore,
    category: Option<String>,
) -> Result<(), Box<dyn Error>> {
    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let game = new_session(cli, &config, store)?;
    let category = category.or(config.default_category);
    let mut app = App::new(game, category.as_deref());

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let runner = Runner::new(
        CrosstermEventSource::new(),
        Duration::from_millis(TICK_RATE_MS),
    );
    let result = start_tui(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend, E: EventSource>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E>,
) -> Result<(), Box<dyn Error>> {
    terminal.draw(|f| ui(app, f))?;

    loop {
        match runner.step() {
            HangmanEvent::Key(key) => {
                if app.handle_key(key) == Flow::Quit {
                    break;
                }
                terminal.draw(|f| ui(app, f))?;
            }
            HangmanEvent::Resize => {
                terminal.draw(|f| ui(app, f))?;
            }
            HangmanEvent::Tick => {}
        }
    }

    tracing::info!("leaving the game");
    Ok(())
}

fn print_stats(cli: &Cli, store: FileStore, csv: bool) -> Result<(), Box<dyn Error>> {
    let catalog = load_catalog(cli)?;
    let board = ScoreStore::new(Box::new(store)).load()?;
    let rows = board.rows(&catalog);

    if csv {
        let mut writer = csv::Writer::from_writer(io::stdout());
        writer.write_record([
            "category",
            "totalPoints",
            "gamesPlayed",
            "gamesWon",
            "winRate",
            "averageScore",
        ])?;
        for row in &rows {
            let s = &row.stats;
            writer.write_record([
                row.category.clone(),
                s.total_points.to_string(),
                s.games_played.to_string(),
                s.games_won.to_string(),
                s.win_rate().to_string(),
                s.average_score.to_string(),
            ])?;
        }
        writer.flush()?;
        return Ok(());
    }

    let width = catalog
        .all_categories()
        .iter()
        .map(|c| c.name.len())
        .max()
        .unwrap_or(8)
        .max(8);
    println!(
        "{:<width$}  {:>8}  {:>6}  {:>4}  {:>8}  {:>7}",
        "Category", "Points", "Played", "Won", "Win rate", "Average"
    );
    for row in &rows {
        let s = &row.stats;
        println!(
            "{:<width$}  {:>8}  {:>6}  {:>4}  {:>7}%  {:>7}",
            row.category,
            group_thousands(s.total_points),
            s.games_played,
            s.games_won,
            s.win_rate(),
            s.average_score
        );
    }
    println!();
    println!("Total score: {}", group_thousands(board.total_points()));
    Ok(())
}

fn reset(cli: &Cli, config: Config, store: FileStore, yes: bool) -> Result<(), Box<dyn Error>> {
    let mut game = new_session(cli, &config, store)?;
    let events = game.reset_all_scores(|question| yes || confirm_on_stdin(question))?;
    if events.is_empty() {
        println!("Scores left untouched.");
    } else {
        println!("All scores were reset.");
    }
    Ok(())
}

fn confirm_on_stdin(question: &str) -> bool {
    print!("{question} [y/N] ");
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    match stdin().lock().read_line(&mut answer) {
        Ok(_) => matches!(answer.trim(), "y" | "Y" | "yes" | "Yes"),
        Err(_) => false,
    }
}

fn print_submissions(store: &FileStore, form: Form) -> Result<(), Box<dyn Error>> {
    let lines: Vec<String> = match form {
        Form::Contact => forms::list::<ContactMessage, _>(store)?
            .into_iter()
            .map(|e| {
                format!(
                    "{}  {} <{}> {}: {}",
                    e.submitted_label(),
                    e.record.name,
                    e.record.email,
                    e.record.phone,
                    e.record.message
                )
            })
            .collect(),
        Form::Register => forms::list::<Registration, _>(store)?
            .into_iter()
            .map(|e| {
                format!(
                    "{}  {} <{}>",
                    e.submitted_label(),
                    e.record.name,
                    e.record.email
                )
            })
            .collect(),
    };

    if lines.is_empty() {
        println!("No {form} submissions yet.");
    }
    for line in lines {
        println!("{line}");
    }
    Ok(())
}
