use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::Result;
use simtop::app::App;
use simtop::config::{self, load_config, load_config_from_path};
use simtop::event::{Event, EventHandler};
use simtop::ui;

#[derive(Parser)]
#[command(
    name = "simtop",
    about = "TUI sandbox that simulates process load and system health"
)]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Simulation tick rate in milliseconds
    #[arg(long)]
    tick_rate: Option<u64>,

    /// Seed for the random source (deterministic runs)
    #[arg(long)]
    seed: Option<u64>,

    /// Aggregation policy: sum, average, max
    #[arg(long)]
    aggregation: Option<String>,

    /// Disable automatic kill of the top process during critical overload
    #[arg(long, default_value_t = false)]
    no_auto_kill: bool,

    /// Start the simulation immediately
    #[arg(long, default_value_t = false)]
    autostart: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = load_config_for_cli(&cli);

    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    let result = run(&mut terminal, config, cli.seed).await;

    ratatui::restore();

    result
}

async fn run(
    terminal: &mut ratatui::DefaultTerminal,
    config: config::Config,
    seed: Option<u64>,
) -> Result<()> {
    let tick_rate = Duration::from_millis(config.general.tick_rate_ms);
    let mut app = App::new(config, seed);
    let mut events = EventHandler::new(tick_rate);

    terminal.draw(|frame| ui::draw(frame, &app))?;

    while app.running {
        if let Some(event) = events.next().await {
            let mut should_draw = false;
            match event {
                Event::Key(key) => {
                    if key.kind == crossterm::event::KeyEventKind::Press {
                        let action = app.map_key(key);
                        app.dispatch(action);
                        should_draw = true;
                    }
                }
                Event::Tick => {
                    should_draw = app.on_tick();
                }
                Event::Resize => {
                    should_draw = true;
                }
            }
            if should_draw {
                terminal.draw(|frame| ui::draw(frame, &app))?;
            }
        }
    }

    Ok(())
}

fn load_config_for_cli(cli: &Cli) -> config::Config {
    let mut config = match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    };

    if let Some(rate) = cli.tick_rate {
        config.general.tick_rate_ms = rate;
    }
    if let Some(ref policy) = cli.aggregation {
        config.general.default_aggregation = policy.clone();
    }
    if cli.no_auto_kill {
        config.general.auto_kill = false;
    }
    if cli.autostart {
        config.general.autostart = true;
    }

    config
}
