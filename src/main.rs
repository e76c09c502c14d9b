use std::io::{self, BufRead, Write};

use clap::{Parser, ValueEnum};
use env_logger::Env;
use log::{info, warn};

use grid_2048::engine::Engine;
use grid_2048::input::{self, Command};
use grid_2048::session::{Session, SpawnRule};

#[derive(Parser, Debug)]
#[command(name = "grid-2048", about = "Slide and merge tiles on a 4x4 grid")]
struct Args {
    /// Seed for tile spawns (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Commands to play instead of reading stdin, e.g. "w a s d"
    #[arg(long)]
    script: Option<String>,

    /// Only spawn a tile when the move changed the grid
    #[arg(long, default_value_t = false)]
    strict_spawn: bool,

    /// How to render the game
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Render only the final state
    #[arg(long, default_value_t = false)]
    quiet: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    /// One JSON snapshot per line
    Json,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let engine = match args.seed {
        Some(seed) => Engine::new(seed),
        None => Engine::from_entropy(),
    };
    let rule = if args.strict_spawn { SpawnRule::OnChange } else { SpawnRule::Always };
    let mut session = Session::new(engine, rule);
    info!("new game (seed {:?}, spawn rule {:?})", args.seed, session.rule());

    let mut out = io::stdout().lock();
    if !args.quiet {
        render(&mut out, &session, args.format)?;
    }

    match &args.script {
        Some(script) => {
            for cmd in input::parse_script(script)? {
                if !apply(&mut session, cmd) {
                    break;
                }
                if !args.quiet {
                    render(&mut out, &session, args.format)?;
                }
            }
        }
        None => {
            for line in io::stdin().lock().lines() {
                let line = line?;
                let cmd = match line.parse::<Command>() {
                    Ok(cmd) => cmd,
                    Err(e) => {
                        warn!("{e}");
                        continue;
                    }
                };
                if !apply(&mut session, cmd) {
                    break;
                }
                if !args.quiet {
                    render(&mut out, &session, args.format)?;
                }
            }
        }
    }

    if args.quiet {
        render(&mut out, &session, args.format)?;
    }
    Ok(())
}

/// Run one command against the session. Returns false on quit.
fn apply(session: &mut Session, cmd: Command) -> bool {
    match cmd {
        Command::Move(direction) => {
            session.play(direction);
        }
        Command::Restart => session.restart(),
        Command::Quit => return false,
    }
    true
}

fn render<W: Write>(out: &mut W, session: &Session, format: Format) -> io::Result<()> {
    match format {
        Format::Text => {
            let engine = session.engine();
            writeln!(out, "{}", engine.grid())?;
            writeln!(out, "Score: {}", engine.score())?;
            if session.is_over() {
                writeln!(out, "Game over! Type 'restart' to play again or 'quit' to leave.")?;
            }
        }
        Format::Json => {
            let line = serde_json::to_string(&session.snapshot()).map_err(io::Error::other)?;
            writeln!(out, "{line}")?;
        }
    }
    out.flush()
}
