//! MTG Goldfish - Main Binary
//!
//! Plays a deck against an opponent who does nothing and reports how fast it
//! kills.

use clap::{Parser, Subcommand};
use mtg_goldfish::{
    catalog::Catalog,
    config::SimulationConfig,
    game::{GameLoop, GameState, OutputFormat, Policy, Status, VerbosityLevel},
    loader::{Deck, DeckLoader},
    trials::{run_trials, trial_seed, TrialOptions},
    Result,
};
use std::path::PathBuf;

/// Verbosity level for game output (custom parser supporting both names and numbers)
#[derive(Debug, Clone, Copy)]
struct VerbosityArg(VerbosityLevel);

impl std::str::FromStr for VerbosityArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityArg(VerbosityLevel::Silent)),
            "minimal" | "1" => Ok(VerbosityArg(VerbosityLevel::Minimal)),
            "normal" | "2" => Ok(VerbosityArg(VerbosityLevel::Normal)),
            "verbose" | "3" => Ok(VerbosityArg(VerbosityLevel::Verbose)),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

impl From<VerbosityArg> for VerbosityLevel {
    fn from(arg: VerbosityArg) -> Self {
        arg.0
    }
}

/// Options shared by both subcommands
#[derive(clap::Args, Debug)]
struct CommonArgs {
    /// Deck file (.dck); defaults to a built-in deck
    #[arg(long, short = 'd', value_name = "DECK_FILE")]
    deck: Option<PathBuf>,

    /// Built-in deck to use when no deck file is given
    #[arg(long, default_value = "mardu warriors")]
    builtin: String,

    /// JSON simulation config (life totals, hand sizes, look-ahead limit)
    #[arg(long, value_name = "CONFIG_FILE")]
    config: Option<PathBuf>,

    /// Main-phase policy
    #[arg(long, value_enum, default_value = "greedy")]
    policy: Policy,

    /// Master random seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Start on the draw instead of on the play
    #[arg(long)]
    on_the_draw: bool,
}

impl CommonArgs {
    fn load(&self, catalog: &Catalog) -> Result<(Deck, SimulationConfig)> {
        let deck = match &self.deck {
            Some(path) => DeckLoader::load_deck(path, catalog)?,
            None => catalog.builtin_deck(&self.builtin)?,
        };
        let mut config = match &self.config {
            Some(path) => SimulationConfig::from_json_file(path)?,
            None => SimulationConfig::default(),
        };
        if self.on_the_draw {
            config.play_first = false;
        }
        config.validate(deck.total_cards())?;
        Ok((deck, config))
    }
}

#[derive(Parser)]
#[command(name = "goldfish")]
#[command(about = "MTG Goldfish - turns-to-kill simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play games one at a time, printing the board every turn
    Play {
        #[command(flatten)]
        common: CommonArgs,

        /// Number of games to play
        #[arg(long, short = 'g', default_value_t = 1)]
        games: usize,

        /// Verbosity level for game output (0=silent, 1=minimal, 2=normal, 3=verbose)
        #[arg(long, default_value = "normal", short = 'v')]
        verbosity: VerbosityArg,

        /// Format of game event lines
        #[arg(long, value_enum, default_value = "text")]
        log_format: OutputFormat,

        /// Write the final state of the last game as JSON
        #[arg(long, value_name = "FILE")]
        dump_state: Option<PathBuf>,
    },

    /// Run many silent games in parallel and report turn statistics
    Stats {
        #[command(flatten)]
        common: CommonArgs,

        /// Number of games to simulate
        #[arg(long, short = 'n', default_value_t = 10_000)]
        trials: usize,

        /// Worker threads (default: one per core)
        #[arg(long, short = 'j')]
        threads: Option<usize>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let catalog = Catalog::new();

    match cli.command {
        Commands::Play {
            common,
            games,
            verbosity,
            log_format,
            dump_state,
        } => run_play(&catalog, &common, games, verbosity.into(), log_format, dump_state),
        Commands::Stats {
            common,
            trials,
            threads,
            json,
        } => run_stats(&catalog, &common, trials, threads, json),
    }
}

fn run_play(
    catalog: &Catalog,
    common: &CommonArgs,
    games: usize,
    verbosity: VerbosityLevel,
    log_format: OutputFormat,
    dump_state: Option<PathBuf>,
) -> Result<()> {
    let (deck, config) = common.load(catalog)?;
    println!("=== MTG Goldfish: {} ({} cards, {} policy) ===", deck.name, deck.total_cards(), common.policy);

    // Boards are plain text, so they are left out of JSON event streams
    let show_boards = verbosity >= VerbosityLevel::Normal && log_format == OutputFormat::Text;

    let mut last_game = None;
    for index in 0..games {
        let mut game = GameState::with_seed(&deck, &config, trial_seed(common.seed, index));
        game.logger.set_output_format(log_format);
        println!("\n--- Game {} ---", index + 1);
        if show_boards {
            print!("{game}");
        }

        let status = {
            let mut game_loop = GameLoop::new(&mut game, common.policy, &config).with_verbosity(verbosity);
            loop {
                let status = game_loop.play_one_turn();
                if show_boards {
                    print!("{}", game_loop.game);
                }
                if status.is_terminal() {
                    break status;
                }
            }
        };

        match status {
            Status::Win => println!("Won on turn {}", game.turn),
            other => println!("Game ended on turn {}: {other}", game.turn),
        }
        last_game = Some(game);
    }

    if let (Some(path), Some(game)) = (dump_state, last_game) {
        let json = serde_json::to_string_pretty(&game)?;
        std::fs::write(&path, json)?;
        println!("Final state written to {}", path.display());
    }
    Ok(())
}

fn run_stats(catalog: &Catalog, common: &CommonArgs, trials: usize, threads: Option<usize>, json: bool) -> Result<()> {
    let (deck, config) = common.load(catalog)?;
    let options = TrialOptions {
        trials,
        seed: common.seed,
        policy: common.policy,
        threads,
        config,
    };

    let report = run_trials(&deck, &options)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("=== {} / {} policy / seed {} ===", deck.name, options.policy, options.seed);
        print!("{report}");
    }
    Ok(())
}
