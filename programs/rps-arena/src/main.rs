use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use dialoguer::{Confirm, Input, Select};
use rps_arena::{logging, ArenaConfig, RoundRecord, RpsController, Statistics};
use rps_logic::{Move, Outcome, SeededRng};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON record file
    #[arg(long)]
    dataset: Option<PathBuf>,
    /// Selector mode: "learning" (or "1") or "random" (or "2", "3")
    #[arg(long)]
    mode: Option<String>,
    /// RNG seed for reproducible sessions
    #[arg(long)]
    seed: Option<u64>,
    /// Training passes per retrain
    #[arg(long)]
    epochs: Option<u32>,
    #[arg(long)]
    learning_rate: Option<f32>,
    /// Hidden layer width
    #[arg(long)]
    hidden: Option<usize>,
    /// Most recent training examples to fit, 0 for all
    #[arg(long)]
    max_examples: Option<usize>,
    #[arg(long)]
    log_level: Option<String>,
    #[arg(long)]
    log_dir: Option<PathBuf>,
    /// Do not write a log file
    #[arg(long)]
    no_log_file: bool,
    /// Print statistics as JSON and exit
    #[arg(long)]
    stats: bool,
    /// Play this many random rounds without prompting
    #[arg(long)]
    demo: Option<u32>,
}

impl Args {
    fn config(&self) -> ArenaConfig {
        let mut config = ArenaConfig::default();
        if let Some(dataset) = &self.dataset {
            config.dataset = dataset.clone();
        }
        if let Some(mode) = &self.mode {
            config.mode = mode.clone();
        }
        if let Some(epochs) = self.epochs {
            config.trainer.epochs = epochs;
        }
        if let Some(lr) = self.learning_rate {
            config.trainer.learning_rate = lr;
        }
        if let Some(hidden) = self.hidden {
            config.trainer.hidden = hidden;
        }
        if let Some(max) = self.max_examples {
            config.trainer.max_examples = max;
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        if let Some(dir) = &self.log_dir {
            config.log_dir = Some(dir.clone());
        }
        if self.no_log_file {
            config.log_dir = None;
        }
        config
    }
}

const MENU: [&str; 6] = ["rock", "scissors", "paper", "statistics", "switch mode", "quit"];

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = args.config();
    logging::init(config.level(), config.log_dir.as_deref()).context("initialize logger")?;

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut controller = RpsController::new(config, seed).context("start session")?;

    if args.stats {
        println!("{}", serde_json::to_string_pretty(&controller.statistics())?);
        return Ok(());
    }
    if let Some(rounds) = args.demo {
        return demo(&mut controller, rounds, seed);
    }

    interactive(&mut controller)
}

fn interactive(controller: &mut RpsController) -> anyhow::Result<()> {
    println!("Rock, scissors, paper. The computer is watching your habits.");
    loop {
        let choice = Select::new()
            .with_prompt("Your move")
            .items(&MENU)
            .default(0)
            .interact()?;

        match MENU[choice] {
            "statistics" => print_statistics(&controller.statistics()),
            "switch mode" => {
                let id: String = Input::new()
                    .with_prompt("Mode (learning, random)")
                    .interact_text()?;
                match controller.change_mode(&id) {
                    Ok(()) => println!("Now playing in mode {}", controller.mode()),
                    Err(e) => println!("{}", e),
                }
            }
            "quit" => break,
            player => {
                let record = controller.play_round(player)?;
                print_round(&record);
                if let Err(e) = controller.save_round() {
                    println!("This round was not recorded: {}", e);
                }
                let again = Confirm::new()
                    .with_prompt("Play again?")
                    .default(true)
                    .interact()?;
                controller.new_round()?;
                if !again {
                    break;
                }
            }
        }
    }

    print_statistics(&controller.statistics());
    Ok(())
}

/// Non-interactive session with random player moves
fn demo(controller: &mut RpsController, rounds: u32, seed: u64) -> anyhow::Result<()> {
    let mut player = SeededRng::new(seed ^ 0xdead_beef);
    for i in 1..=rounds {
        let m: Move = player.next_move();
        let record = controller.play_round(m.as_str())?;
        print_round(&record);
        if let Err(e) = controller.save_round() {
            log::warn!("round {} not recorded: {}", i, e);
        }
        controller.new_round()?;

        if i % 5 == 0 {
            let stats = controller.statistics();
            println!(
                "after {} rounds: {} games on record, computer win rate {}%",
                i, stats.total_games, stats.computer_win_rate
            );
        }
    }

    println!("{}", serde_json::to_string_pretty(&controller.processor_info())?);
    print_statistics(&controller.statistics());
    Ok(())
}

fn print_round(record: &RoundRecord) {
    let verdict = match record.result {
        Outcome::UserWin => "You win!",
        Outcome::ComputerWin => "Computer wins!",
        Outcome::Draw => "Draw!",
    };
    println!(
        "You: {}  Computer: {}  {}",
        record.user_choice, record.computer_choice, verdict
    );
}

fn print_statistics(stats: &Statistics) {
    println!("games played   {}", stats.total_games);
    println!("computer wins  {} ({}%)", stats.computer_wins, stats.computer_win_rate);
    println!("your wins      {} ({}%)", stats.user_wins, stats.user_win_rate);
    println!("draws          {} ({}%)", stats.draws, stats.draw_rate);
    println!("mode           {} ({})", stats.processor_mode, stats.processor_type);
}
