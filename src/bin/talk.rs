use anyhow::Result;
use clap::Parser;
use dotenvy::dotenv;
use log::debug;
use tokio::time::{sleep, Duration};

use llm_talks::core::{Config, DEFAULT_MODEL};
use llm_talks::DialogueOrchestrator;

/// LLM Talks: two AIs discussing a topic
#[derive(Parser, Debug)]
#[command(name = "talk")]
#[command(version, about, long_about = None)]
struct Cli {
    /// The topic for discussion
    #[arg(long, default_value = "The future of Artificial General Intelligence")]
    topic: String,

    /// Number of turns for the conversation
    #[arg(long, default_value_t = 5)]
    turns: u32,

    /// Model A name
    #[arg(long, env = "MODEL_A_NAME", default_value = DEFAULT_MODEL)]
    model_a: String,

    /// Model B name
    #[arg(long, env = "MODEL_B_NAME", default_value = DEFAULT_MODEL)]
    model_b: String,

    /// Pause between turns, in milliseconds
    #[arg(long, default_value_t = 1000)]
    delay_ms: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level)).init();

    let conf_a = config.participant_a.with_model(cli.model_a);
    let conf_b = config.participant_b.with_model(cli.model_b);

    println!("Topic: {}\n", cli.topic);
    println!("Model A: {} (URL: {})", conf_a.model, conf_a.base_url);
    println!("Model B: {} (URL: {})", conf_b.model, conf_b.base_url);
    println!("{}", "-".repeat(50));

    let mut dialogue = DialogueOrchestrator::new(&cli.topic, &conf_a, &conf_b)?;

    if let Some(opening) = dialogue.history().first() {
        println!("{}: {}", opening.speaker(), opening.text());
    }

    for turn in 1..=cli.turns {
        println!("\n--- Turn {turn} ---");
        println!("{} is thinking...", dialogue.active().label());

        let message = dialogue.advance_turn().await?;
        println!("{}: {}", message.speaker(), message.text());

        if turn < cli.turns {
            debug!("Sleeping {}ms before next turn", cli.delay_ms);
            sleep(Duration::from_millis(cli.delay_ms)).await;
        }
    }

    println!("\nConversation finished.");
    Ok(())
}
