//! Headless CLI for mood detection and the downstream companion services.
//!
//! Camera mode needs a frame source and a face classifier backend supplied
//! by an embedding application, so the CLI covers the text, manual, music,
//! and chat surfaces.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use vibefy::chat::{greeting_for, ChatMessage, CompanionClient};
use vibefy::config::Config;
use vibefy::emotion::{manual_entry, HfTextClassifier, TextMoodAnalyzer};
use vibefy::mood::{Mood, MoodSample};
use vibefy::music::MusicCatalog;

/// Mood-adaptive companion: detect a mood, then chat or get music for it
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze free-form text for its emotional content
    Text {
        /// How you're feeling, in your own words
        text: String,
    },
    /// Assert a mood directly
    Manual {
        /// One of: joy, sadness, anger, fear, disgust, surprise, neutral
        mood: String,
        /// Self-reported intensity in [0.0, 1.0] (default 1.0)
        #[arg(long)]
        intensity: Option<f32>,
    },
    /// Recommend tracks for a mood
    Music {
        /// One of: joy, sadness, anger, fear, disgust, surprise, neutral
        mood: String,
        /// Number of tracks
        #[arg(long, default_value = "5")]
        count: usize,
    },
    /// One companion exchange for the given mood
    Chat {
        /// One of: joy, sadness, anger, fear, disgust, surprise, neutral
        mood: String,
        /// What you want to say
        message: String,
    },
}

fn parse_mood(raw: &str) -> Result<Mood> {
    raw.parse::<Mood>()
        .map_err(|e| anyhow::anyhow!("{} (expected one of: joy, sadness, anger, fear, disgust, surprise, neutral)", e))
}

fn print_sample(sample: &MoodSample) {
    println!(
        "mood: {} (confidence {:.0}%)",
        sample.mood,
        sample.confidence * 100.0
    );
    println!("{}", sample.mood.description());
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let config = Config::load_or_default();

    match args.command {
        Command::Text { text } => {
            info!("Analyzing text ({} chars)", text.len());
            let classifier = HfTextClassifier::new(&config.text_api_url)
                .map_err(|e| anyhow::anyhow!("failed to build classifier: {}", e))?;
            let analyzer = TextMoodAnalyzer::with_options(
                classifier,
                config.text_token(),
                config.detector_options(),
            );
            let sample = analyzer.analyze(&text).await;
            if !sample.is_signal() {
                eprintln!("No clear emotional signal; defaulting to neutral.");
                if config.text_token().is_none() {
                    eprintln!(
                        "Hint: no API token configured (set {} or text_api_token in config).",
                        vibefy::config::TEXT_TOKEN_ENV
                    );
                }
            }
            print_sample(&sample);
        }

        Command::Manual { mood, intensity } => {
            let sample = manual_entry(parse_mood(&mood)?, intensity);
            print_sample(&sample);
        }

        Command::Music { mood, count } => {
            let mood = parse_mood(&mood)?;
            let catalog = MusicCatalog::default();
            println!("Tracks for {}:", mood);
            for track in catalog.recommend(mood, count) {
                println!("  - {} ({})", track.title, track.description);
                println!("    https://www.youtube.com/watch?v={}", track.video_id);
            }
        }

        Command::Chat { mood, message } => {
            let mood = parse_mood(&mood)?;
            let client = CompanionClient::new(
                &config.chat_api_url,
                &config.chat_key().unwrap_or_default(),
                &config.chat_model,
            )
            .map_err(|e| anyhow::anyhow!("failed to build companion client: {}", e))?;

            println!("{}", greeting_for(mood));
            let history = vec![ChatMessage {
                role: "user".to_string(),
                content: message,
            }];
            let reply = client.reply(mood, &history).await;
            println!("{}", reply);
        }
    }

    Ok(())
}
