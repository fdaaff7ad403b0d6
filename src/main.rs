mod common;
mod config;
mod conversation;
mod error;
mod faq;
mod history;
mod responder;
mod script;
mod speech;
mod storage;
mod ui;

use std::error::Error;
use std::path::PathBuf;

use chrono::Utc;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use tokio::io::BufReader;

use config::AppConfig;
use conversation::{Conversation, ConversationState};
use speech::SpeechControls;
use ui::ChatApp;

#[derive(Parser)]
#[command(
    name = "campus_assistant",
    version,
    about = "Campus assistant chat demo with simulated replies"
)]
struct Cli {
    /// Path to JSON config file
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH, value_name = "FILE")]
    config: PathBuf,
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Subcommand, Clone, PartialEq, Eq)]
enum Mode {
    /// Open the chat window (default)
    Chat,
    /// Ask without a window and print the conversation once every reply is in
    Ask {
        /// Questions to ask; read one per line from stdin when omitted
        questions: Vec<String>,
    },
    /// Save past conversations as JSON
    Export {
        /// Output file (defaults to the configured export path)
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Write the default config to the config path
    InitConfig,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let app_config = config::load_config(&cli.config);

    match cli.mode.unwrap_or(Mode::Chat) {
        Mode::Chat => run_chat(app_config).await?,
        Mode::Ask { questions } => run_ask(app_config, questions).await?,
        Mode::Export { out } => {
            let path = out.unwrap_or(app_config.export_path);
            history::export_history(&path, &history::sample_history(Utc::now()))?;
            println!("Chat history saved to {}", path.display());
        }
        Mode::InitConfig => {
            config::save_config(&cli.config, &AppConfig::default())?;
            log::info!("Wrote default config to {}", cli.config.display());
        }
    }
    Ok(())
}

fn start_conversation(app_config: &AppConfig) -> error::Result<Conversation> {
    let provider = responder::from_config(&app_config.reply)?;
    let state =
        ConversationState::with_greeting(app_config.language, app_config.user_name.as_deref());
    log::info!(
        "Chat session started (language {}, {:?} replies)",
        app_config.language,
        app_config.reply.mode
    );
    Ok(Conversation::new(state, provider))
}

async fn run_chat(app_config: AppConfig) -> Result<(), Box<dyn Error>> {
    let conversation = start_conversation(&app_config)?;
    let speech = SpeechControls::from_config(&app_config.speech, app_config.speech_enabled);

    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Campus Assistant",
        options,
        Box::new(move |_cc| {
            Ok(Box::new(ChatApp::new(
                conversation,
                speech,
                app_config.export_path,
                app_config.transcript_path,
            )))
        }),
    )?;
    Ok(())
}

async fn run_ask(app_config: AppConfig, questions: Vec<String>) -> Result<(), Box<dyn Error>> {
    let mut conversation = start_conversation(&app_config)?;
    if questions.is_empty() {
        script::run_script(&mut conversation, BufReader::new(tokio::io::stdin())).await?;
    } else {
        script::run_script(&mut conversation, questions.join("\n").as_bytes()).await?;
    }
    print!("{}", history::render_transcript(conversation.messages()));
    Ok(())
}
