pub mod cli;
pub mod client;
pub mod config;
pub mod logging;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::info;

use cli::Cli;
use client::{ChatRequest, Client, Message};
use config::Config;

pub async fn run() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = Cli::parse();
    let cfg = Config::from_env();
    info!(
        model = cfg.model.as_deref().unwrap_or(client::DEFAULT_MODEL),
        "loaded runtime configuration"
    );

    let Some(token) = cfg.token else {
        bail!("GITHUB_TOKEN environment variable is not set");
    };

    let llm = Client::new(token, cfg.model, None).context("Failed to create client")?;

    if args.models {
        return print_available_models(&llm).await;
    }

    info!(model = %llm.model(), "using model");
    perform_chat_completion(&llm, &cfg.system_prompt, &args.message).await
}

async fn print_available_models(llm: &Client) -> Result<()> {
    let models = llm
        .list_models()
        .await
        .context("Failed to list models")?;

    println!("Available models:");
    for model in models {
        println!("{} [{}]", model.id, model.tags.join(", "));
    }

    Ok(())
}

async fn perform_chat_completion(llm: &Client, system_prompt: &str, user_message: &str) -> Result<()> {
    let mut messages = vec![Message::system(system_prompt), Message::user(user_message)];

    let chat = llm
        .create_chat(ChatRequest {
            messages: messages.clone(),
            ..ChatRequest::default()
        })
        .await
        .context("Failed to create chat completion")?;

    for choice in chat.choices {
        messages.push(choice.message);
    }
    for msg in &messages {
        println!("{}: {}", msg.role.as_str(), msg.content);
    }

    Ok(())
}
