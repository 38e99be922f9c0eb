//! CLI handler for voice assistant management.

use crate::app::build_gateway;
use crate::cli::{AssistantCliArgs, AssistantCommand};
use crate::config::Config;
use crate::vapi::{Assistant, GatewayResult};
use anyhow::{anyhow, Result};
use dialoguer::{theme::ColorfulTheme, Input};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, IsTerminal};
use std::time::Duration;

pub async fn handle_assistant_command(args: AssistantCliArgs) -> Result<()> {
    let config = Config::load()?;
    let gateway = build_gateway(&config)?;

    match args.command {
        AssistantCommand::List => {
            let spinner = spinner("Fetching assistants...");
            let result = gateway.list().await;
            spinner.finish_and_clear();

            let assistants = into_data(result)?;
            if assistants.is_empty() {
                println!("No assistants found.");
                return Ok(());
            }

            println!("Found {} assistant(s):\n", assistants.len());
            for assistant in &assistants {
                print_assistant(assistant);
                println!("---");
            }
        }
        AssistantCommand::Create { name } => {
            let name = match name {
                Some(name) => name,
                None => prompt_name()?,
            };

            let spinner = spinner("Creating assistant...");
            let result = gateway.create(&name).await;
            spinner.finish_and_clear();

            let assistant = into_data(result)?;
            println!("Created assistant {}", assistant.id);
            println!("Webhook: {}", gateway.template().webhook_url());
            println!(
                "\nAttach it to a webinar with: hireflow webinar assign <WEBINAR_ID> {}",
                assistant.id
            );
        }
        AssistantCommand::Update {
            id,
            first_message,
            system_prompt,
        } => {
            let spinner = spinner("Updating assistant...");
            let result = gateway
                .update(&id, first_message.as_deref(), system_prompt.as_deref())
                .await;
            spinner.finish_and_clear();

            let assistant = into_data(result)?;
            println!("Updated assistant {}", assistant.id);
        }
    }

    Ok(())
}

fn into_data<T>(result: GatewayResult<T>) -> Result<T> {
    let status = result.status();
    match result {
        GatewayResult::Success(data) => Ok(data),
        GatewayResult::Failure { message, .. } => Err(anyhow!("{} (status {})", message, status)),
    }
}

fn prompt_name() -> Result<String> {
    if !io::stdin().is_terminal() {
        return Err(anyhow!(
            "Assistant name is required. Pass it with --name in non-interactive sessions."
        ));
    }

    let name: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Assistant name")
        .validate_with(|input: &String| -> Result<(), &str> {
            if input.trim().is_empty() {
                Err("Name cannot be empty")
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    Ok(name.trim().to_string())
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn print_assistant(assistant: &Assistant) {
    println!("ID:      {}", assistant.id);
    println!(
        "Name:    {}",
        assistant.name.as_deref().unwrap_or("<unnamed>")
    );
    if let Some(first_message) = assistant.first_message.as_deref() {
        println!("Greeting: {}", first_message);
    }
    if let Some(updated_at) = assistant.updated_at.as_deref() {
        println!("Updated: {}", updated_at);
    }
}
