//! The CLI driver for the return-support agent.
//!
//! Three entry modes: `returns-agent "<query>"` answers a single query
//! and prints the bordered step transcript, `returns-agent --examples`
//! runs a few demo queries, and `returns-agent` with no arguments
//! starts an interactive chat.

#[macro_use]
extern crate tracing;

use std::env;
use std::io::Write as _;

use owo_colors::OwoColorize;
use returns_agent::core::{AgentEvent, RunOutcome};
use returns_agent::{Session, SessionBuilder};
use returns_agent_anthropic_model::{
    AnthropicConfigBuilder, AnthropicProvider,
};
use tokio::io::{self, AsyncBufReadExt};

const EXAMPLE_QUERIES: [&str; 3] = [
    "I want to return my order ORD-001. Can I still return it?",
    "Can I return order ORD-004? I'm not happy with it.",
    "What is your return policy for electronics?",
];

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let api_key = env::var("ANTHROPIC_API_KEY").unwrap_or_default();
    if api_key.is_empty() {
        // Keep going; the first model request will fail and report it.
        eprintln!(
            "{}",
            "warning: ANTHROPIC_API_KEY is not set".bright_yellow()
        );
    }
    let mut config = AnthropicConfigBuilder::with_api_key(api_key);
    if let Ok(model) = env::var("ANTHROPIC_MODEL") {
        config = config.with_model(model);
    }
    if let Ok(base_url) = env::var("ANTHROPIC_BASE_URL") {
        config = config.with_base_url(base_url);
    }
    let provider = AnthropicProvider::new(config.build());

    let args: Vec<String> = env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("--examples") => {
            for query in EXAMPLE_QUERIES {
                run_query(&provider, query).await;
            }
        }
        Some(_) => run_query(&provider, &args.join(" ")).await,
        None => interactive_mode(provider).await,
    }
}

/// Answers one query with a fresh conversation, printing every step.
async fn run_query(provider: &AnthropicProvider, query: &str) {
    let border = "=".repeat(60);
    println!("\n{border}");
    println!("USER QUERY: {}", query.bright_white());
    println!("{border}\n");

    let mut session = SessionBuilder::with_model_provider(provider.clone())
        .on_event(print_event)
        .build();

    match session.send_message(query).await {
        // The answer has already been printed by the event callback.
        Ok(RunOutcome::Answer(_)) => {}
        Ok(RunOutcome::Inconclusive { iterations }) => {
            println!(
                "{}",
                format!(
                    "The agent did not reach an answer after {iterations} \
                     model turns."
                )
                .bright_yellow()
            );
        }
        Err(err) => {
            eprintln!("{}", format!("error: {err}").bright_red());
        }
    }
    println!("{border}\n");
}

fn print_event(event: &AgentEvent) {
    match event {
        AgentEvent::ToolCall(call) => {
            println!(
                "🔧 {} {}({})",
                "TOOL_CALL".bright_cyan(),
                call.name.bold(),
                call.arguments
            );
        }
        AgentEvent::ToolResult { name, result } => {
            println!("{} ({name})", "TOOL_RESULT".bright_magenta());
            println!("   {}", result.content);
        }
        AgentEvent::AssistantText(text) => {
            println!("{}", "AGENT_RESPONSE".bright_green());
            println!("   {}", text.bright_white());
        }
    }
}

/// Runs an interactive chat, threading one growing conversation
/// through successive loop runs.
async fn interactive_mode(provider: AnthropicProvider) {
    let mut session =
        SessionBuilder::with_model_provider(provider).build();

    let border = "=".repeat(60);
    println!("\n{border}");
    println!("Customer Support Agent - Product Returns");
    println!("{border}");
    println!("\nAvailable order IDs for testing:");
    for order in session.order_store().orders() {
        println!(
            "  - {}: {} (purchased {})",
            order.order_id.bold(),
            order.product_name,
            order.purchase_date
        );
    }
    println!("\nType 'quit' to exit\n");

    loop {
        print!("You: ");
        std::io::stdout().flush().ok();

        let Some(line) = read_line().await else {
            break;
        };
        let input = line.trim();
        if matches!(input, "quit" | "exit" | "q") {
            println!("\nThank you for using our support system! Goodbye!\n");
            break;
        }
        if input.is_empty() {
            continue;
        }

        answer_interactively(&mut session, input).await;
    }
}

async fn answer_interactively(session: &mut Session, input: &str) {
    match session.send_message(input).await {
        Ok(RunOutcome::Answer(answer)) => {
            println!("\nAgent: {}\n", answer.bright_white());
        }
        Ok(RunOutcome::Inconclusive { iterations }) => {
            println!(
                "\nAgent: Sorry, I could not reach an answer after \
                 {iterations} attempts. Please try rephrasing.\n"
            );
        }
        Err(err) => {
            eprintln!("{}", format!("error: {err}").bright_red());
        }
    }
}

async fn read_line() -> Option<String> {
    let mut stdin = io::BufReader::new(io::stdin());
    let mut line = String::new();

    match stdin.read_line(&mut line).await {
        Ok(count) => {
            if count == 0 {
                return None;
            }
            Some(line)
        }
        Err(err) => {
            error!("error reading input: {}", err);
            None
        }
    }
}
