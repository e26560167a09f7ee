//! Interactive chat mode.
//!
//! Every prompt goes through the agent on its own; the transcript kept here
//! is only for display and `clear`, it never feeds back into a query.

use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use custref_agent::conversation::welcome_message;
use custref_agent::{AgentReply, CustomerReferenceAgent};
use custref_domain::traits::{LlmProvider, RecordStore};
use custref_store::StoreError;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::fmt::Display;
use std::path::PathBuf;

/// One line of chat input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatInput {
    /// Leave the chat
    Exit,
    /// Show chat commands
    Help,
    /// Forget the transcript and start over
    Clear,
    /// Show the query behind the last answer
    LastQuery,
    /// Anything else goes to the agent
    Prompt(String),
}

/// Classify a non-empty, trimmed input line.
pub fn parse_chat_line(line: &str) -> ChatInput {
    match line.to_lowercase().as_str() {
        "exit" | "quit" | "q" => ChatInput::Exit,
        "?" | ":help" => ChatInput::Help,
        "clear" => ChatInput::Clear,
        "query" | ":query" => ChatInput::LastQuery,
        _ => ChatInput::Prompt(line.to_string()),
    }
}

/// Prompts and replies of the current session.
#[derive(Debug, Default)]
pub struct Transcript {
    exchanges: Vec<(String, AgentReply)>,
}

impl Transcript {
    /// Record one exchange.
    pub fn push(&mut self, prompt: String, reply: AgentReply) {
        self.exchanges.push((prompt, reply));
    }

    /// Number of exchanges so far.
    pub fn len(&self) -> usize {
        self.exchanges.len()
    }

    /// Whether nothing has been asked yet.
    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }

    /// Query behind the most recent answer that had one.
    pub fn last_query(&self) -> Option<&str> {
        self.exchanges
            .iter()
            .rev()
            .find_map(|(_, reply)| reply.query.as_deref())
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        self.exchanges.clear();
    }
}

/// Run the interactive chat.
pub fn run_chat<L, S>(
    agent: &CustomerReferenceAgent<L, S>,
    formatter: &Formatter,
    history_size: usize,
) -> Result<()>
where
    L: LlmProvider,
    L::Error: Display,
    S: RecordStore,
    S::Error: Into<StoreError>,
{
    println!("{}", welcome_message());
    println!();
    println!(
        "{}",
        formatter.info("Type '?' for chat commands, 'exit' to quit")
    );
    println!();

    let editor_config = rustyline::Config::builder()
        .max_history_size(history_size)
        .map_err(editor_error)?
        .build();
    let mut editor = DefaultEditor::with_config(editor_config).map_err(editor_error)?;

    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    let mut transcript = Transcript::default();

    loop {
        match editor.readline("custref> ") {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                match parse_chat_line(line) {
                    ChatInput::Exit => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    ChatInput::Help => print_help(formatter),
                    ChatInput::Clear => {
                        transcript.clear();
                        println!("{}", formatter.success("Conversation cleared"));
                        println!();
                        println!("{}", welcome_message());
                    }
                    ChatInput::LastQuery => match transcript.last_query() {
                        Some(query) => println!("{}", query),
                        None => println!("{}", formatter.info("No query has run yet")),
                    },
                    ChatInput::Prompt(prompt) => {
                        println!("{}", formatter.info("Searching customer references..."));
                        let reply = agent.respond(&prompt);
                        match formatter.format_reply(&reply, false) {
                            Ok(text) => println!("{}", text),
                            Err(e) => eprintln!("{}", formatter.error(&e.to_string())),
                        }
                        println!();
                        transcript.push(prompt, reply);
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    editor.save_history(&history_path).ok();

    Ok(())
}

fn editor_error(e: ReadlineError) -> CliError {
    CliError::Io(std::io::Error::other(format!(
        "Failed to initialize editor: {}",
        e
    )))
}

fn get_history_path() -> Result<PathBuf> {
    let dir = Config::home_dir()?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join("history.txt"))
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Chat commands:"));
    println!();
    println!("  <question>      - Ask about customer references");
    println!("  query           - Show the query behind the last answer");
    println!("  clear           - Start a new conversation");
    println!("  ?               - Show this help");
    println!("  exit, quit, q   - Leave the chat");
    println!();
    println!("  Ask 'what can you do?' to see what can be searched.");
    println!();
}
