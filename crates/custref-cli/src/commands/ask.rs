//! Ask command implementation.

use crate::cli::AskArgs;
use crate::error::Result;
use crate::output::Formatter;
use custref_agent::CustomerReferenceAgent;
use custref_domain::traits::{LlmProvider, RecordStore};
use custref_store::StoreError;
use std::fmt::Display;

/// Execute the ask command.
pub fn execute_ask<L, S>(
    args: AskArgs,
    agent: &CustomerReferenceAgent<L, S>,
    formatter: &Formatter,
) -> Result<()>
where
    L: LlmProvider,
    L::Error: Display,
    S: RecordStore,
    S::Error: Into<StoreError>,
{
    println!("{}", render_ask(&args, agent, formatter)?);
    Ok(())
}

/// Run the prompt and format the reply.
pub fn render_ask<L, S>(
    args: &AskArgs,
    agent: &CustomerReferenceAgent<L, S>,
    formatter: &Formatter,
) -> Result<String>
where
    L: LlmProvider,
    L::Error: Display,
    S: RecordStore,
    S::Error: Into<StoreError>,
{
    let reply = agent.respond(&args.prompt_text());
    formatter.format_reply(&reply, args.show_query)
}
