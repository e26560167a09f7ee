//! Conversational routing
//!
//! Decides, before any model call, whether a prompt is small talk or a data
//! request. Checks run in a fixed order: greeting, help, about, data
//! keywords. The first hit wins.

/// What kind of prompt the user sent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Hi, hello, ...
    Greeting,
    /// Asks what the assistant can do
    Help,
    /// Asks what the assistant is
    About,
    /// Mentions customer data; runs the pipeline
    DataQuery,
    /// None of the above
    Unrecognized,
}

const GREETINGS: [&str; 4] = ["hi", "hello", "hey", "greetings"];

const HELP_PHRASES: [&str; 4] = ["help", "what can you do", "capabilities", "assistance"];

const ABOUT_PHRASES: [&str; 3] = ["who are you", "what are you", "your purpose"];

const DATA_KEYWORDS: [&str; 16] = [
    "customer",
    "client",
    "reference",
    "find",
    "show",
    "list",
    "industry",
    "erp",
    "invoice",
    "volume",
    "percentage",
    "po",
    "non-po",
    "touchless",
    "automation",
    "activation",
];

/// Route a prompt
pub fn classify(prompt: &str) -> Intent {
    let lower = prompt.to_lowercase();

    if lower
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| GREETINGS.contains(&word))
    {
        return Intent::Greeting;
    }
    if HELP_PHRASES.iter().any(|p| lower.contains(p)) {
        return Intent::Help;
    }
    if ABOUT_PHRASES.iter().any(|p| lower.contains(p)) {
        return Intent::About;
    }
    if DATA_KEYWORDS.iter().any(|k| lower.contains(k)) {
        return Intent::DataQuery;
    }
    Intent::Unrecognized
}

/// Shown when the store returns nothing
pub const NO_RESULTS_MESSAGE: &str = "No customers found matching your criteria.";

/// Shown for any unexpected failure
pub const APOLOGY_MESSAGE: &str = "⚠️ Sorry, I encountered an error processing your request.\n\n\
Please try:\n\
- Rephrasing your query\n\
- Using simpler criteria\n\
- Contacting support if the issue persists";

/// Shown when the prompt matches nothing
pub const UNRECOGNIZED_MESSAGE: &str = "🤔 I'm not sure I understand your request.\n\n\
I can help you find customer references based on various criteria. Try asking something like:\n\
> 'Show me manufacturing customers with high PO automation'\n\
> 'Find clients using SAP with over 10,000 invoices'\n\n\
Or ask 'What can you do?' to see my capabilities.";

/// Answer to "who are you"
pub const ABOUT_MESSAGE: &str = "🤖 I'm an AI-powered Customer Reference Assistant. \
My purpose is to help you find relevant customer references based on various criteria \
like industry, ERP systems, and automation metrics.";

/// What the assistant can filter on
pub const CAPABILITIES_MESSAGE: &str = "🔍 I can retrieve customer data from Salesforce based on:\n\n\
- PO automation levels (PO touchless %, PO %, non-PO %, automatic distribution %)\n\
- Invoice volumes (e.g. at least 10000 invoices)\n\
- ERP systems (e.g. Oracle, MS Dynamics...)\n\
- Product activations (e.g. Readsoft Invoices, Connect BC Cloud...)\n\
- Industry sectors (e.g. Manufacturing, Retail, Consumer Products...)\n\n\
💡 Example query:\n\
> 'Show me 5 retail customers with less than 30% po touchless and more than 10k invoices'";

/// Reply to a greeting
pub fn greeting_message() -> String {
    format!(
        "👋 Hello! I'm your Customer Reference Assistant. How can I help you today?\n\n{}",
        CAPABILITIES_MESSAGE
    )
}

/// First message of a chat session
pub fn welcome_message() -> String {
    format!(
        "👋 Hi! I'm your Customer Reference Assistant.\n\n{}",
        CAPABILITIES_MESSAGE
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greetings_are_whole_words() {
        assert_eq!(classify("Hello there"), Intent::Greeting);
        assert_eq!(classify("hey!"), Intent::Greeting);
        assert_eq!(classify("Greetings, assistant"), Intent::Greeting);
        // "hi" inside "high" and "this" is not a greeting
        assert_eq!(
            classify("Show me customers with high PO automation"),
            Intent::DataQuery
        );
        assert_eq!(classify("is this thing on"), Intent::Unrecognized);
    }

    #[test]
    fn test_greeting_wins_over_data() {
        assert_eq!(classify("hi, show me retail customers"), Intent::Greeting);
    }

    #[test]
    fn test_help_and_about() {
        assert_eq!(classify("What can you do?"), Intent::Help);
        assert_eq!(classify("I need assistance"), Intent::Help);
        assert_eq!(classify("Who are you?"), Intent::About);
        assert_eq!(classify("what is your purpose"), Intent::About);
    }

    #[test]
    fn test_data_queries() {
        assert_eq!(
            classify("Show me 5 retail customers with less than 30% po touchless"),
            Intent::DataQuery
        );
        assert_eq!(classify("Which accounts run SAP ERP?"), Intent::DataQuery);
        assert_eq!(classify("INVOICE volume above 10k"), Intent::DataQuery);
    }

    #[test]
    fn test_unrecognized() {
        assert_eq!(classify("what's the weather like"), Intent::Unrecognized);
        assert_eq!(classify(""), Intent::Unrecognized);
        assert_eq!(classify("   "), Intent::Unrecognized);
    }

    #[test]
    fn test_messages_embed_capabilities() {
        assert!(greeting_message().ends_with(CAPABILITIES_MESSAGE));
        assert!(welcome_message().contains("Customer Reference Assistant"));
    }
}
