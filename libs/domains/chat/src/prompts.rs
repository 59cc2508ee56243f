//! Prompt assembly for grounded completions

/// Fixed system instruction sent with every completion request
pub const SYSTEM_PROMPT: &str = "You are a product expert assistant for electronics.";

/// Build the grounded prompt: retrieved product snippets followed by the raw
/// user query. An empty context block is valid; the model then answers from
/// the system instruction alone.
pub fn build_grounded_prompt(context: &str, query: &str) -> String {
    format!(
        "You are a helpful AI assistant for an electronics e-commerce store.\n\
         Based on the following product data, respond to the user's query.\n\
         \n\
         --- Product Info ---\n\
         {context}\n\
         ---------------------\n\
         User query: {query}\n\
         AI:"
    )
}
