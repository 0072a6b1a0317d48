//! Prompt assembly for the chat and projection features.

use crate::types::{Content, GenerateContentRequest, GenerationConfig, Tool};

/// Hard cap on the context segment of the chat prompt, to keep the model
/// well inside its output-token budget.
pub const CONTEXT_CHAR_LIMIT: usize = 400;

/// Marker appended when the context was cut at [`CONTEXT_CHAR_LIMIT`].
pub const TRUNCATION_MARKER: &str = "\n...[truncated]";

/// Fixed user message sent with the projection system instruction.
const PROJECTION_USER_PROMPT: &str =
    "Please analyze the FPL team and provide the projected score for the next gameweek. \
     Begin with the required format.";

/// Truncate a context blob to exactly the first [`CONTEXT_CHAR_LIMIT`]
/// characters plus [`TRUNCATION_MARKER`]. Shorter contexts pass through
/// unmodified.
pub fn truncate_context(context: &str) -> String {
    if context.chars().count() <= CONTEXT_CHAR_LIMIT {
        return context.to_string();
    }
    let head: String = context.chars().take(CONTEXT_CHAR_LIMIT).collect();
    format!("{head}{TRUNCATION_MARKER}")
}

/// Assemble the full chat prompt text: the user's question, the season and
/// gameweek facts, the advisor persona and behavioral constraints, and the
/// (possibly truncated) squad context.
pub fn chat_prompt(question: &str, context: &str, gameweek: i32) -> String {
    let truncated = truncate_context(context);
    format!(
        "Question: {question}\n\
         The current Premier League season is 2025/26, and it is currently Gameweek {gameweek}.\n\
         You are a witty, expert, and up-to-date Fantasy Premier League (FPL) transfer advisor.\n\
         Always use Google Search grounding to find the latest news, player form, injuries, \
         transfers, and fixture difficulty.\n\
         Be specific in your player recommendations (e.g., 'Transfer out Player A for Player B').\n\
         Keep your answers concise and directly related to FPL strategy.\n\
         Do not recommend players who are no longer in the Premier League.\n\
         If a user asks a question not related to FPL, tell them to ask only FPL-related questions.\n\
         \n\
         FPL TEAM (use only this squad):\n\
         {truncated}"
    )
}

/// Build the chat-variant request payload.
pub fn chat_request(question: &str, context: &str, gameweek: i32) -> GenerateContentRequest {
    GenerateContentRequest {
        system_instruction: None,
        contents: vec![Content::user(chat_prompt(question, context, gameweek))],
        generation_config: Some(GenerationConfig {
            temperature: 0.3,
            max_output_tokens: 512,
        }),
        tools: vec![Tool::google_search()],
    }
}

/// Assemble the projection system instruction: the persona, the delimited
/// full squad context, and the strict output-format requirement (the reply
/// must start with a `Projected Points: [NUMBER]` line).
pub fn projection_instruction(context: &str) -> String {
    format!(
        "[FPL ADVISOR ROLE]\n\
         The current Premier League season is 2025/26. You are a witty, expert, and up-to-date \
         Fantasy Premier League (FPL) projected team point calculator. You must calculate points \
         based on the latest available football news, form, and fixture difficulty. Always use \
         Google Search grounding to find the most current information.\n\
         \n\
         [CURRENT FPL TEAM CONTEXT]\n\
         <<CONTEXT>>\n\
         {context}\n\
         <<END_CONTEXT>>\n\
         \n\
         [FINAL INSTRUCTION]\n\
         Based on the context delimited by <<CONTEXT>> and <<END_CONTEXT>>, analyze the team and \
         fixtures, use Google Search, and provide the final projected score. Your response must \
         **start** with the projected score on its own line using this exact format: \
         **Projected Points: [NUMBER]**. After the required line, you may add a single, brief, \
         witty sentence of analysis."
    )
}

/// Build the projection-variant request payload.
pub fn projection_request(context: &str) -> GenerateContentRequest {
    GenerateContentRequest {
        system_instruction: Some(Content::system(projection_instruction(context))),
        contents: vec![Content::user(PROJECTION_USER_PROMPT)],
        generation_config: None,
        tools: vec![Tool::google_search()],
    }
}
