//! Instruction templates for both pipeline stages.

/// System instruction for stage 1 (context selection).
pub const SELECTION_SYSTEM_PROMPT: &str = "\
You select which earlier conversation messages are relevant to a new prompt.

Selection criteria, in order of importance:
1. Topical match with the new prompt (same files, functions, errors, features)
2. Density of technical detail (code, commands, error messages, configuration)
3. Decisions, conclusions and working solutions reached earlier

Never select greetings, thanks, or pure acknowledgements (\"ok\", \"got it\").

Output contract: respond with ONLY a JSON array of message indices, for example [0, 4, 7].
No prose, no explanation, no code fences.";

/// System instruction for stage 2 (prompt rewriting).
pub const ENHANCEMENT_SYSTEM_PROMPT: &str = "\
You are a professional prompt optimization assistant for an AI programming assistant.

Optimization goals:
1. Keep the user's original intent and core requirements
2. Make the prompt clearer, more specific, and better structured
3. Add necessary technical details drawn from the conversation context
4. Use accurate technical terminology and avoid ambiguity

Principles:
- Keep it technical and practical
- Only improve the wording; do not change the core request
- If the intent is already clear, adjust minimally
- Do not add role-play (\"act as...\")
- Do not add politeness or formalities
- Do not change the type of request (a question stays a question)
- Do not add tasks the user did not ask for

Output: return only the optimized prompt, written in the same language as the original prompt, \
without explanations, comments, or meta-information.";

/// User instruction for stage 1: the current prompt, the message digest and
/// the requested count.
pub fn selection_request(current_prompt: &str, digest: &str, max_count: usize) -> String {
    format!(
        "Current prompt:\n{current_prompt}\n\n\
         Conversation messages:\n{digest}\n\n\
         Select up to {max_count} messages most relevant to the current prompt. \
         Respond with only a JSON array of message indices."
    )
}

/// User instruction for stage 2: the assembled context block (if any) and
/// the prompt to rewrite.
pub fn enhancement_request(prompt: &str, context: &str) -> String {
    if context.is_empty() {
        return format!("Original prompt:\n{prompt}\n");
    }
    format!("Recent conversation context:\n{context}\n\nOriginal prompt:\n{prompt}\n")
}
