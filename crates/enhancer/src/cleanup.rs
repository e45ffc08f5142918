//! Cleanup of the stage-2 reply.
//!
//! Models often wrap the rewritten prompt in a preamble, code fences or
//! quotes. Those wrappers are removed; the prompt body is left alone apart
//! from collapsing runs of blank lines.

/// Preambles stripped from the start of the reply.
const PREAMBLES: &[&str] = &[
    "Here's the enhanced prompt:",
    "Here is the enhanced prompt:",
    "Here's the optimized prompt:",
    "Here is the optimized prompt:",
    "Enhanced prompt:",
    "Optimized prompt:",
    "以下是优化后的提示词：",
    "以下是优化后的提示词",
    "这是优化后的提示词：",
    "这是优化后的提示词",
    "优化后的提示词：",
    "优化后的提示词",
];

/// Status lines some CLI-backed gateways prepend to their output.
const NOISE_LINE_PREFIXES: &[&str] = &["Loaded cached credentials"];

/// Strip wrappers from a rewritten prompt. Returns an empty string when
/// nothing but wrappers was present.
pub fn clean_enhanced_output(raw: &str) -> String {
    let without_noise: Vec<&str> = raw
        .lines()
        .filter(|line| {
            !NOISE_LINE_PREFIXES
                .iter()
                .any(|prefix| line.trim_start().starts_with(prefix))
        })
        .collect();
    let text = without_noise.join("\n");

    let text = strip_code_fence(text.trim());
    let text = strip_preamble(text);
    let text = strip_code_fence(text);
    let text = strip_quotes(text);

    collapse_blank_lines(text)
}

fn strip_preamble(text: &str) -> &str {
    for preamble in PREAMBLES {
        if let Some(rest) = text.strip_prefix(preamble) {
            return rest.trim();
        }
    }
    text
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    match rest.split_once('\n') {
        // A language tag is a single word on the opening fence line.
        Some((tag, body)) if !tag.trim().contains(char::is_whitespace) => body.trim(),
        _ => rest.trim(),
    }
}

fn strip_quotes(text: &str) -> &str {
    if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
        return text[1..text.len() - 1].trim();
    }
    text
}

fn collapse_blank_lines(text: &str) -> String {
    let mut out: Vec<&str> = Vec::new();
    for line in text.lines() {
        let line = line.trim_end();
        if line.trim().is_empty() && out.last().is_none_or(|prev| prev.is_empty()) {
            continue;
        }
        out.push(if line.trim().is_empty() { "" } else { line });
    }
    while out.last().is_some_and(|l| l.is_empty()) {
        out.pop();
    }
    out.join("\n")
}
