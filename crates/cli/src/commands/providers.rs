//! `promptlift providers` — List resolvable providers.

use promptlift_config::AppConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    println!("Providers");
    println!("=========");
    for name in config.provider_names() {
        let marker = if name == config.default_provider { "*" } else { " " };
        match config.provider_descriptor(&name) {
            Ok(d) => println!(
                "  {marker} {name:<12} {:<9} {:<24} {}",
                d.wire_format, d.model, d.base_url
            ),
            Err(e) => println!("  {marker} {name:<12} (unresolved: {e})"),
        }
    }

    println!();
    println!("  Built-in defaults: openai, openrouter, deepseek, groq, ollama (chat), gemini (generate)");
    println!("  Environment variables: PROMPTLIFT_API_KEY, PROMPTLIFT_PROVIDER, PROMPTLIFT_MODEL");

    Ok(())
}
