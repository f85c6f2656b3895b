use std::env;
use std::sync::Arc;

use tooldex::{
    generate_suggestions, JsonCatalog, RecommendationRequest, Recommender, SearchEngine,
    TooldexConfig, VoiceQueryProcessor,
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::from_default_env().add_directive("tooldex=info".parse()?),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    let mut config = TooldexConfig::from_env();
    let mut recommend_for: Option<String> = None;
    let mut limit: Option<usize> = None;
    let mut utterance_parts: Vec<String> = Vec::new();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--catalog" | "-c" => {
                if i + 1 < args.len() {
                    config.catalog_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--recommend" | "-r" => {
                if i + 1 < args.len() {
                    recommend_for = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--limit" | "-n" => {
                if i + 1 < args.len() {
                    limit = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "--help" => {
                print_help();
                return Ok(());
            }
            other => utterance_parts.push(other.to_string()),
        }
        i += 1;
    }

    let source = Arc::new(JsonCatalog::new(&config.catalog_path));
    let utterance = utterance_parts.join(" ");

    println!("🔍 Tooldex Search");
    println!("   Catalog: {}", config.catalog_path);

    if let Some(tool_id) = recommend_for {
        let recommender = Recommender::new(source);
        let request = RecommendationRequest::for_tool(tool_id)
            .with_limit(limit.unwrap_or(config.default_recommend_limit));
        let recommendations = recommender.recommend(&request).await?;
        println!("{}", serde_json::to_string_pretty(&recommendations)?);
        return Ok(());
    }

    if utterance.is_empty() {
        println!("   No utterance given; try one of:");
        for suggestion in generate_suggestions(&[]) {
            println!("   - {suggestion}");
        }
        return Ok(());
    }

    let processor = VoiceQueryProcessor::new();
    let parsed = processor.process(&utterance);
    println!("   Query params: {:?}", processor.to_search_params(&utterance));

    let engine = SearchEngine::with_cache(source, config.cache_size, config.cache_ttl);
    let mut results = engine.search(&parsed).await?;
    if let Some(limit) = limit {
        results.truncate(limit);
    }
    println!("{}", serde_json::to_string_pretty(&results)?);

    Ok(())
}

fn print_help() {
    println!("tooldex-search [options] <utterance...>");
    println!();
    println!("Options:");
    println!("  -c, --catalog <path>   JSON catalog file (default: TOOLDEX_CATALOG or data/tools.json)");
    println!("  -r, --recommend <id>   print related tools for the given tool id instead of searching");
    println!("  -n, --limit <n>        cap the number of printed results");
    println!();
    println!("Examples:");
    println!("  tooldex-search find chatbots rated above 3 sort by rating descending");
    println!("  tooldex-search --recommend tool_3f2a91c04b7d --limit 5");
}
