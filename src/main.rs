use astro_insight::config::cli::Command;
use astro_insight::core::birth_chart::generate_birth_chart_with;
use astro_insight::core::report::render_effects;
use astro_insight::utils::error::Result;
use astro_insight::utils::{logger, validation::Validate};
use astro_insight::{
    AppConfig, ChatCompletionClient, CliConfig, FixedPositions, IndexBuilder, InsightEngine,
    OllamaEmbedder, TextSplitter, UserData, VectorIndex, VectorStoreRetriever,
};
use clap::Parser;
use std::path::Path;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting astro-insight");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    match run(cli).await {
        Ok(output) => println!("{}", output),
        Err(e) => {
            tracing::error!(
                "❌ astro-insight failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            std::process::exit(e.severity().exit_code());
        }
    }
}

async fn run(cli: CliConfig) -> Result<String> {
    let mut config = AppConfig::load(cli.config.as_deref())?;

    // 命令列覆蓋設定
    match &cli.command {
        Command::Ask {
            vector_store: Some(path),
            ..
        } => config.vector_store.path = path.clone(),
        Command::Index {
            documents, output, ..
        } => {
            if let Some(documents) = documents {
                config.indexing.documents_path = documents.clone();
            }
            if let Some(output) = output {
                config.vector_store.path = output.clone();
            }
        }
        _ => {}
    }

    config.validate()?;
    tracing::debug!("Configuration validated");

    match cli.command {
        Command::Chart { user, json } => chart(user.into(), json),
        Command::Ask { user, .. } => ask(&config, user.into()).await,
        Command::Index { .. } => index(&config).await,
    }
}

fn chart(user: UserData, json: bool) -> Result<String> {
    user.validate_birth_details()?;
    let chart = generate_birth_chart_with(&FixedPositions, &user)?;

    if json {
        return Ok(serde_json::to_string_pretty(&chart)?);
    }
    Ok(format!(
        "{}\nPlanetary Effects:\n{}",
        chart.report,
        render_effects(&chart.effects).trim_end()
    ))
}

async fn ask(config: &AppConfig, user: UserData) -> Result<String> {
    // 每次請求載入向量索引（唯讀）
    let index = VectorIndex::load(&config.vector_store.path)?;
    tracing::info!("📚 Loaded {} indexed chunks", index.len());

    let embedder = OllamaEmbedder::from_config(&config.embedding)?;
    let retriever = VectorStoreRetriever::new(index, embedder, config.vector_store.top_k);
    let completion = ChatCompletionClient::from_config(config)?;

    let engine = InsightEngine::new(retriever, completion);
    let response = engine.run(&user).await?;

    Ok(serde_json::to_string_pretty(&response)?)
}

async fn index(config: &AppConfig) -> Result<String> {
    let splitter = TextSplitter::new(config.indexing.chunk_size, config.indexing.chunk_overlap)?;
    let embedder = OllamaEmbedder::from_config(&config.embedding)?;
    let builder = IndexBuilder::new(embedder, splitter, &config.embedding.model);

    let count = builder
        .build_and_save(
            Path::new(&config.indexing.documents_path),
            Path::new(&config.vector_store.path),
        )
        .await?;

    Ok(format!(
        "✅ Indexed {} chunks into {}",
        count, config.vector_store.path
    ))
}
