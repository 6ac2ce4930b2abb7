use anyhow::Context;
use dreammarket::{establish_connection, tags, Config};
use log::info;

/// Maintenance entry point: re-runs tag assignment for every user and prints
/// the resulting tag leaderboard. Meant to be invoked periodically (cron);
/// the sweep commits per user, so it is safe next to live traffic.
#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .filter_module("dreammarket", log::LevelFilter::Info)
        .filter_module("sqlx", log::LevelFilter::Error)
        .filter_module("sea_orm", log::LevelFilter::Error)
        .init();

    let config = Config::from_env();
    let db = establish_connection(&config.database_url)
        .await
        .with_context(|| format!("connecting to {}", config.database_url))?;

    let updated = tags::sweep_all(&db).await.context("tag sweep failed")?;
    info!("swept tags for {updated} users");

    let board = tags::leaderboard::build(&db).await?;

    if std::env::args().any(|arg| arg == "--json") {
        println!("{}", serde_json::to_string_pretty(&board)?);
        return Ok(());
    }

    if board.is_empty() {
        println!("no tagged users yet");
        return Ok(());
    }

    for entry in board {
        println!(
            "{} {} ({}): {} member(s)",
            entry.info.icon,
            entry.info.name,
            entry.tag.as_str(),
            entry.member_count
        );
        for member in entry.members {
            println!("    - {}", member.username);
        }
    }

    Ok(())
}
