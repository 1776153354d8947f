use clap::{Parser, Subcommand};
use std::sync::Arc;

use courtside::{LookupEngine, NbaStatsProvider, SqliteUserStore, UserStore};

#[derive(Parser)]
#[command(name = "courtside-cli")]
#[command(about = "Courtside NBA lookup CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Autocomplete-style ranked search
    Search {
        /// Search query (any part of a player name)
        query: String,
    },

    /// Full player page: bio plus per-season averages
    Player {
        /// Player name (first substring match wins)
        name: String,
    },

    /// Compare two players' last five games
    Compare {
        player1: String,
        player2: String,
    },

    /// List registered users
    Users {
        /// User database path
        #[arg(short, long, default_value = "courtside.db")]
        db: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    // The user listing doesn't need a roster; everything else does
    if let Commands::Users { db } = &cli.command {
        let store = SqliteUserStore::new(db).await?;
        let users = store.list().await?;

        println!("👤 {} registered user(s)", users.len());
        for user in users {
            println!(
                "   {}. {} (since {})",
                user.id,
                user.username,
                user.created_at.format("%Y-%m-%d")
            );
        }
        return Ok(());
    }

    let engine = LookupEngine::new(Arc::new(NbaStatsProvider::new())).await?;
    println!("📋 Roster loaded: {} players", engine.roster().len());

    match cli.command {
        Commands::Search { query } => {
            println!("🔍 Searching for: {}", query);

            let suggestions = engine.autocomplete(&query);
            if suggestions.is_empty() {
                println!("   No matches.");
            }
            for (i, player) in suggestions.iter().enumerate() {
                println!("   {}. {} ({})", i + 1, player.full_name, player.id);
            }
        }

        Commands::Player { name } => {
            let page = engine.player_page(&name).await?;
            let profile = &page.profile;

            println!("\n✅ {}", profile.display_name());
            println!("   Team: {}", profile.team_name);
            println!("   Height: {}  Weight: {}", profile.height, profile.weight);
            println!(
                "   Age: {}",
                profile
                    .age
                    .map(|a| a.to_string())
                    .unwrap_or_else(|| "N/A".to_string())
            );
            println!("   Latency: {:.2}ms", page.latency_ms);

            println!("\n📊 Seasons:");
            for season in &page.seasons {
                println!(
                    "   {}  {:>5.1} pts  {:>4.1} reb  {:>4.1} ast  {:>4.1} fg%",
                    season.season_id, season.points, season.rebounds, season.assists, season.fg_pct
                );
            }
        }

        Commands::Compare { player1, player2 } => {
            let comparison = engine.compare(&player1, &player2).await?;

            for side in [&comparison.first, &comparison.second] {
                println!("\n🏀 {} — last {} games:", side.player.full_name, side.games.len());
                for game in &side.games {
                    println!(
                        "   {}  {}  {} pts / {} reb / {} ast",
                        game.game_date, game.matchup, game.points, game.rebounds, game.assists
                    );
                }
            }
        }

        Commands::Users { .. } => unreachable!("handled above"),
    }

    Ok(())
}
