//! Quorum CLI - moderate sample content through the coordination engine

use clap::Parser;

use quorum_agents::ContentItem;
use quorum_core::{Moderator, ModeratorConfig};
use quorum_registry::{CommunityProfile, RiskLevel, SizeClass};

#[derive(Parser)]
#[command(name = "quorum")]
#[command(about = "Quorum - ensemble moderation coordination engine")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Moderate one piece of content against a demo community
    Moderate {
        /// The content text to moderate
        text: String,
        /// Community identifier
        #[arg(short, long, default_value = "demo")]
        community: String,
        /// Author trust score (0.0 to 1.0)
        #[arg(short, long, default_value_t = 0.5)]
        trust: f64,
        /// Community size class: small, medium or large
        #[arg(short, long, default_value = "medium")]
        size: String,
    },
    /// Show which agent types a profile would deploy
    Plan {
        /// Community size class: small, medium or large
        #[arg(short, long, default_value = "medium")]
        size: String,
        /// Risk level: low, medium or high
        #[arg(short, long, default_value = "medium")]
        risk: String,
    },
}

fn parse_size(size: &str) -> SizeClass {
    match size {
        "small" => SizeClass::Small,
        "large" => SizeClass::Large,
        _ => SizeClass::Medium,
    }
}

fn parse_risk(risk: &str) -> RiskLevel {
    match risk {
        "low" => RiskLevel::Low,
        "high" => RiskLevel::High,
        _ => RiskLevel::Medium,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt::init();

    match cli.command {
        Some(Commands::Moderate {
            text,
            community,
            trust,
            size,
        }) => {
            let moderator = Moderator::new(ModeratorConfig::default());
            let profile = CommunityProfile::new(&community).with_size(parse_size(&size));
            let deployed = moderator.onboard_community(&profile).await;
            println!("deployed {} agents for '{}'", deployed.len(), community);

            let item = ContentItem::text("cli-item", "cli-user", &community, text);
            let decision = moderator.request_moderation(&item, trust).await?;
            println!("{}", serde_json::to_string_pretty(&decision)?);

            let performance = moderator.get_performance(&community);
            println!("{}", serde_json::to_string_pretty(&performance)?);
        }
        Some(Commands::Plan { size, risk }) => {
            let profile = CommunityProfile::new("plan")
                .with_size(parse_size(&size))
                .with_risk(parse_risk(&risk));
            let selected = quorum_registry::DeploymentSelector::new().select(&profile);
            for agent_type in selected {
                println!("{agent_type}");
            }
        }
        None => {
            println!("Quorum v0.1.0 - Use --help for commands");
        }
    }

    Ok(())
}
