//! Badge Miner Entry Point
//!
//! Command-line front end for mining and inspecting badge records.
//! Uses `anyhow` for startup errors; command errors are `kernel::error::AppError`
//! and map to the process exit code.

use badge::presentation::dto::{
    AwardView, BadgeDefinitionView, DeletionView, DifficultyReport, MinedEventView,
    MiningEstimateView, ProfileBadgesView,
};
use badge::{
    BadgeAwardCodec, BadgeConfig, BadgeDefinition, BadgeDefinitionCodec, CancellationFlag,
    DeletionRequestCodec, Event, ImageRef, MiningTask, Nip01Hasher, ProfileBadgeListCodec,
    ProofOfWorkMiner, Rarity, TagCodec, domain::value_objects::kinds,
};
use clap::{Parser, Subcommand};
use kernel::error::app_error::{AppError, AppResult, ResultExt};
use kernel::error::kind::ErrorKind;
use kernel::id::PublicKey;
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "badge-miner", about = "Mine and inspect proof-of-work badges")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Mine a badge definition draft until its id reaches a rarity.
    Mine {
        /// Issuer public key (64 hex characters).
        #[arg(long, env = "BADGE_PUBKEY")]
        pubkey: PublicKey,

        /// Badge identifier (`d` tag).
        #[arg(long)]
        slug: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// Primary image as `WxH=URL` or a bare URL.
        #[arg(long, value_parser = parse_image)]
        image: Option<ImageRef>,

        /// Thumbnail as `WxH=URL` or a bare URL; repeatable.
        #[arg(long = "thumb", value_parser = parse_image)]
        thumbs: Vec<ImageRef>,

        /// Target rarity; defaults to BADGE_DEFAULT_RARITY.
        #[arg(long)]
        rarity: Option<Rarity>,

        /// Exact target in bits; overrides --rarity.
        #[arg(long)]
        bits: Option<u32>,
    },

    /// Report the difficulty and rarity of an event id.
    Difficulty {
        id: String,
    },

    /// Decode a badge event read from a JSON file (`-` for stdin).
    Decode {
        #[arg(default_value = "-")]
        path: PathBuf,
    },

    /// Estimate how long mining a target takes.
    Estimate {
        /// Target in bits.
        #[arg(conflicts_with = "rarity")]
        bits: Option<u32>,

        #[arg(long)]
        rarity: Option<Rarity>,
    },
}

/// `512x512=https://...` or a bare URL
fn parse_image(value: &str) -> Result<ImageRef, String> {
    let value = value.trim();
    if value.is_empty() {
        return Err("image URL is empty".to_string());
    }
    match value.split_once('=') {
        Some((dims, url)) if is_dimensions(dims) => Ok(ImageRef::new(url, Some(dims))),
        _ => Ok(ImageRef::new(value, None::<String>)),
    }
}

fn is_dimensions(s: &str) -> bool {
    s.split_once('x').is_some_and(|(w, h)| {
        !w.is_empty()
            && !h.is_empty()
            && w.bytes().all(|b| b.is_ascii_digit())
            && h.bytes().all(|b| b.is_ascii_digit())
    })
}

fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Cancel `flag` on the first Ctrl-C
fn cancel_on_ctrl_c(flag: CancellationFlag) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupt received, stopping search");
            flag.cancel();
        }
    });
}

async fn mine(config: &BadgeConfig, command: Command) -> AppResult<()> {
    let Command::Mine {
        pubkey,
        slug,
        name,
        description,
        image,
        thumbs,
        rarity,
        bits,
    } = command
    else {
        return Err(AppError::internal("mine called with another command"));
    };

    let mut definition = BadgeDefinition::new(pubkey.to_hex(), slug);
    definition.name = name;
    definition.description = description;
    definition.image = image;
    definition.thumbs = thumbs;

    let target = bits.unwrap_or_else(|| rarity.unwrap_or(config.default_rarity).min_difficulty());
    let draft = BadgeDefinitionCodec::to_draft(&definition.pubkey, &definition);

    tracing::info!(
        address = %definition.address(),
        target,
        rarity = %Rarity::from_difficulty(target),
        "Mining badge definition"
    );

    let miner = ProofOfWorkMiner::new(Arc::new(Nip01Hasher), config);
    let cancel = CancellationFlag::new();
    cancel_on_ctrl_c(cancel.clone());

    let task = MiningTask::spawn_with_cancel(
        miner,
        draft,
        target,
        |progress| {
            tracing::info!(
                nonce = progress.nonce,
                difficulty = progress.difficulty,
                "Mining progress"
            );
        },
        cancel,
    );
    let mined = task.join().await?;

    print_json(&MinedEventView::from(mined))
}

fn decode(path: &PathBuf) -> AppResult<()> {
    let raw = if path.as_os_str() == "-" {
        std::io::read_to_string(std::io::stdin())
            .map_app_err(ErrorKind::Io, "Failed to read event from stdin")?
    } else {
        std::fs::read_to_string(path)
            .map_app_err(ErrorKind::Io, format!("Failed to read {}", path.display()))?
    };
    let event: Event = serde_json::from_str(&raw)
        .map_app_err(ErrorKind::InvalidInput, "Input is not a JSON event")?;

    match event.kind {
        kinds::BADGE_DEFINITION => {
            print_json(&BadgeDefinitionView::from(BadgeDefinitionCodec::decode(&event)))
        }
        kinds::BADGE_AWARD => print_json(&AwardView::from(BadgeAwardCodec::decode(&event))),
        kinds::PROFILE_BADGES => {
            print_json(&ProfileBadgesView::from(ProfileBadgeListCodec::decode(&event)))
        }
        kinds::DELETION => print_json(&DeletionView::from(DeletionRequestCodec::decode(&event))),
        other => Err(AppError::invalid_input(format!(
            "Event kind {} is not a badge record",
            other
        ))
        .with_action("Pass a kind 5, 8, 30008 or 30009 event")),
    }
}

async fn run(cli: Cli) -> AppResult<()> {
    let config = BadgeConfig::from_env()?;

    match cli.command {
        command @ Command::Mine { .. } => mine(&config, command).await,
        Command::Difficulty { id } => print_json(&DifficultyReport::for_id(id)),
        Command::Decode { path } => decode(&path),
        Command::Estimate { bits, rarity } => {
            let bits =
                bits.unwrap_or_else(|| rarity.unwrap_or(config.default_rarity).min_difficulty());
            print_json(&MiningEstimateView::for_bits(bits))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing (stderr; stdout carries JSON output)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "badge_miner=info,badge=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            eprintln!("error: {}", err);
            if let Some(action) = err.action() {
                eprintln!("hint: {}", action);
            }
            Ok(ExitCode::from(u8::try_from(err.exit_code()).unwrap_or(1)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_image() {
        assert_eq!(
            parse_image("512x512=https://img/512.png").unwrap(),
            ImageRef::new("https://img/512.png", Some("512x512"))
        );
        assert_eq!(
            parse_image("https://img/a.png?size=1").unwrap(),
            ImageRef::new("https://img/a.png?size=1", None::<String>)
        );
        assert!(parse_image("  ").is_err());
    }

    #[test]
    fn test_cli_parses_image_dimensions() {
        let cli = Cli::try_parse_from([
            "badge-miner",
            "mine",
            "--pubkey",
            "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798",
            "--slug",
            "bravery",
            "--image",
            "1024x1024=https://img/full.png",
        ])
        .unwrap();

        match cli.command {
            Command::Mine { image, .. } => assert_eq!(
                image,
                Some(ImageRef::new("https://img/full.png", Some("1024x1024")))
            ),
            _ => panic!("expected mine"),
        }
    }

    #[test]
    fn test_decode_missing_file_is_io_error() {
        let err = decode(&PathBuf::from("/nonexistent/badge-event.json")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(err.to_string().contains("/nonexistent/badge-event.json"));
    }

    #[test]
    fn test_cli_parses_mine() {
        let cli = Cli::try_parse_from([
            "badge-miner",
            "mine",
            "--pubkey",
            "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798",
            "--slug",
            "bravery",
            "--rarity",
            "rare",
            "--thumb",
            "64x64=https://img/64.png",
        ])
        .unwrap();

        match cli.command {
            Command::Mine {
                slug,
                rarity,
                thumbs,
                ..
            } => {
                assert_eq!(slug, "bravery");
                assert_eq!(rarity, Some(Rarity::Rare));
                assert_eq!(thumbs.len(), 1);
            }
            _ => panic!("expected mine"),
        }
    }

    #[test]
    fn test_cli_rejects_bad_pubkey() {
        assert!(
            Cli::try_parse_from(["badge-miner", "mine", "--pubkey", "xyz", "--slug", "a"]).is_err()
        );
    }

    #[test]
    fn test_estimate_conflicts() {
        assert!(
            Cli::try_parse_from(["badge-miner", "estimate", "21", "--rarity", "epic"]).is_err()
        );
    }
}
