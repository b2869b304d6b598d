use chrono::Utc;
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use photo_profile::{
    config::Config,
    models::{FollowListKind, ProfileView, UserId},
    services::LoadOutcome,
    state::AppState,
    utils::{
        media::{MediaResolver, LIST_AVATAR_SIZE, SEARCH_AVATAR_SIZE},
        time::format_relative,
    },
};

#[derive(Parser)]
#[command(name = "photo-profile")]
#[command(about = "Browse photo-sharing profiles from the command line", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a profile with its photos and follow counts
    Profile {
        /// Username of the profile to show
        username: String,

        /// Id of the viewing user (enables the follow button)
        #[arg(long)]
        viewer_id: Option<UserId>,
    },

    /// List the followers of a user
    Followers {
        /// Username whose followers are listed
        username: String,
    },

    /// List the users a user is following
    Following {
        /// Username whose followings are listed
        username: String,
    },

    /// Search users by username or name
    Search {
        /// Free-text query
        query: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 加载配置
    dotenv::dotenv().ok();
    let config = Config::from_env()?;

    // 初始化日志，生产环境输出 JSON
    let filter = EnvFilter::new(
        std::env::var("LOG_LEVEL").unwrap_or_else(|_| "photo_profile=debug".into()),
    );
    if config.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    let state = AppState::new(config)?;

    let output = match cli.command {
        Commands::Profile {
            username,
            viewer_id,
        } => show_profile(&state, &username, viewer_id).await,
        Commands::Followers { username } => {
            show_follow_list(&state, &username, FollowListKind::Followers).await?
        }
        Commands::Following { username } => {
            show_follow_list(&state, &username, FollowListKind::Following).await?
        }
        Commands::Search { query } => show_search(&state, &query).await,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn show_profile(state: &AppState, username: &str, viewer_id: Option<UserId>) -> Value {
    info!("Loading profile {}", username);

    let session = state.profile_session();
    match session.load(username, viewer_id).await {
        LoadOutcome::Loaded => {
            render_profile(&session.view(), session.is_own_profile(), &state.media)
        }
        LoadOutcome::NotFound | LoadOutcome::Superseded => json!({
            "error": "User Not Found",
            "message": "This user doesn't exist or may have been removed.",
        }),
    }
}

fn render_profile(view: &ProfileView, is_own_profile: bool, media: &MediaResolver) -> Value {
    let now = Utc::now();
    let user = view.subject_user.as_ref();

    json!({
        "username": view.handle,
        "full_name": user.and_then(|u| u.full_name()),
        "bio": user.and_then(|u| u.bio.clone()),
        "avatar": user.map(|u| media.subject_avatar(u)),
        "is_own_profile": is_own_profile,
        "follow_button": (!is_own_profile).then(|| view.viewer_relationship.button_label()),
        "posts": view.post_count(),
        "followers": view.follower_count,
        "following": view.following_count,
        "photos": view.photos.iter().map(|photo| json!({
            "id": photo.id,
            "image": media.photo_url(photo),
            "alt": photo.alt_text(),
            "likes": photo.likes_count,
            "comments": photo.comments_count,
            "requires_consent": photo.requires_consent,
            "uploaded": photo.uploaded_at.map(|at| format_relative(at, now)),
        })).collect::<Vec<_>>(),
    })
}

async fn show_follow_list(
    state: &AppState,
    username: &str,
    kind: FollowListKind,
) -> anyhow::Result<Value> {
    let session = state.profile_session();
    if session.load(username, None).await != LoadOutcome::Loaded {
        warn!("Cannot list {} for unknown user {}", kind, username);
        return Ok(json!({ "error": "User Not Found" }));
    }

    let subject_id = session
        .view()
        .subject_id()
        .ok_or_else(|| anyhow::anyhow!("loaded profile without subject"))?;
    let list = state.follow_list(subject_id, kind).await;

    if list.users().is_empty() {
        return Ok(json!({ "message": list.empty_message("") }));
    }

    Ok(Value::Array(
        list.users()
            .iter()
            .map(|user| json!({
                "username": user.username,
                "full_name": user.full_name(),
                "avatar": state.media.summary_avatar(user, LIST_AVATAR_SIZE),
            }))
            .collect(),
    ))
}

async fn show_search(state: &AppState, query: &str) -> Value {
    let results = state.user_search().search(query).await;

    Value::Array(
        results
            .iter()
            .map(|user| json!({
                "username": user.username,
                "full_name": user.full_name(),
                "avatar": state.media.summary_avatar(user, SEARCH_AVATAR_SIZE),
            }))
            .collect(),
    )
}
