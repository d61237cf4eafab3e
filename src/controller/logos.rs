use std::fs;
use std::path::{Path, PathBuf};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use futures::future::join_all;
use serde::Deserialize;

use crate::error::AppError;

pub const ESPN_TEAMS_URL: &str =
    "https://site.api.espn.com/apis/site/v2/sports/football/nfl/teams";

/// One team's logo, read from local storage.
#[derive(Debug, Clone)]
pub struct LogoAsset {
    pub bytes: Vec<u8>,
    pub mime: &'static str,
}

impl LogoAsset {
    /// Data URI so the rendered artifact stays self-contained.
    #[must_use]
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime, BASE64.encode(&self.bytes))
    }
}

/// Pure lookup of logo assets by team code; unknown codes are an absent
/// asset, never an error.
pub trait LogoStore: Send + Sync {
    fn get(&self, team_code: &str) -> Option<LogoAsset>;
}

/// Logos stored as `{dir}/{TEAM}.{ext}` files.
#[derive(Debug, Clone)]
pub struct DirLogoStore {
    dir: PathBuf,
}

const LOGO_EXTENSIONS: [(&str, &str); 4] = [
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
];

impl DirLogoStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl LogoStore for DirLogoStore {
    fn get(&self, team_code: &str) -> Option<LogoAsset> {
        // Team codes come from the stats file; refuse anything that could
        // name a path outside the logo directory.
        if team_code.is_empty() || !team_code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return None;
        }
        for (extension, mime) in LOGO_EXTENSIONS {
            let path = self.dir.join(format!("{team_code}.{extension}"));
            if let Ok(bytes) = fs::read(&path) {
                return Some(LogoAsset { bytes, mime });
            }
        }
        None
    }
}

#[derive(Deserialize)]
struct TeamsResponse {
    sports: Vec<SportEntry>,
}

#[derive(Deserialize)]
struct SportEntry {
    leagues: Vec<LeagueEntry>,
}

#[derive(Deserialize)]
struct LeagueEntry {
    teams: Vec<TeamEntry>,
}

#[derive(Deserialize)]
struct TeamEntry {
    team: TeamDesc,
}

#[derive(Deserialize)]
struct TeamDesc {
    abbreviation: String,
    #[serde(default)]
    logos: Vec<LogoDesc>,
}

#[derive(Deserialize)]
struct LogoDesc {
    href: String,
}

/// Download every team logo the directory does not already hold, from the
/// ESPN team-description listing. Per-team failures are logged and skipped.
///
/// # Errors
/// Returns an error only when the team listing itself cannot be fetched or
/// the directory cannot be created.
pub async fn download_logos(dir: &Path) -> Result<usize, AppError> {
    fs::create_dir_all(dir)?;
    let client = reqwest::Client::new();
    let listing: TeamsResponse = client
        .get(ESPN_TEAMS_URL)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    let teams: Vec<TeamDesc> = listing
        .sports
        .into_iter()
        .flat_map(|sport| sport.leagues)
        .flat_map(|league| league.teams)
        .map(|entry| entry.team)
        .collect();

    let downloads = teams.iter().filter_map(|team| {
        let href = team.logos.first()?.href.clone();
        let target = dir.join(format!("{}.png", team.abbreviation));
        if target.exists() {
            return None;
        }
        let client = client.clone();
        let code = team.abbreviation.clone();
        Some(async move {
            match fetch_logo(&client, &href, &target).await {
                Ok(()) => true,
                Err(err) => {
                    log::warn!("logo download failed for {code}: {err}");
                    false
                }
            }
        })
    });
    let fetched = join_all(downloads).await.into_iter().filter(|ok| *ok).count();
    Ok(fetched)
}

async fn fetch_logo(client: &reqwest::Client, href: &str, target: &Path) -> Result<(), AppError> {
    let bytes = client
        .get(href)
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await?;
    fs::write(target, &bytes)?;
    Ok(())
}

/// Populate the logo directory at startup when it looks empty. Best effort:
/// a failed download means plain markers, not a failed start.
pub async fn ensure_logos(dir: &Path) {
    if dir_has_entries(dir) {
        return;
    }
    log::info!(
        "logo directory {} is empty, downloading team logos",
        dir.display()
    );
    match download_logos(dir).await {
        Ok(count) => log::info!("downloaded {count} team logos"),
        Err(err) => log::warn!("could not download team logos: {err}"),
    }
}

fn dir_has_entries(dir: &Path) -> bool {
    fs::read_dir(dir)
        .map(|mut entries| entries.next().is_some())
        .unwrap_or(false)
}
