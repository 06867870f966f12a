//! Caption retrieval straight from the YouTube watch page.
//!
//! The watch page embeds the player configuration as a
//! `var ytInitialPlayerResponse = {...};` script assignment. Its
//! `captions.playerCaptionsTracklistRenderer.captionTracks` array lists every
//! caption track with a signed `baseUrl` that serves the timed-text XML.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::{
    LanguagePreference, Transcript, TranscriptEntry, TranscriptError, TranscriptSource, VideoId,
};

static PLAYER_RESPONSE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)ytInitialPlayerResponse\s*=\s*(\{.+?\})\s*;\s*(?:var\s|</script>)").unwrap()
});

static TIMEDTEXT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<text\s+start="([0-9.]+)"(?:\s+dur="([0-9.]+)")?[^>]*>(.*?)</text>"#).unwrap()
});

static INNER_TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerResponse {
    playability_status: Option<PlayabilityStatus>,
    captions: Option<Captions>,
}

#[derive(Debug, Deserialize)]
struct PlayabilityStatus {
    status: String,
    reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Captions {
    #[serde(rename = "playerCaptionsTracklistRenderer")]
    tracklist: Option<TracklistRenderer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TracklistRenderer {
    #[serde(default)]
    caption_tracks: Vec<CaptionTrack>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionTrack {
    pub base_url: String,
    pub language_code: String,
    /// `"asr"` for auto-generated tracks
    #[serde(default)]
    pub kind: Option<String>,
}

impl CaptionTrack {
    pub fn is_generated(&self) -> bool {
        self.kind.as_deref() == Some("asr")
    }
}

#[derive(Debug, Clone, Default)]
pub struct YouTubeTranscriptSource {
    client: reqwest::Client,
    preference: LanguagePreference,
}

impl YouTubeTranscriptSource {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            preference: LanguagePreference::default(),
        }
    }

    pub fn with_preference(mut self, preference: LanguagePreference) -> Self {
        self.preference = preference;
        self
    }

    /// Loads the watch page html for `video_id`
    #[tracing::instrument(skip(self))]
    async fn fetch_watch_page(&self, video_id: &VideoId) -> Result<String, TranscriptError> {
        let resp = self
            .client
            .get(video_id.watch_url())
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to load watch page"))?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(TranscriptError::VideoNotFound {
                video_id: video_id.to_string(),
                reason: "watch page returned 404".into(),
            });
        }

        Ok(resp.error_for_status()?.text().await?)
    }

    #[tracing::instrument(skip(self, track), fields(language = %track.language_code, generated = track.is_generated()))]
    async fn fetch_track(&self, track: &CaptionTrack) -> Result<Vec<TranscriptEntry>, TranscriptError> {
        let xml = self
            .client
            .get(&track.base_url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        Ok(parse_timedtext(&xml))
    }
}

impl TranscriptSource for YouTubeTranscriptSource {
    #[tracing::instrument(skip_all, fields(video_id = %video_id))]
    async fn fetch_transcript(&self, video_id: &VideoId) -> Result<Transcript, TranscriptError> {
        let html = self.fetch_watch_page(video_id).await?;
        let tracks = parse_caption_tracks(video_id, &html)?;
        tracing::debug!(count = tracks.len(), "Caption tracks listed");

        for track in select_tracks(&tracks, &self.preference) {
            // a failed download falls through to the next candidate
            match self.fetch_track(track).await {
                Ok(entries) => {
                    tracing::info!(
                        language = %track.language_code,
                        generated = track.is_generated(),
                        entries = entries.len(),
                        "Fetched transcript"
                    );
                    return Ok(Transcript {
                        video_id: video_id.clone(),
                        language_code: track.language_code.clone(),
                        is_generated: track.is_generated(),
                        entries,
                    });
                }
                Err(e) => {
                    tracing::warn!(error = %e, language = %track.language_code, "Failed to fetch caption track");
                }
            }
        }

        Err(TranscriptError::NoTranscript {
            video_id: video_id.to_string(),
        })
    }
}

/// Extracts the caption track list from a watch page.
///
/// A page without any caption configuration yields an empty list; a page the
/// player reports as `ERROR` is treated as a missing video.
pub fn parse_caption_tracks(
    video_id: &VideoId,
    html: &str,
) -> Result<Vec<CaptionTrack>, TranscriptError> {
    let json = PLAYER_RESPONSE_RE
        .captures(html)
        .and_then(|cap| cap.get(1))
        .ok_or(TranscriptError::ParseError(
            "Failed to extract ytInitialPlayerResponse from the page's script tag",
        ))?;

    let player = serde_json::from_str::<PlayerResponse>(json.as_str())?;

    if let Some(status) = player.playability_status {
        if status.status == "ERROR" {
            return Err(TranscriptError::VideoNotFound {
                video_id: video_id.to_string(),
                reason: status.reason.unwrap_or_else(|| "video unavailable".into()),
            });
        }
    }

    Ok(player
        .captions
        .and_then(|c| c.tracklist)
        .map(|t| t.caption_tracks)
        .unwrap_or_default())
}

/// Orders the candidate tracks by `preference`, without duplicates.
pub fn select_tracks<'a>(
    tracks: &'a [CaptionTrack],
    preference: &LanguagePreference,
) -> Vec<&'a CaptionTrack> {
    let mut selected: Vec<&CaptionTrack> = Vec::new();
    let mut push = |track: &'a CaptionTrack| {
        if !selected.iter().any(|t| std::ptr::eq(*t, track)) {
            selected.push(track);
        }
    };

    for lang in &preference.manual {
        if let Some(track) = tracks
            .iter()
            .find(|t| !t.is_generated() && &t.language_code == lang)
        {
            push(track);
        }
    }

    for lang in &preference.generated {
        if let Some(track) = tracks
            .iter()
            .find(|t| t.is_generated() && &t.language_code == lang)
        {
            push(track);
        }
    }

    for lang in &preference.fallback {
        // manually created tracks win over generated ones within a language
        if let Some(track) = tracks
            .iter()
            .filter(|t| &t.language_code == lang)
            .min_by_key(|t| t.is_generated())
        {
            push(track);
        }
    }

    selected
}

/// Parses the `<transcript><text start=".." dur="..">..</text></transcript>`
/// timed-text format.
pub fn parse_timedtext(xml: &str) -> Vec<TranscriptEntry> {
    TIMEDTEXT_RE
        .captures_iter(xml)
        .filter_map(|cap| {
            let start = cap.get(1)?.as_str().parse::<f64>().ok()?;
            let duration = cap
                .get(2)
                .and_then(|d| d.as_str().parse::<f64>().ok())
                .unwrap_or_default();
            let raw = cap.get(3).map(|m| m.as_str()).unwrap_or_default();
            let text = decode_entities(&INNER_TAG_RE.replace_all(&decode_entities(raw), ""))
                .replace('\n', " ")
                .trim()
                .to_string();

            (!text.is_empty()).then_some(TranscriptEntry {
                text,
                start,
                duration,
            })
        })
        .collect()
}

fn decode_entities(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];

        let decoded = tail.find(';').and_then(|semi| {
            let entity = &tail[1..semi];
            let ch = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some(' '),
                _ => entity
                    .strip_prefix("#x")
                    .or_else(|| entity.strip_prefix("#X"))
                    .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                    .or_else(|| entity.strip_prefix('#').and_then(|dec| dec.parse().ok()))
                    .and_then(char::from_u32),
            };
            ch.map(|c| (c, semi))
        });

        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &tail[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}
