//! Typed views over the default tasks' payloads.
//!
//! Payloads travel through the engine as opaque JSON. Callers that want a
//! typed growth plan decode a slot with [`Section::decode`], which picks the
//! variant from the task name.

use growth_core::{GrowthError, GrowthResult};
use serde::{Deserialize, Serialize};

/// Estimated search demand, rendered with its traffic-light marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchPotential {
    /// Broad, high-volume search demand.
    #[serde(rename = "🟢 High")]
    High,
    /// Steady demand typical for the niche.
    #[serde(rename = "🟡 Typical")]
    Typical,
    /// Small but engaged audience.
    #[serde(rename = "🔵 Cool")]
    Cool,
}

/// Where a keyword comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeywordCategory {
    /// The episode's core subject.
    #[serde(rename = "Main Topic")]
    MainTopic,
    /// Phrasing listeners type into search.
    #[serde(rename = "SEO Search")]
    SeoSearch,
    /// Terms the target community uses among itself.
    #[serde(rename = "Community Language")]
    CommunityLanguage,
}

/// One keyword of the insight section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
    /// The keyword or phrase.
    pub keyword: String,
    /// Where it comes from.
    pub category: KeywordCategory,
    /// Estimated search demand.
    pub search_potential: SearchPotential,
    /// Only set when the keyword translates regional or jargon language.
    pub semantic_note: Option<String>,
}

/// Output of the `insight` task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightSection {
    /// Short summary written for show notes.
    pub episode_summary: String,
    /// Three phrases a new listener might search for.
    pub key_discovery_phrases: Vec<String>,
    /// Keywords with category and search potential.
    pub keywords: Vec<Keyword>,
}

/// Voice of a title option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TitleStyle {
    /// Expert, searchable phrasing.
    Authority,
    /// Sounds like the hosts talking.
    Conversational,
    /// Opens a question the episode answers.
    #[serde(rename = "Curiosity-Driven")]
    CuriosityDriven,
}

/// One candidate episode title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleOption {
    /// The title text.
    pub title: String,
    /// Its voice.
    pub style: TitleStyle,
    /// Keyword the title is built around.
    pub primary_keyword: String,
    /// Estimated search demand for `primary_keyword`.
    pub search_potential: SearchPotential,
}

/// Output of the `hook` task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HookSection {
    /// One title per style.
    pub title_options: Vec<TitleOption>,
}

/// A quote pulled from the transcript for social posts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareableQuote {
    /// The quote, verbatim.
    pub quote: String,
    /// `HH:MM:SS` within the episode.
    pub timestamp: String,
    /// Hashtags to post it with.
    pub hashtags: Vec<String>,
    /// Per-platform posting advice.
    pub platform_notes: String,
}

/// Output of the `spotlight` task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpotlightSection {
    /// Quotes ready to share.
    pub shareable_quotes: Vec<ShareableQuote>,
    /// A caption that can be posted as is.
    pub ready_to_post_caption: String,
}

/// Platform hosting a community.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Platform {
    /// A subreddit.
    Reddit,
    /// A Facebook group.
    Facebook,
    /// A LinkedIn group.
    LinkedIn,
    /// A Discord server.
    Discord,
}

/// A podcast worth pitching a collaboration to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PodcastMatch {
    /// Show name.
    pub podcast_name: String,
    /// Host to contact.
    pub host_name: String,
    /// Public contact route (site, email, social handle).
    pub contact_info: String,
    /// Why the audiences overlap.
    pub why_collaborate: String,
    /// Opening pitch.
    pub suggested_approach: String,
}

/// A community where the episode fits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Community {
    /// Community name.
    pub name: String,
    /// Hosting platform.
    pub platform: Platform,
    /// Link to the community.
    pub url: String,
    /// Approximate membership, as free text.
    pub member_size: String,
    /// Why the episode belongs there.
    pub why_this_fits: String,
    /// How to post without being promotional.
    pub engagement_tip: String,
}

/// Output of the `amplify` task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmplifySection {
    /// Collaboration target.
    pub podcast_match: PodcastMatch,
    /// Communities to share the episode in.
    pub communities: Vec<Community>,
}

/// How sure the model is about a trend fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Confidence {
    /// Clear, direct fit.
    High,
    /// Plausible fit worth testing.
    Medium,
}

/// A long-running trend the episode can ride.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DurableTrend {
    /// Trend name or hashtag.
    pub trend_or_hashtag: String,
    /// Link between the trend and the episode.
    pub why_it_connects: String,
    /// Platforms where the trend lives.
    pub best_platforms: Vec<String>,
    /// When and how often to post.
    pub timing_strategy: String,
    /// Fit confidence.
    pub confidence: Confidence,
}

/// A short-lived moment the episode can join.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViralMoment {
    /// Trend name or hashtag.
    pub trend_or_hashtag: String,
    /// Link between the moment and the episode.
    pub why_it_connects: String,
    /// Platforms where the moment lives.
    pub best_platforms: Vec<String>,
    /// How long the window stays open.
    pub timing_window: String,
    /// Fit confidence.
    pub confidence: Confidence,
}

/// Output of the `pulse` task. Either trend may be absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PulseSection {
    /// Long-running trend, if one fits.
    pub durable_trend: Option<DurableTrend>,
    /// Short-lived moment, if one fits.
    pub viral_moment: Option<ViralMoment>,
    /// Optional joke for the show notes.
    pub dad_joke: Option<String>,
}

impl PulseSection {
    /// No trend fit this episode.
    pub fn is_empty(&self) -> bool {
        self.durable_trend.is_none() && self.viral_moment.is_none()
    }
}

/// One task's payload, tagged by the task that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "task", content = "payload", rename_all = "lowercase")]
pub enum Section {
    /// Summary, discovery phrases and keywords.
    Insight(InsightSection),
    /// Title options.
    Hook(HookSection),
    /// Shareable quotes and a caption.
    Spotlight(SpotlightSection),
    /// Collaboration and community targets.
    Amplify(AmplifySection),
    /// Trend fits.
    Pulse(PulseSection),
}

impl Section {
    /// Decode a raw payload according to the task that produced it.
    pub fn decode(task: &str, payload: &serde_json::Value) -> GrowthResult<Self> {
        let section = match task {
            "insight" => Section::Insight(from_payload(task, payload)?),
            "hook" => Section::Hook(from_payload(task, payload)?),
            "spotlight" => Section::Spotlight(from_payload(task, payload)?),
            "amplify" => Section::Amplify(from_payload(task, payload)?),
            "pulse" => Section::Pulse(from_payload(task, payload)?),
            other => return Err(GrowthError::UnknownTask(other.to_string())),
        };
        Ok(section)
    }

    /// Name of the task this section belongs to.
    pub fn task_name(&self) -> &'static str {
        match self {
            Section::Insight(_) => "insight",
            Section::Hook(_) => "hook",
            Section::Spotlight(_) => "spotlight",
            Section::Amplify(_) => "amplify",
            Section::Pulse(_) => "pulse",
        }
    }
}

fn from_payload<T: serde::de::DeserializeOwned>(
    task: &str,
    payload: &serde_json::Value,
) -> GrowthResult<T> {
    T::deserialize(payload)
        .map_err(|e| GrowthError::Schema(format!("{task} payload does not decode: {e}")))
}
