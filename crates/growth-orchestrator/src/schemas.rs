//! Strict output schemas for the default growth-plan tasks.

use growth_agent::OutputSchema;
use serde_json::{json, Value};

fn search_potential() -> Value {
    json!({
        "type": "string",
        "enum": ["🟢 High", "🟡 Typical", "🔵 Cool"],
        "description": "Search demand level"
    })
}

fn string_list(min: u64, max: u64, description: &str) -> Value {
    json!({
        "type": "array",
        "items": {"type": "string"},
        "minItems": min,
        "maxItems": max,
        "description": description
    })
}

/// Schema for the `insight` task: summary, discovery phrases and keywords.
pub fn insight() -> OutputSchema {
    OutputSchema::strict(
        "insight_output",
        json!({
            "type": "object",
            "properties": {
                "episode_summary": {
                    "type": "string",
                    "description": "2-3 sentence summary capturing what was said and why it matters"
                },
                "key_discovery_phrases": string_list(3, 3, "Exactly 3 long-tail phrases (3-6 words each)"),
                "keywords": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "keyword": {"type": "string"},
                            "category": {
                                "type": "string",
                                "enum": ["Main Topic", "SEO Search", "Community Language"]
                            },
                            "search_potential": search_potential(),
                            "semantic_note": {"type": ["string", "null"]}
                        },
                        "required": ["keyword", "category", "search_potential", "semantic_note"],
                        "additionalProperties": false
                    },
                    "minItems": 5,
                    "maxItems": 5
                }
            },
            "required": ["episode_summary", "key_discovery_phrases", "keywords"],
            "additionalProperties": false
        }),
    )
}

/// Schema for the `hook` task: three title options, one per style.
pub fn hook() -> OutputSchema {
    OutputSchema::strict(
        "hook_output",
        json!({
            "type": "object",
            "properties": {
                "title_options": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "title": {
                                "type": "string",
                                "description": "Episode title under 60 characters"
                            },
                            "style": {
                                "type": "string",
                                "enum": ["Authority", "Conversational", "Curiosity-Driven"]
                            },
                            "primary_keyword": {"type": "string"},
                            "search_potential": search_potential()
                        },
                        "required": ["title", "style", "primary_keyword", "search_potential"],
                        "additionalProperties": false
                    },
                    "minItems": 3,
                    "maxItems": 3
                }
            },
            "required": ["title_options"],
            "additionalProperties": false
        }),
    )
}

/// Schema for the `spotlight` task: shareable quotes and a ready-to-post caption.
pub fn spotlight() -> OutputSchema {
    OutputSchema::strict(
        "spotlight_output",
        json!({
            "type": "object",
            "properties": {
                "shareable_quotes": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "quote": {"type": "string", "description": "Quote under 280 characters"},
                            "timestamp": {"type": "string", "description": "HH:MM:SS"},
                            "hashtags": string_list(2, 2, "Exactly 2 targeted hashtags"),
                            "platform_notes": {"type": "string"}
                        },
                        "required": ["quote", "timestamp", "hashtags", "platform_notes"],
                        "additionalProperties": false
                    },
                    "minItems": 3,
                    "maxItems": 3
                },
                "ready_to_post_caption": {
                    "type": "string",
                    "description": "Social caption under 500 chars with hook, quote reference, and CTA"
                }
            },
            "required": ["shareable_quotes", "ready_to_post_caption"],
            "additionalProperties": false
        }),
    )
}

/// Schema for the `amplify` task: one podcast match and a list of communities.
pub fn amplify() -> OutputSchema {
    OutputSchema::strict(
        "amplify_output",
        json!({
            "type": "object",
            "properties": {
                "podcast_match": {
                    "type": "object",
                    "properties": {
                        "podcast_name": {"type": "string"},
                        "host_name": {"type": "string"},
                        "contact_info": {"type": "string"},
                        "why_collaborate": {"type": "string"},
                        "suggested_approach": {"type": "string"}
                    },
                    "required": ["podcast_name", "host_name", "contact_info", "why_collaborate", "suggested_approach"],
                    "additionalProperties": false
                },
                "communities": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "name": {"type": "string"},
                            "platform": {
                                "type": "string",
                                "enum": ["Reddit", "Facebook", "LinkedIn", "Discord"]
                            },
                            "url": {"type": "string", "description": "Real working URL"},
                            "member_size": {"type": "string"},
                            "why_this_fits": {"type": "string"},
                            "engagement_tip": {"type": "string"}
                        },
                        "required": ["name", "platform", "url", "member_size", "why_this_fits", "engagement_tip"],
                        "additionalProperties": false
                    },
                    "minItems": 1,
                    "maxItems": 4
                }
            },
            "required": ["podcast_match", "communities"],
            "additionalProperties": false
        }),
    )
}

fn trend(timing_field: &str) -> Value {
    let mut properties = json!({
        "trend_or_hashtag": {"type": "string"},
        "why_it_connects": {"type": "string"},
        "best_platforms": string_list(2, 3, "2-3 platforms where the trend lives"),
        "confidence": {"type": "string", "enum": ["High", "Medium"]}
    });
    properties[timing_field] = json!({"type": "string"});

    json!({
        "anyOf": [
            {
                "type": "object",
                "properties": properties,
                "required": ["trend_or_hashtag", "why_it_connects", "best_platforms", timing_field, "confidence"],
                "additionalProperties": false
            },
            {"type": "null"}
        ]
    })
}

/// Schema for the `pulse` task: nullable durable trend and viral moment.
pub fn pulse() -> OutputSchema {
    OutputSchema::strict(
        "pulse_output",
        json!({
            "type": "object",
            "properties": {
                "durable_trend": trend("timing_strategy"),
                "viral_moment": trend("timing_window"),
                "dad_joke": {
                    "type": ["string", "null"],
                    "description": "Dad joke when no trends fit"
                }
            },
            "required": ["durable_trend", "viral_moment", "dad_joke"],
            "additionalProperties": false
        }),
    )
}
