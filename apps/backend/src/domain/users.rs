//! API-facing user models. Responses never carry the password hash.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::entities::users;

/// Proficiency levels and scores across the three assessed dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserLevel {
    pub vocabulary_level: String,
    pub vocabulary_score: i32,
    pub listening_level: String,
    pub listening_score: i32,
    pub speaking_level: String,
    pub speaking_score: i32,
    pub overall_level: String,
}

impl Default for UserLevel {
    fn default() -> Self {
        Self {
            vocabulary_level: "A1".to_string(),
            vocabulary_score: 0,
            listening_level: "A1".to_string(),
            listening_score: 0,
            speaking_level: "A1".to_string(),
            speaking_score: 0,
            overall_level: "A1".to_string(),
        }
    }
}

/// Cumulative study statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
    #[serde(default)]
    pub total_study_days: i32,
    #[serde(default)]
    pub current_streak: i32,
    #[serde(default)]
    pub total_words_learned: i32,
    #[serde(default)]
    pub total_listening_minutes: i32,
    #[serde(default)]
    pub total_speaking_minutes: i32,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub last_study_date: Option<OffsetDateTime>,
}

/// User record as returned to clients.
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    pub name: String,
    pub level: UserLevel,
    pub stats: UserStats,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<users::Model> for UserProfile {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            name: model.display_name,
            level: UserLevel {
                vocabulary_level: model.vocabulary_level,
                vocabulary_score: model.vocabulary_score,
                listening_level: model.listening_level,
                listening_score: model.listening_score,
                speaking_level: model.speaking_level,
                speaking_score: model.speaking_score,
                overall_level: model.overall_level,
            },
            stats: UserStats {
                total_study_days: model.total_study_days,
                current_streak: model.current_streak,
                total_words_learned: model.total_words_learned,
                total_listening_minutes: model.total_listening_minutes,
                total_speaking_minutes: model.total_speaking_minutes,
                last_study_date: model.last_study_date,
            },
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
