use sea_orm::entity::prelude::*;
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub username: String,
    pub password_hash: String,
    pub display_name: String,
    pub vocabulary_level: String,
    pub vocabulary_score: i32,
    pub listening_level: String,
    pub listening_score: i32,
    pub speaking_level: String,
    pub speaking_score: i32,
    pub overall_level: String,
    pub total_study_days: i32,
    pub current_streak: i32,
    pub total_words_learned: i32,
    pub total_listening_minutes: i32,
    pub total_speaking_minutes: i32,
    pub last_study_date: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
