use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(50))")]
pub enum DietType {
    #[sea_orm(string_value = "Vegetarian")]
    Vegetarian,
    #[sea_orm(string_value = "Meat-based")]
    MeatBased,
}

/// One calculated day for one user. The (user_id, entry_date) pair is
/// unique: recalculating the same day overwrites every field in place.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "emission_records")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub entry_date: ChronoDate,
    pub transport_total: f64,
    pub electricity_total: f64,
    pub diet_total: f64,
    pub gas_total: f64,
    pub waste_total: f64,
    pub water_total: f64,
    pub total_emissions: f64,
    /// Appliance entries as submitted, kept for display/audit.
    pub appliance_usage: JsonValue,
    pub diet_type: DietType,
    pub gas_usage: f64,
    pub waste_amount: f64,
    pub waste_recycled: bool,
    pub water_usage: f64,
    pub created_at: ChronoDateTimeUtc,
    pub updated_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
