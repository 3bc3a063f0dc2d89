use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    SqlErr, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use thiserror::Error;
use uuid::Uuid;

use crate::models::emission_record;
use crate::services::calculator::EmissionBreakdown;
use crate::services::factors::DietType;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),
    #[error("conflicting writes for the same day")]
    Conflict,
}

/// One appliance line as submitted, kept verbatim in the record so the
/// day can be shown back the way it was entered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplianceUsage {
    pub appliance: String,
    pub hours: f64,
}

/// Raw inputs stored alongside the computed totals.
#[derive(Debug, Clone)]
pub struct AuxInputs {
    pub appliance_usage: Vec<ApplianceUsage>,
    pub diet_type: DietType,
    pub gas_usage: f64,
    pub waste_amount: f64,
    pub waste_recycled: bool,
    pub water_usage: f64,
}

/// Day-level summary shape shared by the history and stats responses.
#[derive(Debug, Clone, Serialize)]
pub struct EmissionSummary {
    pub date: String,
    pub transportation: f64,
    pub electricity: f64,
    pub diet: f64,
    pub gas: f64,
    pub waste: f64,
    pub water: f64,
    pub total: f64,
    pub created_at: String,
}

pub struct EmissionStore {
    db: DatabaseConnection,
}

impl EmissionStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Write one user's record for one day, replacing any previous record
    /// for that (user, day) pair.
    pub async fn upsert_daily(
        &self,
        user_id: Uuid,
        entry_date: NaiveDate,
        breakdown: &EmissionBreakdown,
        aux: &AuxInputs,
    ) -> Result<emission_record::Model, StoreError> {
        match self.write_daily(user_id, entry_date, breakdown, aux).await {
            Ok(record) => Ok(record),
            Err(err) => match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    // Lost an insert race for this day. The row exists now,
                    // so a second pass takes the update branch.
                    log::warn!(
                        "Concurrent insert for user {} on {}, retrying as update",
                        user_id,
                        entry_date
                    );
                    match self.write_daily(user_id, entry_date, breakdown, aux).await {
                        Ok(record) => Ok(record),
                        Err(err) => match err.sql_err() {
                            Some(SqlErr::UniqueConstraintViolation(_)) => Err(StoreError::Conflict),
                            _ => Err(StoreError::Database(err)),
                        },
                    }
                }
                _ => Err(StoreError::Database(err)),
            },
        }
    }

    async fn write_daily(
        &self,
        user_id: Uuid,
        entry_date: NaiveDate,
        breakdown: &EmissionBreakdown,
        aux: &AuxInputs,
    ) -> Result<emission_record::Model, sea_orm::DbErr> {
        let txn = self.db.begin().await?;

        let existing = emission_record::Entity::find()
            .filter(emission_record::Column::UserId.eq(user_id))
            .filter(emission_record::Column::EntryDate.eq(entry_date))
            .one(&txn)
            .await?;

        let now = chrono::Utc::now();
        let record = if let Some(record) = existing {
            let mut record: emission_record::ActiveModel = record.into();
            apply_fields(&mut record, breakdown, aux);
            record.updated_at = Set(now);
            record.update(&txn).await?
        } else {
            let mut record = emission_record::ActiveModel {
                id: Set(Uuid::new_v4()),
                user_id: Set(user_id),
                entry_date: Set(entry_date),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            };
            apply_fields(&mut record, breakdown, aux);
            emission_record::Entity::insert(record)
                .exec_with_returning(&txn)
                .await?
        };

        txn.commit().await?;
        Ok(record)
    }

    /// All records for one user, newest day first.
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<emission_record::Model>, StoreError> {
        let records = emission_record::Entity::find()
            .filter(emission_record::Column::UserId.eq(user_id))
            .order_by_desc(emission_record::Column::EntryDate)
            .all(&self.db)
            .await?;
        Ok(records)
    }
}

/// Shape one stored record for the history and stats responses.
pub fn to_summary(record: &emission_record::Model) -> EmissionSummary {
    EmissionSummary {
        date: record.entry_date.format("%Y-%m-%d").to_string(),
        transportation: record.transport_total,
        electricity: record.electricity_total,
        diet: record.diet_total,
        gas: record.gas_total,
        waste: record.waste_total,
        water: record.water_total,
        total: record.total_emissions,
        created_at: record.created_at.to_rfc3339(),
    }
}

fn apply_fields(
    record: &mut emission_record::ActiveModel,
    breakdown: &EmissionBreakdown,
    aux: &AuxInputs,
) {
    record.transport_total = Set(breakdown.transportation);
    record.electricity_total = Set(breakdown.electricity);
    record.diet_total = Set(breakdown.diet);
    record.gas_total = Set(breakdown.gas);
    record.waste_total = Set(breakdown.waste);
    record.water_total = Set(breakdown.water);
    record.total_emissions = Set(breakdown.total());
    record.appliance_usage = Set(appliance_json(&aux.appliance_usage));
    record.diet_type = Set(db_diet_type(aux.diet_type));
    record.gas_usage = Set(aux.gas_usage);
    record.waste_amount = Set(aux.waste_amount);
    record.waste_recycled = Set(aux.waste_recycled);
    record.water_usage = Set(aux.water_usage);
}

fn appliance_json(entries: &[ApplianceUsage]) -> JsonValue {
    serde_json::to_value(entries).unwrap_or(JsonValue::Null)
}

fn db_diet_type(diet: DietType) -> emission_record::DietType {
    match diet {
        DietType::Vegetarian => emission_record::DietType::Vegetarian,
        DietType::MeatBased => emission_record::DietType::MeatBased,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::models::user;
    use crate::utils::db::{establish_connection, init_schema};

    async fn temp_db(name: &str) -> (DatabaseConnection, std::path::PathBuf) {
        let dir = std::env::temp_dir().join(name);
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let url = format!("sqlite://{}/store.db?mode=rwc", dir.display());
        let db = establish_connection(&url).await.unwrap();
        init_schema(&db).await.unwrap();
        (db, dir)
    }

    async fn seed_user(db: &DatabaseConnection) -> Uuid {
        let now = Utc::now();
        let account = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set("daily-tracker".to_string()),
            email: Set("tracker@example.com".to_string()),
            password_hash: Set("hash".to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };
        account.insert(db).await.unwrap().id
    }

    fn sample_aux() -> AuxInputs {
        AuxInputs {
            appliance_usage: Vec::new(),
            diet_type: DietType::MeatBased,
            gas_usage: 0.0,
            waste_amount: 0.0,
            waste_recycled: false,
            water_usage: 0.0,
        }
    }

    #[test]
    fn test_apply_fields_sets_every_data_column() {
        let mut record = emission_record::ActiveModel {
            id: Set(Uuid::new_v4()),
            ..Default::default()
        };
        let breakdown = EmissionBreakdown {
            transportation: 2.4,
            electricity: 1.58,
            diet: 1.4,
            gas: 1.49,
            waste: 0.5,
            water: 0.05,
        };
        let aux = AuxInputs {
            appliance_usage: vec![ApplianceUsage {
                appliance: "AC".to_string(),
                hours: 2.0,
            }],
            diet_type: DietType::Vegetarian,
            gas_usage: 0.5,
            waste_amount: 1.0,
            waste_recycled: true,
            water_usage: 150.0,
        };

        apply_fields(&mut record, &breakdown, &aux);

        assert_eq!(record.transport_total.clone().unwrap(), 2.4);
        assert_eq!(record.electricity_total.clone().unwrap(), 1.58);
        assert_eq!(record.total_emissions.clone().unwrap(), 7.42);
        assert_eq!(
            record.diet_type.clone().unwrap(),
            emission_record::DietType::Vegetarian
        );
        assert!(record.waste_recycled.clone().unwrap());
        assert_eq!(record.water_usage.clone().unwrap(), 150.0);

        let stored = record.appliance_usage.clone().unwrap();
        assert_eq!(stored[0]["appliance"], "AC");
        assert_eq!(stored[0]["hours"], 2.0);
    }

    #[test]
    fn test_appliance_json_keeps_unknown_names() {
        let entries = vec![ApplianceUsage {
            appliance: "Toaster".to_string(),
            hours: 0.5,
        }];
        let value = appliance_json(&entries);
        assert_eq!(value[0]["appliance"], "Toaster");
    }

    #[test]
    fn test_db_diet_type_mapping() {
        assert_eq!(
            db_diet_type(DietType::Vegetarian),
            emission_record::DietType::Vegetarian
        );
        assert_eq!(
            db_diet_type(DietType::MeatBased),
            emission_record::DietType::MeatBased
        );
    }

    #[test]
    fn test_to_summary_formats_dates() {
        let record = emission_record::Model {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            entry_date: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
            transport_total: 1.0,
            electricity_total: 0.5,
            diet_total: 0.0,
            gas_total: 0.0,
            waste_total: 0.25,
            water_total: 0.0,
            total_emissions: 1.75,
            appliance_usage: serde_json::json!([]),
            diet_type: emission_record::DietType::MeatBased,
            gas_usage: 0.0,
            waste_amount: 2.5,
            waste_recycled: false,
            water_usage: 0.0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let summary = to_summary(&record);
        assert_eq!(summary.date, "2024-03-09");
        assert_eq!(summary.transportation, 1.0);
        assert_eq!(summary.waste, 0.25);
        assert_eq!(summary.total, 1.75);
        assert!(summary.created_at.contains('T'));
    }

    #[actix_web::test]
    async fn test_upsert_twice_keeps_one_record_with_latest_fields() {
        let (db, dir) = temp_db("record_store_test_upsert").await;
        let user_id = seed_user(&db).await;
        let store = EmissionStore::new(db.clone());
        let day = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();

        let first = EmissionBreakdown {
            transportation: 2.4,
            ..Default::default()
        };
        let second = EmissionBreakdown {
            diet: 9.9,
            gas: 1.4,
            ..Default::default()
        };

        let created = store
            .upsert_daily(user_id, day, &first, &sample_aux())
            .await
            .unwrap();
        let updated = store
            .upsert_daily(user_id, day, &second, &sample_aux())
            .await
            .unwrap();

        // Second call replaced the first record instead of adding one.
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.transport_total, 0.0);
        assert_eq!(updated.diet_total, 9.9);
        assert_eq!(updated.gas_total, 1.4);
        assert_eq!(updated.total_emissions, 11.3);

        let records = store.list_for_user(user_id).await.unwrap();
        assert_eq!(records.len(), 1);

        let summary = to_summary(&records[0]);
        assert_eq!(summary.date, "2024-03-09");
        assert_eq!(summary.diet, 9.9);
        assert_eq!(summary.total, 11.3);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[actix_web::test]
    async fn test_unique_index_rejects_second_insert_for_same_day() {
        let (db, dir) = temp_db("record_store_test_unique").await;
        let user_id = seed_user(&db).await;
        let day = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let breakdown = EmissionBreakdown::default();
        let aux = sample_aux();

        let row = |id: Uuid| {
            let now = Utc::now();
            let mut record = emission_record::ActiveModel {
                id: Set(id),
                user_id: Set(user_id),
                entry_date: Set(day),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            };
            apply_fields(&mut record, &breakdown, &aux);
            record
        };

        emission_record::Entity::insert(row(Uuid::new_v4()))
            .exec(&db)
            .await
            .unwrap();
        let err = emission_record::Entity::insert(row(Uuid::new_v4()))
            .exec(&db)
            .await
            .unwrap_err();
        assert!(matches!(
            err.sql_err(),
            Some(SqlErr::UniqueConstraintViolation(_))
        ));

        // An upsert that finds a row written by someone else takes the
        // update branch and the day still holds a single record.
        let store = EmissionStore::new(db.clone());
        let survivor = store
            .upsert_daily(
                user_id,
                day,
                &EmissionBreakdown {
                    waste: 0.5,
                    ..Default::default()
                },
                &aux,
            )
            .await
            .unwrap();
        assert_eq!(survivor.waste_total, 0.5);

        let records = store.list_for_user(user_id).await.unwrap();
        assert_eq!(records.len(), 1);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
