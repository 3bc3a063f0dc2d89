use actix_web::{web, HttpResponse, Responder};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::emission_record;
use crate::services::calculator::{
    self, round2, ApplianceEntry, CalculationInput, DietInput, EmissionBreakdown, TransportEntry,
};
use crate::services::eco_facts::FactPool;
use crate::services::factors::{Appliance, DietType, EmissionFactors, Fuel, MeatType, Vehicle};
use crate::services::record_store::{
    to_summary, ApplianceUsage, AuxInputs, EmissionStore, EmissionSummary, StoreError,
};
use crate::services::suggestions::generate_suggestions;

#[derive(Debug, Deserialize)]
pub struct TransportDto {
    pub vehicle: String,
    pub fuel: String,
    #[serde(default)]
    pub distance: f64,
}

#[derive(Debug, Deserialize)]
pub struct DietDto {
    #[serde(rename = "type")]
    pub diet_type: String,
    #[serde(default)]
    pub frequency: f64,
    #[serde(default)]
    pub meat_types: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct CalculateRequest {
    /// Day the entries belong to as YYYY-MM-DD, today when omitted.
    pub date: Option<String>,
    #[serde(default)]
    pub transport: Vec<TransportDto>,
    #[serde(default)]
    pub appliances: Vec<ApplianceUsage>,
    pub diet: Option<DietDto>,
    #[serde(default)]
    pub gas_usage: f64,
    #[serde(default)]
    pub waste_amount: f64,
    #[serde(default)]
    pub recycles: bool,
    #[serde(default)]
    pub water_usage: f64,
}

#[derive(Debug, Serialize)]
pub struct CalculateResponse {
    pub date: String,
    pub breakdown: EmissionBreakdown,
    pub total: f64,
    pub suggestions: Vec<String>,
    pub eco_fact: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub records: Vec<EmissionSummary>,
    pub total_entries: usize,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub total_entries: usize,
    pub average_daily: f64,
    pub highest_day: f64,
    pub lowest_day: f64,
    pub chart_dates: Vec<String>,
    pub chart_totals: Vec<f64>,
}

/// POST /emissions/calculate
/// Compute the day's footprint, store it, and return breakdown plus advice
pub async fn calculate(
    db: web::Data<DatabaseConnection>,
    factors: web::Data<EmissionFactors>,
    facts: web::Data<FactPool>,
    user_claims: web::ReqData<crate::middleware::auth::Claims>,
    payload: web::Json<CalculateRequest>,
) -> Result<impl Responder, actix_web::Error> {
    let user_id = Uuid::parse_str(&user_claims.sub)
        .map_err(|e| actix_web::error::ErrorBadRequest(format!("Invalid user ID: {}", e)))?;

    let entry_date = parse_entry_date(payload.date.as_deref())?;
    let (input, aux) = build_input(&payload);

    let breakdown = calculator::calculate(&factors, &input);
    let suggestions = generate_suggestions(&breakdown);
    let eco_fact = facts.pick_random().map(|s| s.to_string());

    let store = EmissionStore::new(db.get_ref().clone());
    store
        .upsert_daily(user_id, entry_date, &breakdown, &aux)
        .await
        .map_err(store_error)?;

    log::info!(
        "🌍 Stored {} kg CO2 for user {} on {}",
        breakdown.total(),
        user_id,
        entry_date
    );

    Ok(HttpResponse::Ok().json(CalculateResponse {
        date: entry_date.format("%Y-%m-%d").to_string(),
        breakdown,
        total: breakdown.total(),
        suggestions,
        eco_fact,
    }))
}

/// GET /emissions
/// The caller's stored records, newest day first
pub async fn get_history(
    db: web::Data<DatabaseConnection>,
    user_claims: web::ReqData<crate::middleware::auth::Claims>,
) -> Result<impl Responder, actix_web::Error> {
    let user_id = Uuid::parse_str(&user_claims.sub)
        .map_err(|e| actix_web::error::ErrorBadRequest(format!("Invalid user ID: {}", e)))?;

    let store = EmissionStore::new(db.get_ref().clone());
    let records = store.list_for_user(user_id).await.map_err(store_error)?;
    let records: Vec<EmissionSummary> = records.iter().map(to_summary).collect();

    Ok(HttpResponse::Ok().json(HistoryResponse {
        total_entries: records.len(),
        records,
    }))
}

/// GET /emissions/stats
/// Aggregates over the caller's history plus chart series for the last 30 days
pub async fn get_stats(
    db: web::Data<DatabaseConnection>,
    user_claims: web::ReqData<crate::middleware::auth::Claims>,
) -> Result<impl Responder, actix_web::Error> {
    let user_id = Uuid::parse_str(&user_claims.sub)
        .map_err(|e| actix_web::error::ErrorBadRequest(format!("Invalid user ID: {}", e)))?;

    let store = EmissionStore::new(db.get_ref().clone());
    let records = store.list_for_user(user_id).await.map_err(store_error)?;

    Ok(HttpResponse::Ok().json(build_stats(&records)))
}

fn parse_entry_date(raw: Option<&str>) -> Result<NaiveDate, actix_web::Error> {
    match raw {
        Some(value) => NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| {
            actix_web::error::ErrorBadRequest(format!("Invalid date '{}': {}", value, e))
        }),
        None => Ok(chrono::Utc::now().date_naive()),
    }
}

/// Map raw request fields onto typed calculator inputs. Rows with names the
/// factor table does not know are dropped from the typed input so they
/// contribute zero; the submitted appliance rows are stored verbatim either
/// way. Negative quantities are clamped to zero before calculation.
fn build_input(req: &CalculateRequest) -> (CalculationInput, AuxInputs) {
    let transport = req
        .transport
        .iter()
        .filter_map(|row| {
            let vehicle = Vehicle::parse_name(&row.vehicle)?;
            let fuel = Fuel::parse_name(&row.fuel)?;
            Some(TransportEntry {
                vehicle,
                fuel,
                distance: row.distance.max(0.0),
            })
        })
        .collect();

    let appliances = req
        .appliances
        .iter()
        .filter_map(|row| {
            let appliance = Appliance::parse_name(&row.appliance)?;
            Some(ApplianceEntry {
                appliance,
                hours: row.hours.max(0.0),
            })
        })
        .collect();

    let diet = match &req.diet {
        Some(row) => DietInput {
            diet_type: DietType::parse_name(&row.diet_type).unwrap_or(DietType::MeatBased),
            frequency: row.frequency.max(0.0),
            meat_types: row
                .meat_types
                .iter()
                .filter_map(|meat| MeatType::parse_name(meat))
                .collect(),
        },
        None => DietInput::default(),
    };

    let aux = AuxInputs {
        appliance_usage: req.appliances.clone(),
        diet_type: diet.diet_type,
        gas_usage: req.gas_usage,
        waste_amount: req.waste_amount,
        waste_recycled: req.recycles,
        water_usage: req.water_usage,
    };

    let input = CalculationInput {
        transport,
        appliances,
        diet,
        gas_usage: req.gas_usage.max(0.0),
        waste_amount: req.waste_amount.max(0.0),
        waste_recycled: req.recycles,
        water_usage: req.water_usage.max(0.0),
    };

    (input, aux)
}

/// Aggregate stats over records ordered newest first; the chart covers the
/// most recent 30 records, oldest first so it plots left to right.
fn build_stats(records: &[emission_record::Model]) -> StatsResponse {
    if records.is_empty() {
        return StatsResponse {
            total_entries: 0,
            average_daily: 0.0,
            highest_day: 0.0,
            lowest_day: 0.0,
            chart_dates: Vec::new(),
            chart_totals: Vec::new(),
        };
    }

    let total_entries = records.len();
    let total_sum: f64 = records.iter().map(|r| r.total_emissions).sum();
    let highest_day = records
        .iter()
        .map(|r| r.total_emissions)
        .fold(f64::NEG_INFINITY, f64::max);
    let lowest_day = records
        .iter()
        .map(|r| r.total_emissions)
        .fold(f64::INFINITY, f64::min);

    let recent = &records[..records.len().min(30)];
    let chart_dates = recent
        .iter()
        .rev()
        .map(|r| r.entry_date.format("%Y-%m-%d").to_string())
        .collect();
    let chart_totals = recent.iter().rev().map(|r| r.total_emissions).collect();

    StatsResponse {
        total_entries,
        average_daily: round2(total_sum / total_entries as f64),
        highest_day: round2(highest_day),
        lowest_day: round2(lowest_day),
        chart_dates,
        chart_totals,
    }
}

fn store_error(err: StoreError) -> actix_web::Error {
    match err {
        StoreError::Conflict => {
            actix_web::error::ErrorConflict("Conflicting writes for this date, please retry")
        }
        StoreError::Database(e) => {
            log::error!("Database error: {}", e);
            actix_web::error::ErrorInternalServerError("Database error")
        }
    }
}
