use actix_web::{web, HttpResponse, Responder};

use crate::services::factors::{EmissionFactors, Vehicle};

/// GET /factors/fuel-types/{vehicle}
/// Fuel names valid for a vehicle, empty for one the table does not know
pub async fn get_fuel_types(
    factors: web::Data<EmissionFactors>,
    path: web::Path<String>,
) -> impl Responder {
    let vehicle = path.into_inner();
    let fuels: Vec<&'static str> = match Vehicle::parse_name(&vehicle) {
        Some(vehicle) => factors
            .fuel_options(vehicle)
            .iter()
            .map(|fuel| fuel.name())
            .collect(),
        None => Vec::new(),
    };

    HttpResponse::Ok().json(fuels)
}
