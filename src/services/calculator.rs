use serde::Serialize;

use crate::services::factors::{Appliance, DietType, EmissionFactors, Fuel, MeatType, Vehicle};

/// Round to two decimals, the resolution everything is stored and
/// reported at. Ties round to the even cent.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Transportation,
    Electricity,
    Diet,
    Gas,
    Waste,
    Water,
}

/// Per-category kg CO2 subtotals for one day, each already rounded to two
/// decimals. Always fully populated: absent or unrecognized inputs show up
/// as zero, never as a missing field.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct EmissionBreakdown {
    pub transportation: f64,
    pub electricity: f64,
    pub diet: f64,
    pub gas: f64,
    pub waste: f64,
    pub water: f64,
}

impl EmissionBreakdown {
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Transportation => self.transportation,
            Category::Electricity => self.electricity,
            Category::Diet => self.diet,
            Category::Gas => self.gas,
            Category::Waste => self.waste,
            Category::Water => self.water,
        }
    }

    /// Sum of the six rounded subtotals. The rounding happens per category
    /// before summing, so this matches what the per-category fields add up
    /// to; `round2` here only strips float representation noise.
    pub fn total(&self) -> f64 {
        round2(
            self.transportation + self.electricity + self.diet + self.gas + self.waste + self.water,
        )
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TransportEntry {
    pub vehicle: Vehicle,
    pub fuel: Fuel,
    pub distance: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct ApplianceEntry {
    pub appliance: Appliance,
    pub hours: f64,
}

#[derive(Debug, Clone)]
pub struct DietInput {
    pub diet_type: DietType,
    /// Servings per day for meat-based diets; weekly multiplier for
    /// vegetarian ones.
    pub frequency: f64,
    pub meat_types: Vec<MeatType>,
}

impl Default for DietInput {
    fn default() -> Self {
        DietInput {
            diet_type: DietType::MeatBased,
            frequency: 0.0,
            meat_types: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CalculationInput {
    pub transport: Vec<TransportEntry>,
    pub appliances: Vec<ApplianceEntry>,
    pub diet: DietInput,
    pub gas_usage: f64,
    pub waste_amount: f64,
    pub waste_recycled: bool,
    pub water_usage: f64,
}

/// Distance times the per-km factor, summed over entries. Pairs the table
/// does not list contribute nothing.
pub fn transportation_emissions(factors: &EmissionFactors, entries: &[TransportEntry]) -> f64 {
    entries
        .iter()
        .filter_map(|entry| {
            factors
                .transport_factor(entry.vehicle, entry.fuel)
                .map(|factor| entry.distance * factor)
        })
        .sum()
}

/// Hours are converted to kWh per appliance and summed; the grid factor is
/// applied once to the aggregate, not per appliance.
pub fn electricity_emissions(factors: &EmissionFactors, entries: &[ApplianceEntry]) -> f64 {
    let total_kwh: f64 = entries
        .iter()
        .map(|entry| entry.hours * factors.appliance_kwh_per_hour(entry.appliance))
        .sum();

    total_kwh * factors.electricity_per_kwh()
}

/// Vegetarian: frequency is a weekly multiplier scaled by the fixed 7-day
/// assumption; any listed meat types are ignored. Meat-based: every listed
/// meat type multiplies the full frequency, which is not divided across
/// the list.
pub fn diet_emissions(factors: &EmissionFactors, diet: &DietInput) -> f64 {
    if diet.diet_type == DietType::Vegetarian {
        return diet.frequency * factors.vegetarian_factor() * 7.0;
    }

    diet.meat_types
        .iter()
        .map(|meat| diet.frequency * factors.meat_factor(*meat))
        .sum()
}

pub fn gas_emissions(factors: &EmissionFactors, kg_lpg: f64) -> f64 {
    kg_lpg * factors.gas_per_kg()
}

pub fn waste_emissions(factors: &EmissionFactors, kg_waste: f64, recycled: bool) -> f64 {
    kg_waste * factors.waste_factor(recycled)
}

pub fn water_emissions(factors: &EmissionFactors, liters: f64) -> f64 {
    liters * factors.water_per_liter()
}

/// Run every category calculator and round each subtotal to two decimals.
pub fn calculate(factors: &EmissionFactors, input: &CalculationInput) -> EmissionBreakdown {
    EmissionBreakdown {
        transportation: round2(transportation_emissions(factors, &input.transport)),
        electricity: round2(electricity_emissions(factors, &input.appliances)),
        diet: round2(diet_emissions(factors, &input.diet)),
        gas: round2(gas_emissions(factors, input.gas_usage)),
        waste: round2(waste_emissions(factors, input.waste_amount, input.waste_recycled)),
        water: round2(water_emissions(factors, input.water_usage)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_round2_rounds_ties_to_even_cent() {
        assert_eq!(round2(0.125), 0.12);
        assert_eq!(round2(0.375), 0.38);
        assert_eq!(round2(-0.125), -0.12);
        // Just above the tie still goes up.
        assert_eq!(round2(0.135), 0.14);
    }

    #[test]
    fn test_transport_known_pair_is_distance_times_factor() {
        let factors = EmissionFactors::builtin();
        let entries = [TransportEntry {
            vehicle: Vehicle::Car,
            fuel: Fuel::Diesel,
            distance: 12.0,
        }];
        assert!((transportation_emissions(&factors, &entries) - 12.0 * 0.27).abs() < EPS);
    }

    #[test]
    fn test_transport_unlisted_pair_contributes_zero() {
        let factors = EmissionFactors::builtin();
        let entries = [TransportEntry {
            vehicle: Vehicle::Car,
            fuel: Fuel::JetFuel,
            distance: 5000.0,
        }];
        assert_eq!(transportation_emissions(&factors, &entries), 0.0);
    }

    #[test]
    fn test_transport_sums_across_entries() {
        let factors = EmissionFactors::builtin();
        let entries = [
            TransportEntry {
                vehicle: Vehicle::Bus,
                fuel: Fuel::Cng,
                distance: 10.0,
            },
            TransportEntry {
                vehicle: Vehicle::Train,
                fuel: Fuel::Electric,
                distance: 20.0,
            },
            // unlisted pair, skipped
            TransportEntry {
                vehicle: Vehicle::Bike,
                fuel: Fuel::Diesel,
                distance: 99.0,
            },
        ];
        let expected = 10.0 * 0.08 + 20.0 * 0.04;
        assert!((transportation_emissions(&factors, &entries) - expected).abs() < EPS);
    }

    #[test]
    fn test_electricity_factor_applies_once_to_aggregate() {
        let factors = EmissionFactors::builtin();
        let entries = [
            ApplianceEntry {
                appliance: Appliance::Ac,
                hours: 2.0,
            },
            ApplianceEntry {
                appliance: Appliance::Fan,
                hours: 3.0,
            },
        ];
        // (2 x 1.5 + 3 x 0.05) x 0.5 = 1.575, which lands at 1.58 once rounded
        let raw = electricity_emissions(&factors, &entries);
        assert!((raw - 1.575).abs() < 1e-6);
        assert_eq!(round2(raw), 1.58);
    }

    #[test]
    fn test_diet_vegetarian_uses_weekly_scale() {
        let factors = EmissionFactors::builtin();
        let diet = DietInput {
            diet_type: DietType::Vegetarian,
            frequency: 2.0,
            meat_types: vec![MeatType::Beef], // ignored for vegetarians
        };
        assert!((diet_emissions(&factors, &diet) - 1.4).abs() < EPS);
    }

    #[test]
    fn test_diet_meat_multiplies_frequency_per_listed_type() {
        let factors = EmissionFactors::builtin();
        let diet = DietInput {
            diet_type: DietType::MeatBased,
            frequency: 3.0,
            meat_types: vec![MeatType::Chicken, MeatType::Beef],
        };
        // 3 x 0.6 + 3 x 2.7: the frequency is not divided by the list length
        assert!((diet_emissions(&factors, &diet) - 9.9).abs() < EPS);
    }

    #[test]
    fn test_diet_meat_empty_list_is_zero() {
        let factors = EmissionFactors::builtin();
        let diet = DietInput {
            diet_type: DietType::MeatBased,
            frequency: 3.0,
            meat_types: vec![],
        };
        assert_eq!(diet_emissions(&factors, &diet), 0.0);
    }

    #[test]
    fn test_scalar_categories() {
        let factors = EmissionFactors::builtin();
        assert!((gas_emissions(&factors, 2.0) - 5.96).abs() < EPS);
        assert!((waste_emissions(&factors, 4.0, true) - 0.4).abs() < EPS);
        assert!((waste_emissions(&factors, 4.0, false) - 2.0).abs() < EPS);
        assert!((water_emissions(&factors, 1000.0) - 0.3).abs() < EPS);
        // 0.25 kg unrecycled is an exact 0.125, a true tie at the cent.
        assert_eq!(round2(waste_emissions(&factors, 0.25, false)), 0.12);
    }

    #[test]
    fn test_calculate_rounds_each_category_and_total_sums_rounded() {
        let factors = EmissionFactors::builtin();
        let input = CalculationInput {
            transport: vec![TransportEntry {
                vehicle: Vehicle::Car,
                fuel: Fuel::Petrol,
                distance: 10.0,
            }],
            appliances: vec![
                ApplianceEntry {
                    appliance: Appliance::Ac,
                    hours: 2.0,
                },
                ApplianceEntry {
                    appliance: Appliance::Fan,
                    hours: 3.0,
                },
            ],
            diet: DietInput {
                diet_type: DietType::Vegetarian,
                frequency: 2.0,
                meat_types: vec![],
            },
            gas_usage: 0.5,
            waste_amount: 1.0,
            waste_recycled: false,
            water_usage: 150.0,
        };

        let breakdown = calculate(&factors, &input);
        assert_eq!(breakdown.transportation, 2.4);
        assert_eq!(breakdown.electricity, 1.58);
        assert_eq!(breakdown.diet, 1.4);
        assert_eq!(breakdown.gas, 1.49);
        assert_eq!(breakdown.waste, 0.5);
        // 150 x 0.0003 scales to exactly 4.5 cents, which rounds to the
        // even side.
        assert_eq!(breakdown.water, 0.04);

        let by_hand =
            breakdown.transportation + breakdown.electricity + breakdown.diet + breakdown.gas
                + breakdown.waste + breakdown.water;
        assert_eq!(breakdown.total(), round2(by_hand));
        assert_eq!(breakdown.total(), 7.41);
    }

    #[test]
    fn test_empty_input_yields_zero_breakdown() {
        let factors = EmissionFactors::builtin();
        let breakdown = calculate(&factors, &CalculationInput::default());
        assert_eq!(breakdown, EmissionBreakdown::default());
        assert_eq!(breakdown.total(), 0.0);
    }
}
