use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vehicle {
    Car,
    Bike,
    Bus,
    Train,
    Plane,
    Walking,
}

impl Vehicle {
    pub fn parse_name(name: &str) -> Option<Self> {
        match name {
            "Car" => Some(Vehicle::Car),
            "Bike" => Some(Vehicle::Bike),
            "Bus" => Some(Vehicle::Bus),
            "Train" => Some(Vehicle::Train),
            "Plane" => Some(Vehicle::Plane),
            "Walking" => Some(Vehicle::Walking),
            _ => None,
        }
    }

    #[allow(dead_code)]
    pub fn name(&self) -> &'static str {
        match self {
            Vehicle::Car => "Car",
            Vehicle::Bike => "Bike",
            Vehicle::Bus => "Bus",
            Vehicle::Train => "Train",
            Vehicle::Plane => "Plane",
            Vehicle::Walking => "Walking",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fuel {
    Petrol,
    Diesel,
    Cng,
    Electric,
    JetFuel,
    None,
}

impl Fuel {
    pub fn parse_name(name: &str) -> Option<Self> {
        match name {
            "Petrol" => Some(Fuel::Petrol),
            "Diesel" => Some(Fuel::Diesel),
            "CNG" => Some(Fuel::Cng),
            "Electric" => Some(Fuel::Electric),
            "Jet Fuel" => Some(Fuel::JetFuel),
            "None" => Some(Fuel::None),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Fuel::Petrol => "Petrol",
            Fuel::Diesel => "Diesel",
            Fuel::Cng => "CNG",
            Fuel::Electric => "Electric",
            Fuel::JetFuel => "Jet Fuel",
            Fuel::None => "None",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Appliance {
    Ac,
    Fan,
    Fridge,
    WashingMachine,
    Heater,
    Tv,
}

impl Appliance {
    pub fn parse_name(name: &str) -> Option<Self> {
        match name {
            "AC" => Some(Appliance::Ac),
            "Fan" => Some(Appliance::Fan),
            "Fridge" => Some(Appliance::Fridge),
            "Washing Machine" => Some(Appliance::WashingMachine),
            "Heater" => Some(Appliance::Heater),
            "TV" => Some(Appliance::Tv),
            _ => None,
        }
    }

    #[allow(dead_code)]
    pub fn name(&self) -> &'static str {
        match self {
            Appliance::Ac => "AC",
            Appliance::Fan => "Fan",
            Appliance::Fridge => "Fridge",
            Appliance::WashingMachine => "Washing Machine",
            Appliance::Heater => "Heater",
            Appliance::Tv => "TV",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeatType {
    Chicken,
    Beef,
    Pork,
    Fish,
    Mutton,
}

impl MeatType {
    pub fn parse_name(name: &str) -> Option<Self> {
        match name {
            "Chicken" => Some(MeatType::Chicken),
            "Beef" => Some(MeatType::Beef),
            "Pork" => Some(MeatType::Pork),
            "Fish" => Some(MeatType::Fish),
            "Mutton" => Some(MeatType::Mutton),
            _ => None,
        }
    }

    #[allow(dead_code)]
    pub fn name(&self) -> &'static str {
        match self {
            MeatType::Chicken => "Chicken",
            MeatType::Beef => "Beef",
            MeatType::Pork => "Pork",
            MeatType::Fish => "Fish",
            MeatType::Mutton => "Mutton",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DietType {
    Vegetarian,
    MeatBased,
}

impl DietType {
    pub fn parse_name(name: &str) -> Option<Self> {
        match name {
            "Vegetarian" => Some(DietType::Vegetarian),
            "Meat-based" => Some(DietType::MeatBased),
            _ => None,
        }
    }

    #[allow(dead_code)]
    pub fn name(&self) -> &'static str {
        match self {
            DietType::Vegetarian => "Vegetarian",
            DietType::MeatBased => "Meat-based",
        }
    }
}

/// Static emission factor table (kg CO2 per unit). Built once at startup
/// and shared read-only; calculators receive it by reference.
#[derive(Debug, Clone)]
pub struct EmissionFactors {
    /// Per-vehicle fuel factors in kg CO2 per km, in display order.
    transportation: HashMap<Vehicle, Vec<(Fuel, f64)>>,
    /// kWh drawn per hour of use.
    appliances: HashMap<Appliance, f64>,
    /// kg CO2 per kWh of grid electricity.
    electricity_per_kwh: f64,
    /// kg CO2 per 100g serving.
    diet: HashMap<MeatType, f64>,
    vegetarian_per_serving: f64,
    /// kg CO2 per kg of LPG.
    gas_per_kg: f64,
    waste_recycled: f64,
    waste_not_recycled: f64,
    /// kg CO2 per liter.
    water_per_liter: f64,
}

impl EmissionFactors {
    pub fn builtin() -> Self {
        let mut transportation = HashMap::new();
        transportation.insert(
            Vehicle::Car,
            vec![
                (Fuel::Petrol, 0.24),
                (Fuel::Diesel, 0.27),
                (Fuel::Cng, 0.18),
                (Fuel::Electric, 0.05),
            ],
        );
        transportation.insert(
            Vehicle::Bike,
            vec![(Fuel::Petrol, 0.08), (Fuel::Electric, 0.02)],
        );
        transportation.insert(
            Vehicle::Bus,
            vec![(Fuel::Diesel, 0.10), (Fuel::Cng, 0.08), (Fuel::Electric, 0.04)],
        );
        transportation.insert(
            Vehicle::Train,
            vec![(Fuel::Electric, 0.04), (Fuel::Diesel, 0.06)],
        );
        transportation.insert(Vehicle::Plane, vec![(Fuel::JetFuel, 0.25)]);
        transportation.insert(Vehicle::Walking, vec![(Fuel::None, 0.0)]);

        let mut appliances = HashMap::new();
        appliances.insert(Appliance::Ac, 1.5);
        appliances.insert(Appliance::Fan, 0.05);
        appliances.insert(Appliance::Fridge, 0.15);
        appliances.insert(Appliance::WashingMachine, 0.5);
        appliances.insert(Appliance::Heater, 2.0);
        appliances.insert(Appliance::Tv, 0.1);

        let mut diet = HashMap::new();
        diet.insert(MeatType::Chicken, 0.6);
        diet.insert(MeatType::Beef, 2.7);
        diet.insert(MeatType::Pork, 1.2);
        diet.insert(MeatType::Fish, 0.5);
        diet.insert(MeatType::Mutton, 2.4);

        EmissionFactors {
            transportation,
            appliances,
            electricity_per_kwh: 0.5,
            diet,
            vegetarian_per_serving: 0.1,
            gas_per_kg: 2.98,
            waste_recycled: 0.1,
            waste_not_recycled: 0.5,
            water_per_liter: 0.0003,
        }
    }

    /// kg CO2 per km for the pair, or None when the fuel is not listed
    /// for the vehicle (e.g. Car + Jet Fuel).
    pub fn transport_factor(&self, vehicle: Vehicle, fuel: Fuel) -> Option<f64> {
        self.transportation
            .get(&vehicle)?
            .iter()
            .find(|(f, _)| *f == fuel)
            .map(|(_, factor)| *factor)
    }

    /// Fuels valid for a vehicle, in the table's display order. Drives the
    /// dependent fuel dropdown on the entry form.
    pub fn fuel_options(&self, vehicle: Vehicle) -> Vec<Fuel> {
        self.transportation
            .get(&vehicle)
            .map(|fuels| fuels.iter().map(|(f, _)| *f).collect())
            .unwrap_or_default()
    }

    pub fn appliance_kwh_per_hour(&self, appliance: Appliance) -> f64 {
        self.appliances.get(&appliance).copied().unwrap_or(0.0)
    }

    pub fn electricity_per_kwh(&self) -> f64 {
        self.electricity_per_kwh
    }

    pub fn meat_factor(&self, meat: MeatType) -> f64 {
        self.diet.get(&meat).copied().unwrap_or(0.0)
    }

    pub fn vegetarian_factor(&self) -> f64 {
        self.vegetarian_per_serving
    }

    pub fn gas_per_kg(&self) -> f64 {
        self.gas_per_kg
    }

    pub fn waste_factor(&self, recycled: bool) -> f64 {
        if recycled {
            self.waste_recycled
        } else {
            self.waste_not_recycled
        }
    }

    pub fn water_per_liter(&self) -> f64 {
        self.water_per_liter
    }
}
