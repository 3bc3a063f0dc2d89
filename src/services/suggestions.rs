use crate::services::calculator::{Category, EmissionBreakdown};

/// A category only earns targeted advice once it exceeds a full kilogram
/// of CO2 for the day.
const ADVICE_THRESHOLD_KG: f64 = 1.0;

/// Categories in the order their advice is emitted.
const ADVICE_ORDER: [Category; 6] = [
    Category::Transportation,
    Category::Electricity,
    Category::Diet,
    Category::Waste,
    Category::Gas,
    Category::Water,
];

const GENERAL_ADVICE: [&str; 3] = [
    "🌱 Plant trees or support reforestation projects to offset your carbon footprint.",
    "🏠 Improve home insulation to reduce heating and cooling energy needs.",
    "🛒 Choose local and seasonal products to reduce transportation emissions.",
];

fn advice_for(category: Category) -> &'static str {
    match category {
        Category::Transportation => {
            "🚌 Consider using public transport, carpooling, or cycling for short trips to reduce transportation emissions."
        }
        Category::Electricity => {
            "💡 Switch to energy-efficient LED bulbs and unplug devices when not in use to lower electricity consumption."
        }
        Category::Diet => {
            "🥗 Try reducing meat consumption by having one meat-free day per week - it can significantly lower your carbon footprint."
        }
        Category::Waste => {
            "♻️ Increase your recycling efforts and consider composting organic waste to reduce waste emissions."
        }
        Category::Gas => {
            "🔥 Use efficient cooking methods and consider batch cooking to reduce LPG consumption."
        }
        Category::Water => {
            "💧 Take shorter showers and fix any leaks to reduce water usage and associated emissions."
        }
    }
}

/// Build the advisory list for one day's breakdown: targeted advice for
/// every category above the threshold, padded with general advice up to
/// two entries and capped at three.
pub fn generate_suggestions(breakdown: &EmissionBreakdown) -> Vec<String> {
    let mut suggestions: Vec<String> = ADVICE_ORDER
        .iter()
        .filter(|category| breakdown.get(**category) > ADVICE_THRESHOLD_KG)
        .map(|category| advice_for(*category).to_string())
        .collect();

    if suggestions.len() < 2 {
        let missing = 2 - suggestions.len();
        suggestions.extend(GENERAL_ADVICE.iter().take(missing).map(|s| s.to_string()));
    }

    suggestions.truncate(3);
    suggestions
}
