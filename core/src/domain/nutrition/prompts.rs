use std::fmt::Write;

use crate::domain::nutrition::entities::{DEFAULT_MEAL, DEFAULT_UNIT, FoodItem};

/// Canonical per-unit calories used to anchor the collaborator's estimates.
/// Not enforced locally.
pub struct CalorieReference {
    pub item: &'static str,
    pub unit: &'static str,
    pub calories: u32,
}

pub static CALORIE_REFERENCE: &[CalorieReference] = &[
    CalorieReference { item: "coffee (black)", unit: "cup", calories: 5 },
    CalorieReference { item: "tea with milk", unit: "cup", calories: 20 },
    CalorieReference { item: "latte", unit: "cup", calories: 190 },
    CalorieReference { item: "lager", unit: "pint", calories: 180 },
    CalorieReference { item: "ale", unit: "pint", calories: 200 },
    CalorieReference { item: "red or white wine", unit: "glass (175ml)", calories: 160 },
    CalorieReference { item: "cola", unit: "can (330ml)", calories: 140 },
    CalorieReference { item: "pizza", unit: "slice", calories: 200 },
    CalorieReference { item: "bread", unit: "slice", calories: 80 },
    CalorieReference { item: "egg", unit: "egg", calories: 70 },
    CalorieReference { item: "banana", unit: "banana", calories: 105 },
    CalorieReference { item: "apple", unit: "apple", calories: 95 },
    CalorieReference { item: "croissant", unit: "croissant", calories: 230 },
    CalorieReference { item: "chocolate bar", unit: "bar (45g)", calories: 230 },
    CalorieReference { item: "cooked rice", unit: "cup", calories: 205 },
    CalorieReference { item: "cooked pasta", unit: "cup", calories: 220 },
    CalorieReference { item: "chicken breast", unit: "breast", calories: 165 },
    CalorieReference { item: "cheeseburger", unit: "burger", calories: 300 },
    CalorieReference { item: "fries", unit: "medium portion", calories: 320 },
];

/// System instructions for the primary extraction call.
pub fn extraction_instructions() -> String {
    let mut reference = String::new();
    for entry in CALORIE_REFERENCE {
        // Writing into a String cannot fail.
        let _ = writeln!(
            reference,
            "- 1 {} of {} = {} kcal",
            entry.unit, entry.item, entry.calories
        );
    }

    format!(
        r#"You are a nutrition assistant. Extract every food and drink item from the user's description of what they ate.

Respond with a single JSON object and nothing else, in exactly this shape:
{{
  "meal": "Breakfast" | "Lunch" | "Dinner" | "Snack" | "{DEFAULT_MEAL}",
  "items": [
    {{
      "name": "item name",
      "estimatedCalories": 0,
      "quantity": 1,
      "unit": "{DEFAULT_UNIT}",
      "context": "where it came from, e.g. from Pret" or null,
      "description": "quantity, unit and name, e.g. 2 slices of pizza"
    }}
  ]
}}

Rules:
- Use "{DEFAULT_MEAL}" for meal when the user does not say which meal it was.
- quantity is a positive number; default to 1 and unit "{DEFAULT_UNIT}" when no amount is given.
- Work out calories per unit first, then multiply by quantity. estimatedCalories is the total for the whole quantity.
- Use these reference values per unit where they apply:
{reference}- context is null unless the user names a place, shop, restaurant or brand.
- If the description contains no food or drink, return {{"meal": "{DEFAULT_MEAL}", "items": []}}.
- Output JSON only. No prose, no explanations, no markdown, no code fences."#
    )
}

/// System instructions for the per-item insight call.
pub fn insight_instructions() -> &'static str {
    r#"You are a friendly nutrition coach. Give short health notes about a single food item.

Respond with a JSON array of 0 to 3 objects and nothing else. Each object has:
- "type": one of "warning", "info", "positive"
- "title": a few words
- "message": one short sentence
- "icon": a single emoji

Return [] when there is nothing useful to say. Output JSON only, with no prose and no code fences."#
}

/// User message for the per-item insight call. Describes only that item.
pub fn insight_request(item: &FoodItem) -> String {
    format!(
        "Food: {}\nQuantity: {} {}\nEstimated calories: {} kcal",
        item.name, item.quantity, item.unit, item.estimated_calories
    )
}
