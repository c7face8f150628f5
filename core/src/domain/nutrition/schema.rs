use serde_json::{Map, Value, json};

use crate::domain::nutrition::{
    entities::{DEFAULT_MEAL, DEFAULT_QUANTITY, DEFAULT_UNIT, FoodItem, HealthInsight, InsightType},
    errors::ValidationError,
};

/// Output of [`validate`]: the meal label and the items in extraction order.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedLog {
    pub meal: String,
    pub items: Vec<FoodItem>,
}

/// Enforces the structural contract of an extraction response.
///
/// One malformed item rejects the whole response. Optional fields that are
/// absent or `null` get defaults; present ones must have the declared type.
pub fn validate(value: &Value) -> Result<ValidatedLog, ValidationError> {
    let object = value.as_object().ok_or(ValidationError::NotAnObject)?;

    let meal = object
        .get("meal")
        .and_then(Value::as_str)
        .ok_or(ValidationError::MissingMeal)?;

    let items = object
        .get("items")
        .and_then(Value::as_array)
        .ok_or(ValidationError::MissingItems)?;

    let items = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            validate_item(item).map_err(|reason| ValidationError::MalformedItem { index, reason })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let total: f64 = items.iter().map(|item| item.estimated_calories).sum();
    if !total.is_finite() {
        return Err(ValidationError::NonFiniteTotal);
    }

    let meal = match meal.trim() {
        "" => DEFAULT_MEAL.to_string(),
        meal => meal.to_string(),
    };

    Ok(ValidatedLog { meal, items })
}

fn validate_item(value: &Value) -> Result<FoodItem, String> {
    let object = value
        .as_object()
        .ok_or_else(|| "item is not an object".to_string())?;

    let name = object
        .get("name")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| "name must be a non-empty string".to_string())?;

    let estimated_calories = object
        .get("estimatedCalories")
        .and_then(Value::as_f64)
        .filter(|calories| calories.is_finite() && *calories >= 0.0)
        .ok_or_else(|| "estimatedCalories must be a non-negative number".to_string())?;

    let quantity = match optional(object, "quantity") {
        None => DEFAULT_QUANTITY,
        Some(value) => value
            .as_f64()
            .filter(|quantity| quantity.is_finite() && *quantity > 0.0)
            .ok_or_else(|| "quantity must be a positive number".to_string())?,
    };

    let unit = match optional_str(object, "unit")? {
        Some(unit) if !unit.trim().is_empty() => unit.trim().to_string(),
        _ => DEFAULT_UNIT.to_string(),
    };

    let context = optional_str(object, "context")?
        .map(str::trim)
        .filter(|context| !context.is_empty())
        .map(str::to_string);

    let description = match optional_str(object, "description")? {
        Some(description) if !description.trim().is_empty() => description.trim().to_string(),
        _ => format!("{quantity} {unit} of {name}"),
    };

    Ok(FoodItem::new(
        name.to_string(),
        estimated_calories,
        context,
        quantity,
        unit,
        description,
    ))
}

fn optional<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    object.get(key).filter(|value| !value.is_null())
}

fn optional_str<'a>(object: &'a Map<String, Value>, key: &str) -> Result<Option<&'a str>, String> {
    match optional(object, key) {
        None => Ok(None),
        Some(value) => value
            .as_str()
            .map(Some)
            .ok_or_else(|| format!("{key} must be a string")),
    }
}

/// Lenient parse of an insight response.
///
/// Accepts a bare array, an object wrapping an `insights` array, or a lone
/// insight object. Elements missing a required field, or with an unknown
/// type, are dropped.
pub fn parse_insights(sanitized: &str) -> Vec<HealthInsight> {
    let Ok(value) = serde_json::from_str::<Value>(sanitized) else {
        return Vec::new();
    };

    let elements = match &value {
        Value::Array(elements) => elements,
        Value::Object(object) => match object.get("insights").and_then(Value::as_array) {
            Some(elements) => elements,
            None => return insight_from_value(&value).into_iter().collect(),
        },
        _ => return Vec::new(),
    };

    elements.iter().filter_map(insight_from_value).collect()
}

fn insight_from_value(value: &Value) -> Option<HealthInsight> {
    let object = value.as_object()?;
    let text = |key: &str| {
        object
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_string)
    };

    Some(HealthInsight {
        kind: InsightType::parse(object.get("type")?.as_str()?)?,
        title: text("title")?,
        message: text("message")?,
        icon: text("icon")?,
    })
}

/// Returns the JSON schema hint for extraction responses
pub fn nutrition_log_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "meal": { "type": "string" },
            "items": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string" },
                        "estimatedCalories": { "type": "number" },
                        "quantity": { "type": "number" },
                        "unit": { "type": "string" },
                        "context": { "type": "string", "nullable": true },
                        "description": { "type": "string" }
                    },
                    "required": ["name", "estimatedCalories", "quantity", "unit", "description"]
                }
            }
        },
        "required": ["meal", "items"]
    })
}

/// Returns the JSON schema hint for per-item insight responses
pub fn insights_schema() -> Value {
    json!({
        "type": "array",
        "items": {
            "type": "object",
            "properties": {
                "type": {
                    "type": "string",
                    "enum": ["warning", "info", "positive"]
                },
                "title": { "type": "string" },
                "message": { "type": "string" },
                "icon": { "type": "string" }
            },
            "required": ["type", "title", "message", "icon"]
        }
    })
}
