use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const DEFAULT_MEAL: &str = "General";
pub const DEFAULT_UNIT: &str = "serving";
pub const DEFAULT_QUANTITY: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    pub name: String,
    /// Calories for the whole stated quantity, not per unit.
    pub estimated_calories: f64,
    pub context: Option<String>,
    pub quantity: f64,
    pub unit: String,
    pub description: String,
    #[serde(default)]
    pub insights: Vec<HealthInsight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<BrandInfo>,
}

impl FoodItem {
    pub fn new(
        name: String,
        estimated_calories: f64,
        context: Option<String>,
        quantity: f64,
        unit: String,
        description: String,
    ) -> Self {
        Self {
            name,
            estimated_calories,
            context,
            quantity,
            unit,
            description,
            insights: Vec::new(),
            brand: None,
        }
    }
}

/// A validated meal record. The total is always recomputed from the items.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NutritionLog {
    meal: String,
    items: Vec<FoodItem>,
    total_estimated_calories: f64,
}

impl NutritionLog {
    pub fn new(meal: String, items: Vec<FoodItem>) -> Self {
        let total_estimated_calories = items.iter().map(|item| item.estimated_calories).sum();

        Self {
            meal,
            items,
            total_estimated_calories,
        }
    }

    pub fn meal(&self) -> &str {
        &self.meal
    }

    pub fn items(&self) -> &[FoodItem] {
        &self.items
    }

    pub fn total_estimated_calories(&self) -> f64 {
        self.total_estimated_calories
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum InsightType {
    Warning,
    Info,
    Positive,
}

impl InsightType {
    pub fn as_str(&self) -> &str {
        match self {
            InsightType::Warning => "warning",
            InsightType::Info => "info",
            InsightType::Positive => "positive",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "warning" => Some(InsightType::Warning),
            "info" => Some(InsightType::Info),
            "positive" => Some(InsightType::Positive),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthInsight {
    #[serde(rename = "type")]
    pub kind: InsightType,
    pub title: String,
    pub message: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BrandInfo {
    pub name: String,
    pub icon: String,
    pub color: String,
}
