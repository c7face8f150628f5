use std::{sync::Arc, time::Duration};

use futures::future::join_all;
use tokio::sync::Semaphore;
use tracing::{debug, instrument, warn};

use crate::domain::{
    common::{PipelineConfig, entities::app_errors::CoreError},
    nutrition::{
        brands::match_brand,
        entities::{FoodItem, HealthInsight},
        ports::LLMClient,
        prompts::{insight_instructions, insight_request},
        sanitizer::sanitize,
        schema::{insights_schema, parse_insights},
        value_objects::GenerationRequest,
    },
};

/// Attaches brand and health insights to extracted items.
///
/// One collaborator call per item, issued concurrently and joined at a
/// barrier. Each item is its own failure domain: an error or timeout leaves
/// that item with no insights and never reaches the caller.
pub struct InsightGenerator<LLM: LLMClient> {
    llm_client: Arc<LLM>,
    temperature: f32,
    max_output_tokens: u32,
    timeout: Duration,
    concurrency: usize,
}

impl<LLM: LLMClient> Clone for InsightGenerator<LLM> {
    fn clone(&self) -> Self {
        Self {
            llm_client: self.llm_client.clone(),
            temperature: self.temperature,
            max_output_tokens: self.max_output_tokens,
            timeout: self.timeout,
            concurrency: self.concurrency,
        }
    }
}

impl<LLM: LLMClient> InsightGenerator<LLM> {
    pub fn new(llm_client: Arc<LLM>, config: &PipelineConfig) -> Self {
        Self {
            llm_client,
            temperature: config.insight_temperature,
            max_output_tokens: config.insight_max_tokens,
            timeout: config.insight_timeout,
            concurrency: config.insight_concurrency.max(1),
        }
    }

    /// Returns the same items, in the same order, with `brand` and
    /// `insights` filled in.
    #[instrument(skip_all, fields(item_count = items.len()))]
    pub async fn annotate(&self, items: Vec<FoodItem>) -> Vec<FoodItem> {
        let permits = Semaphore::new(self.concurrency);
        let permits = &permits;

        join_all(
            items
                .into_iter()
                .enumerate()
                .map(|(index, item)| self.annotate_item(index, item, permits)),
        )
        .await
    }

    async fn annotate_item(
        &self,
        index: usize,
        mut item: FoodItem,
        permits: &Semaphore,
    ) -> FoodItem {
        item.brand = match_brand(item.context.as_deref());

        let insights = match permits.acquire().await {
            Ok(_permit) => self.fetch_insights(&item).await,
            Err(e) => Err(CoreError::ExternalServiceError(e.to_string())),
        };

        item.insights = match insights {
            Ok(insights) => {
                debug!(index, item = %item.name, count = insights.len(), "insights generated");
                insights
            }
            Err(e) => {
                warn!(
                    index,
                    item = %item.name,
                    error = %e,
                    "insight generation failed, continuing without insights"
                );
                Vec::new()
            }
        };

        item
    }

    async fn fetch_insights(&self, item: &FoodItem) -> Result<Vec<HealthInsight>, CoreError> {
        let request = GenerationRequest {
            system_instructions: insight_instructions().to_string(),
            user_message: insight_request(item),
            temperature: self.temperature,
            max_output_tokens: self.max_output_tokens,
            response_schema: Some(insights_schema()),
        };

        let raw = tokio::time::timeout(self.timeout, self.llm_client.generate(request))
            .await
            .map_err(|_| {
                CoreError::ExternalServiceError(format!(
                    "insight request timed out after {:?}",
                    self.timeout
                ))
            })??;

        Ok(parse_insights(&sanitize(&raw)))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::time::Instant;

    use super::*;
    use crate::{
        domain::nutrition::entities::InsightType,
        test_utils::{Reply, ScriptedLLMClient, food_item, insight_json},
    };

    fn generator(
        client: ScriptedLLMClient,
        config: PipelineConfig,
    ) -> InsightGenerator<ScriptedLLMClient> {
        InsightGenerator::new(Arc::new(client), &config)
    }

    #[tokio::test]
    async fn test_failed_item_gets_empty_insights_and_order_is_kept() {
        let client = ScriptedLLMClient::new(Reply::Text(String::new()))
            .with_default_insight(Reply::Text(insight_json("info", "Fine")))
            .with_insight("item 3", Reply::Fail("upstream 500".to_string()));
        let generator = generator(client, PipelineConfig::default());

        let items: Vec<FoodItem> = (1..=5)
            .map(|i| food_item(&format!("item {i}"), 100.0))
            .collect();
        let annotated = generator.annotate(items).await;

        assert_eq!(annotated.len(), 5);
        for (i, item) in annotated.iter().enumerate() {
            assert_eq!(item.name, format!("item {}", i + 1));
            if i == 2 {
                assert!(item.insights.is_empty());
            } else {
                assert_eq!(item.insights.len(), 1);
                assert_eq!(item.insights[0].kind, InsightType::Info);
            }
        }
    }

    #[tokio::test]
    async fn test_malformed_insight_response_is_swallowed() {
        let client = ScriptedLLMClient::new(Reply::Text(String::new()))
            .with_default_insight(Reply::Text("I think this is healthy!".to_string()))
            .with_insight(
                "soup",
                Reply::Text(format!("```json\n[{},]\n```", insight_json("positive", "Warming"))),
            );
        let generator = generator(client, PipelineConfig::default());

        let annotated = generator
            .annotate(vec![food_item("soup", 150.0), food_item("cake", 400.0)])
            .await;

        assert_eq!(annotated[0].insights.len(), 1);
        assert_eq!(annotated[0].insights[0].title, "Warming");
        assert!(annotated[1].insights.is_empty());
    }

    #[tokio::test]
    async fn test_brand_is_attached_from_context() {
        let client = ScriptedLLMClient::new(Reply::Text(String::new()))
            .with_default_insight(Reply::Text("[]".to_string()));
        let generator = generator(client, PipelineConfig::default());

        let mut burger = food_item("Big Mac", 550.0);
        burger.context = Some("lunch from mcd's today".to_string());
        let salad = food_item("Salad", 150.0);

        let annotated = generator.annotate(vec![burger, salad]).await;
        assert_eq!(
            annotated[0].brand.as_ref().map(|brand| brand.name.as_str()),
            Some("McDonald's")
        );
        assert!(annotated[1].brand.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_calls_run_concurrently() {
        let client = ScriptedLLMClient::new(Reply::Text(String::new())).with_default_insight(
            Reply::Delayed(Duration::from_secs(1), insight_json("info", "Slow")),
        );
        let generator = generator(client, PipelineConfig::default());

        let items: Vec<FoodItem> = (0..5)
            .map(|i| food_item(&format!("dish {i}"), 10.0))
            .collect();
        let started = Instant::now();
        let annotated = generator.annotate(items).await;

        assert!(started.elapsed() < Duration::from_secs(2));
        assert!(annotated.iter().all(|item| item.insights.len() == 1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrency_cap_limits_in_flight_calls() {
        let client = ScriptedLLMClient::new(Reply::Text(String::new())).with_default_insight(
            Reply::Delayed(Duration::from_secs(1), insight_json("info", "Slow")),
        );
        let config = PipelineConfig {
            insight_concurrency: 2,
            ..PipelineConfig::default()
        };
        let generator = generator(client, config);

        let items: Vec<FoodItem> = (0..4)
            .map(|i| food_item(&format!("dish {i}"), 10.0))
            .collect();
        let started = Instant::now();
        let annotated = generator.annotate(items).await;

        assert!(started.elapsed() >= Duration::from_secs(2));
        assert_eq!(annotated.len(), 4);
        assert_eq!(annotated[3].name, "dish 3");
    }

    #[tokio::test(start_paused = true)]
    async fn test_timed_out_item_only_loses_its_insights() {
        let client = ScriptedLLMClient::new(Reply::Text(String::new()))
            .with_default_insight(Reply::Text(insight_json("positive", "Quick")))
            .with_insight("stew", Reply::Hang);
        let config = PipelineConfig {
            insight_timeout: Duration::from_secs(5),
            ..PipelineConfig::default()
        };
        let generator = generator(client, config);

        let annotated = generator
            .annotate(vec![food_item("toast", 80.0), food_item("stew", 300.0)])
            .await;

        assert_eq!(annotated[0].insights.len(), 1);
        assert!(annotated[1].insights.is_empty());
    }

    #[tokio::test]
    async fn test_empty_input() {
        let client = ScriptedLLMClient::new(Reply::Text(String::new()));
        let generator = generator(client, PipelineConfig::default());
        assert!(generator.annotate(Vec::new()).await.is_empty());
    }
}
