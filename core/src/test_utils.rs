use std::{collections::HashMap, sync::Mutex, time::Duration};

use crate::domain::{
    common::entities::app_errors::CoreError,
    nutrition::{
        entities::{DEFAULT_UNIT, FoodItem},
        ports::LLMClient,
        value_objects::GenerationRequest,
    },
    transcription::{entities::TranscriptionResult, ports::SpeechToTextClient},
};

/// What a scripted collaborator does with a request.
#[derive(Debug, Clone)]
pub(crate) enum Reply {
    Text(String),
    Delayed(Duration, String),
    Fail(String),
    Hang,
}

impl Reply {
    async fn resolve(self) -> Result<String, CoreError> {
        match self {
            Reply::Text(text) => Ok(text),
            Reply::Delayed(delay, text) => {
                tokio::time::sleep(delay).await;
                Ok(text)
            }
            Reply::Fail(message) => Err(CoreError::ExternalServiceError(message)),
            Reply::Hang => {
                tokio::time::sleep(Duration::from_secs(24 * 60 * 60)).await;
                Err(CoreError::ExternalServiceError("hung".to_string()))
            }
        }
    }
}

/// Text-generation fake. Insight requests are recognised by their
/// `Food: <name>` first line and answered per item name; everything else is
/// treated as the primary extraction call.
pub(crate) struct ScriptedLLMClient {
    extraction: Reply,
    insights: HashMap<String, Reply>,
    default_insight: Reply,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedLLMClient {
    pub(crate) fn new(extraction: Reply) -> Self {
        Self {
            extraction,
            insights: HashMap::new(),
            default_insight: Reply::Text("[]".to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_insight(mut self, item_name: &str, reply: Reply) -> Self {
        self.insights.insert(item_name.to_string(), reply);
        self
    }

    pub(crate) fn with_default_insight(mut self, reply: Reply) -> Self {
        self.default_insight = reply;
        self
    }

    pub(crate) fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn reply_for(&self, request: &GenerationRequest) -> Reply {
        let first_line = request.user_message.lines().next().unwrap_or_default();
        match first_line.strip_prefix("Food: ") {
            Some(name) => self
                .insights
                .get(name)
                .unwrap_or(&self.default_insight)
                .clone(),
            None => self.extraction.clone(),
        }
    }
}

impl LLMClient for ScriptedLLMClient {
    async fn generate(&self, request: GenerationRequest) -> Result<String, CoreError> {
        let reply = self.reply_for(&request);
        self.requests.lock().unwrap().push(request);
        reply.resolve().await
    }
}

/// Speech-to-text fake returning a fixed outcome.
pub(crate) struct FakeSpeechClient {
    outcome: Result<TranscriptionResult, CoreError>,
    calls: Mutex<Vec<String>>,
}

impl FakeSpeechClient {
    pub(crate) fn returning(text: &str, language: Option<&str>) -> Self {
        Self {
            outcome: Ok(TranscriptionResult {
                text: text.to_string(),
                language: language.map(str::to_string),
            }),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing(error: CoreError) -> Self {
        Self {
            outcome: Err(error),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn filenames(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl SpeechToTextClient for FakeSpeechClient {
    async fn transcribe(
        &self,
        _audio: Vec<u8>,
        filename: String,
    ) -> Result<TranscriptionResult, CoreError> {
        self.calls.lock().unwrap().push(filename);
        self.outcome.clone()
    }
}

pub(crate) fn food_item(name: &str, calories: f64) -> FoodItem {
    FoodItem::new(
        name.to_string(),
        calories,
        None,
        1.0,
        DEFAULT_UNIT.to_string(),
        format!("1 serving of {name}"),
    )
}

pub(crate) fn insight_json(kind: &str, title: &str) -> String {
    format!(
        r#"{{"type": "{kind}", "title": "{title}", "message": "A short note about {title}.", "icon": "🍽️"}}"#
    )
}

#[test]
fn scripted_client_routes_insight_requests_by_name() {
    let client = ScriptedLLMClient::new(Reply::Text("extraction".to_string()))
        .with_insight("tea", Reply::Text("tea insights".to_string()));
    let request = |message: &str| GenerationRequest {
        system_instructions: String::new(),
        user_message: message.to_string(),
        temperature: 0.0,
        max_output_tokens: 1,
        response_schema: None,
    };

    let text_for = |message: &str| match client.reply_for(&request(message)) {
        Reply::Text(text) => text,
        _ => panic!("expected a text reply for {message:?}"),
    };

    assert_eq!(text_for("Food: tea\nQuantity: 1 cup"), "tea insights");
    assert_eq!(text_for("Food: teapot\nQuantity: 1"), "[]");
    assert_eq!(text_for("tea and cake"), "extraction");
}
