use std::time::Duration;

use clap::Parser;
use mealscribe_core::domain::common::{
    LLMConfig, MealScribeConfig, PipelineConfig, TranscriptionConfig,
};

#[derive(Debug, Clone, Parser)]
#[command(name = "mealscribe-api", version, about = "MealScribe HTTP API")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub llm: LlmArgs,

    #[command(flatten)]
    pub transcription: TranscriptionArgs,

    #[command(flatten)]
    pub pipeline: PipelineArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ServerArgs {
    #[arg(long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long = "server-port", env = "SERVER_PORT", default_value_t = 3333)]
    pub port: u16,

    #[arg(long = "server-root-path", env = "SERVER_ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long = "allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:5173"
    )]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, clap::Args)]
pub struct LlmArgs {
    #[arg(long = "gemini-api-key", env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: String,

    #[arg(long = "gemini-model", env = "GEMINI_MODEL", default_value = "gemini-2.0-flash")]
    pub gemini_model: String,

    #[arg(
        long = "gemini-base-url",
        env = "GEMINI_BASE_URL",
        default_value = "https://generativelanguage.googleapis.com/v1beta"
    )]
    pub gemini_base_url: String,

    #[arg(
        id = "llm_request_timeout_secs",
        long = "llm-request-timeout-secs",
        env = "LLM_REQUEST_TIMEOUT_SECS",
        default_value_t = 60
    )]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, clap::Args)]
pub struct TranscriptionArgs {
    #[arg(long = "transcription-api-key", env = "TRANSCRIPTION_API_KEY", hide_env_values = true)]
    pub api_key: String,

    #[arg(
        long = "transcription-base-url",
        env = "TRANSCRIPTION_BASE_URL",
        default_value = "https://api.groq.com/openai/v1"
    )]
    pub base_url: String,

    #[arg(
        long = "transcription-model",
        env = "TRANSCRIPTION_MODEL",
        default_value = "whisper-large-v3-turbo"
    )]
    pub model: String,

    #[arg(
        id = "transcription_request_timeout_secs",
        long = "transcription-timeout-secs",
        env = "TRANSCRIPTION_TIMEOUT_SECS",
        default_value_t = 60
    )]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, clap::Args)]
pub struct PipelineArgs {
    #[arg(long = "extraction-temperature", env = "EXTRACTION_TEMPERATURE", default_value_t = 0.1)]
    pub extraction_temperature: f32,

    #[arg(long = "extraction-max-tokens", env = "EXTRACTION_MAX_TOKENS", default_value_t = 1024)]
    pub extraction_max_tokens: u32,

    #[arg(long = "extraction-timeout-secs", env = "EXTRACTION_TIMEOUT_SECS", default_value_t = 30)]
    pub extraction_timeout_secs: u64,

    #[arg(long = "insight-temperature", env = "INSIGHT_TEMPERATURE", default_value_t = 0.3)]
    pub insight_temperature: f32,

    #[arg(long = "insight-max-tokens", env = "INSIGHT_MAX_TOKENS", default_value_t = 400)]
    pub insight_max_tokens: u32,

    #[arg(long = "insight-timeout-secs", env = "INSIGHT_TIMEOUT_SECS", default_value_t = 15)]
    pub insight_timeout_secs: u64,

    #[arg(long = "insight-concurrency", env = "INSIGHT_CONCURRENCY", default_value_t = 8)]
    pub insight_concurrency: usize,
}

#[derive(Debug, Clone, clap::Args)]
pub struct LogArgs {
    #[arg(long = "log-filter", env = "LOG_FILTER", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON", default_value_t = false)]
    pub json: bool,
}

impl From<Args> for MealScribeConfig {
    fn from(args: Args) -> Self {
        Self {
            llm: LLMConfig {
                gemini_api_key: args.llm.gemini_api_key,
                gemini_model: args.llm.gemini_model,
                gemini_base_url: args.llm.gemini_base_url,
                request_timeout: Duration::from_secs(args.llm.request_timeout_secs),
            },
            transcription: TranscriptionConfig {
                api_key: args.transcription.api_key,
                base_url: args.transcription.base_url,
                model: args.transcription.model,
                request_timeout: Duration::from_secs(args.transcription.request_timeout_secs),
            },
            pipeline: PipelineConfig {
                extraction_temperature: args.pipeline.extraction_temperature,
                extraction_max_tokens: args.pipeline.extraction_max_tokens,
                extraction_timeout: Duration::from_secs(args.pipeline.extraction_timeout_secs),
                insight_temperature: args.pipeline.insight_temperature,
                insight_max_tokens: args.pipeline.insight_max_tokens,
                insight_timeout: Duration::from_secs(args.pipeline.insight_timeout_secs),
                insight_concurrency: args.pipeline.insight_concurrency,
            },
        }
    }
}
