pub mod llm;
pub mod speech;
