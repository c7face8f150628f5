use std::sync::Arc;

use mealscribe_core::application::MealScribeService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: MealScribeService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: MealScribeService) -> Self {
        Self { args, service }
    }
}
