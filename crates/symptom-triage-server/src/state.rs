//! Shared request state.

use std::sync::Arc;

use chrono::NaiveDate;
use symptom_triage_core::PredictionService;

/// Source of "today" for the scheduling rules.
pub type TodayFn = fn() -> NaiveDate;

fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Read-only state handed to every handler.
///
/// The predictor is built before the server starts, so a constructed
/// `AppState` always has a ready model.
#[derive(Clone)]
pub struct AppState {
    pub predictor: Arc<dyn PredictionService>,
    today: TodayFn,
}

impl AppState {
    pub fn new(predictor: Arc<dyn PredictionService>) -> Self {
        Self {
            predictor,
            today: local_today,
        }
    }

    /// Pin the scheduler's notion of today (tests).
    pub fn with_today(mut self, today: TodayFn) -> Self {
        self.today = today;
        self
    }

    pub fn today(&self) -> NaiveDate {
        (self.today)()
    }

    pub fn model_loaded(&self) -> bool {
        self.predictor.is_ready()
    }
}
