//! In-memory sweep state.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::foundation::DomainError;
use crate::ports::SweepStateStore;

#[derive(Default)]
pub struct InMemorySweepState {
    last_run: Mutex<Option<NaiveDate>>,
}

impl InMemorySweepState {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SweepStateStore for InMemorySweepState {
    async fn last_run(&self) -> Result<Option<NaiveDate>, DomainError> {
        Ok(*self.last_run.lock().expect("InMemorySweepState lock poisoned"))
    }

    async fn record_run(&self, date: NaiveDate) -> Result<(), DomainError> {
        *self.last_run.lock().expect("InMemorySweepState lock poisoned") = Some(date);
        Ok(())
    }
}
