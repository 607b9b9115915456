use super::FunctionInvoker;
use crate::{Error, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

/// Scripted function responses, consumed in order.
#[derive(Clone, Default)]
pub struct MockFunctionInvoker {
    responses: Arc<Mutex<VecDeque<std::result::Result<Value, String>>>>,
    calls: Arc<Mutex<Vec<(String, Value)>>>,
}

impl MockFunctionInvoker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(self, response: Value) -> Self {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Ok(response));
        self
    }

    /// Queue an invocation failure, as a transport or non-2xx error would be.
    pub fn with_failure(self, message: &str) -> Self {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Err(message.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn get_call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

#[async_trait]
impl FunctionInvoker for MockFunctionInvoker {
    async fn invoke(&self, name: &str, body: Value) -> Result<Value> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((name.to_string(), body));

        let next = self
            .responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();

        match next {
            Some(Ok(value)) => Ok(value),
            Some(Err(message)) => Err(Error::Invocation(message)),
            None => Ok(Value::Object(Default::default())),
        }
    }
}
