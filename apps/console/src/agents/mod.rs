// Agents: one remote operation per backend endpoint plus the renderer for its result.
// All backend traffic goes through `RemoteAction`; agents never record loading
// or error operations themselves.

pub mod email;
pub mod interview;
pub mod ranking;
pub mod recommendation;
pub mod scheduling;
pub mod sentiment;

use std::future::Future;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::backend::contracts::Acknowledged;
use crate::backend::{BackendClient, BackendError};
use crate::ui::UiPatch;

/// The shared request/loading/report lifecycle of every agent call.
///
/// Records `ShowLoading`, awaits exactly one backend call, records
/// `HideLoading`, then either hands back the response or records a single
/// error toast. Never retries.
#[derive(Debug, Clone, Copy)]
pub struct RemoteAction {
    pub endpoint: &'static str,
    /// Loading overlay text while the call is in flight.
    pub loading: &'static str,
    /// Toast prefix for transport, status and parse failures.
    pub error_context: &'static str,
    /// Toast prefix when the backend answers `success: false`.
    pub failure_context: &'static str,
}

impl RemoteAction {
    /// Runs the lifecycle around an arbitrary backend future.
    pub async fn run<T, F>(&self, ui: &mut UiPatch, request: F) -> Option<T>
    where
        F: Future<Output = Result<T, BackendError>>,
    {
        ui.show_loading(self.loading);
        let result = request.await;
        ui.hide_loading();

        match result {
            Ok(response) => {
                info!("{} succeeded", self.endpoint);
                Some(response)
            }
            Err(err) => {
                warn!("{} failed: {err}", self.endpoint);
                ui.error(format!("{}: {err}", self.error_context));
                None
            }
        }
    }

    /// POSTs `body` as JSON to the action's endpoint.
    pub async fn call<B, T>(&self, client: &BackendClient, ui: &mut UiPatch, body: &B) -> Option<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.run(ui, client.post_json(self.endpoint, body)).await
    }

    /// Like `call`, and a `success: false` reply is reported as a failure.
    pub async fn call_acknowledged<B, T>(
        &self,
        client: &BackendClient,
        ui: &mut UiPatch,
        body: &B,
    ) -> Option<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned + Acknowledged,
    {
        let response = self.call::<B, T>(client, ui, body).await?;
        self.check(ui, response)
    }

    /// For payloads without a `success` field: a `{success: false, message}`
    /// reply is reported with the backend's message instead of failing to decode.
    pub async fn call_enveloped<B, T>(
        &self,
        client: &BackendClient,
        ui: &mut UiPatch,
        body: &B,
    ) -> Option<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let raw = self.call_acknowledged::<B, Value>(client, ui, body).await?;
        match serde_json::from_value(raw) {
            Ok(response) => Some(response),
            Err(err) => {
                let err = BackendError::Parse(err);
                warn!("{} failed: {err}", self.endpoint);
                ui.error(format!("{}: {err}", self.error_context));
                None
            }
        }
    }

    /// Applies the `success` check to an already received response.
    pub fn check<T: Acknowledged>(&self, ui: &mut UiPatch, response: T) -> Option<T> {
        match response.failure() {
            None => Some(response),
            Some(message) => {
                warn!("{} reported failure: {message}", self.endpoint);
                ui.error(format!("{}: {message}", self.failure_context));
                None
            }
        }
    }
}
