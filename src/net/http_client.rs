//! Session-aware HTTP client used for every portal API call.
//!
//! SYSTEM CONTEXT
//! ==============
//! Outgoing requests are decorated with the stored bearer credential, if
//! any. Anonymous requests still go out; the server decides.
//!
//! A 401 response is the forced-logout trigger: the store is cleared and
//! `SessionEvent::Invalidated` is emitted for the shell to turn into a hard
//! reload of the login page. Repeated 401s are harmless because clearing an
//! empty store is a no-op.
//!
//! EDGE CASES
//! ==========
//! Every 401 clears the store, including a late 401 for a credential that
//! has since been replaced and a 401 on an anonymous request. Only a 401 on
//! a request that carried a credential emits `Invalidated`, so a failed
//! login never reloads the login page.

#[cfg(test)]
#[path = "http_client_test.rs"]
mod http_client_test;

use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::GuardConfig;
use crate::error::{ApiError, TransportError};
use crate::session::{Credential, SessionEvent, SessionEvents, SessionStore};

use super::transport::{
    AUTHORIZATION, ApiRequest, ApiResponse, CONTENT_TYPE, JSON_CONTENT_TYPE, Transport,
};

pub struct HttpClient {
    transport: Rc<dyn Transport>,
    store: Rc<dyn SessionStore>,
    events: SessionEvents,
    config: GuardConfig,
}

impl HttpClient {
    pub fn new(
        config: &GuardConfig,
        transport: Rc<dyn Transport>,
        store: Rc<dyn SessionStore>,
        events: SessionEvents,
    ) -> Self {
        Self { transport, store, events, config: config.clone() }
    }

    /// Send a request through the credential decorator and the 401 interceptor.
    ///
    /// Any HTTP status is returned as `Ok`; a 401 has already cleared the
    /// session by the time the caller sees it.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if no response was received.
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let carried = self.store.get().credential().cloned();
        let request = self.decorate(request, carried.as_ref());
        let response = self.transport.send(request).await?;
        if response.is_unauthorized() {
            self.invalidate(carried.is_some());
        }
        Ok(response)
    }

    fn decorate(&self, request: ApiRequest, credential: Option<&Credential>) -> ApiRequest {
        let mut request = ApiRequest { path: self.config.url(&request.path), ..request };
        if request.header(CONTENT_TYPE).is_none() {
            request = request.with_header(CONTENT_TYPE, JSON_CONTENT_TYPE);
        }
        match credential {
            Some(credential) => request.with_header(AUTHORIZATION, credential.bearer()),
            None => request,
        }
    }

    fn invalidate(&self, carried_credential: bool) {
        self.store.clear();
        if !carried_credential {
            log::debug!("http: 401 on anonymous request; session cleared without reload");
            return;
        }
        log::warn!("http: server rejected session credential; forcing logout");
        self.events.emit(&SessionEvent::Invalidated);
    }

    /// # Errors
    ///
    /// See [`HttpClient::call`].
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.call(ApiRequest::get(path)).await
    }

    /// # Errors
    ///
    /// See [`HttpClient::call`].
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.call(ApiRequest::post(path).with_json(encode(body)?)).await
    }

    /// # Errors
    ///
    /// See [`HttpClient::call`].
    pub async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.call(ApiRequest::put(path).with_json(encode(body)?)).await
    }

    /// # Errors
    ///
    /// See [`HttpClient::call`].
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let response = self.send(ApiRequest::delete(path)).await?;
        check_status(response).map(drop)
    }

    /// Send and decode a JSON response.
    ///
    /// # Errors
    ///
    /// `Transport` when nothing came back, `Unauthorized` on 401 (the session
    /// is already cleared), `Status` for any other non-2xx, `Decode` when the
    /// body is not the expected shape.
    pub async fn call<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        let response = check_status(self.send(request).await?)?;
        response.decode().map_err(|e| ApiError::Decode(e.to_string()))
    }
}

fn encode<B: Serialize + ?Sized>(body: &B) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))
}

fn check_status(response: ApiResponse) -> Result<ApiResponse, ApiError> {
    if response.is_success() {
        Ok(response)
    } else if response.is_unauthorized() {
        Err(ApiError::Unauthorized)
    } else {
        Err(ApiError::Status { status: response.status, body: response.body })
    }
}
