//! Scripted transport and wiring helpers shared by unit tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use async_trait::async_trait;
use futures::channel::oneshot;

use crate::config::GuardConfig;
use crate::error::TransportError;
use crate::net::{ApiRequest, ApiResponse, HttpClient, Transport};
use crate::session::{MemorySessionStore, Session, SessionEvent, SessionEvents, SessionStore};

enum Reply {
    Ready(Result<ApiResponse, TransportError>),
    Deferred(oneshot::Receiver<ApiResponse>),
}

/// Answers requests from a FIFO script and records everything it was sent.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    replies: RefCell<VecDeque<Reply>>,
    requests: RefCell<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub(crate) fn reply(&self, status: u16, body: serde_json::Value) {
        self.push(Reply::Ready(Ok(ApiResponse::json(status, &body))));
    }

    pub(crate) fn reply_text(&self, status: u16, body: &str) {
        self.push(Reply::Ready(Ok(ApiResponse::new(status, body))));
    }

    pub(crate) fn fail(&self, message: &str) {
        self.push(Reply::Ready(Err(TransportError::new(message))));
    }

    /// Queue a reply that stays pending until the returned sender fires.
    pub(crate) fn defer(&self) -> oneshot::Sender<ApiResponse> {
        let (tx, rx) = oneshot::channel();
        self.push(Reply::Deferred(rx));
        tx
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }

    fn push(&self, reply: Reply) {
        self.replies.borrow_mut().push_back(reply);
    }
}

#[async_trait(?Send)]
impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        self.requests.borrow_mut().push(request);
        let reply = self.replies.borrow_mut().pop_front();
        match reply {
            Some(Reply::Ready(result)) => result,
            Some(Reply::Deferred(rx)) => rx.await.map_err(|_| TransportError::new("request aborted")),
            None => Err(TransportError::new("no scripted reply")),
        }
    }
}

/// Store, transport, events, and an `HttpClient` over them.
pub(crate) struct Harness {
    pub(crate) store: Rc<MemorySessionStore>,
    pub(crate) transport: Rc<ScriptedTransport>,
    pub(crate) events: SessionEvents,
    pub(crate) seen: Rc<RefCell<Vec<SessionEvent>>>,
    pub(crate) http: Rc<HttpClient>,
}

impl Harness {
    pub(crate) fn new(session: Session) -> Self {
        Self::with_config(&GuardConfig::default(), session)
    }

    pub(crate) fn with_config(config: &GuardConfig, session: Session) -> Self {
        let store = Rc::new(MemorySessionStore::with_session(session));
        let transport = ScriptedTransport::new();
        let events = SessionEvents::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        events.subscribe(move |event| sink.borrow_mut().push(event.clone()));
        let store_dyn: Rc<dyn SessionStore> = store.clone();
        let transport_dyn: Rc<dyn Transport> = transport.clone();
        let http = Rc::new(HttpClient::new(config, transport_dyn, store_dyn, events.clone()));
        Self { store, transport, events, seen, http }
    }

    pub(crate) fn store_dyn(&self) -> Rc<dyn SessionStore> {
        self.store.clone()
    }

    pub(crate) fn events_seen(&self) -> Vec<SessionEvent> {
        self.seen.borrow().clone()
    }
}
