//! Browser glue: console logging, the forced-logout reload, and the Leptos
//! router hook that runs the navigation guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! Everything here needs a live `window` and a Leptos reactive owner, so it is
//! compiled only under `hydrate`. The decision logic it calls is native.

use std::cell::Cell;
use std::rc::Rc;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_location;

use crate::routing::{Evaluation, GuardDecision, NavigationGuard};
use crate::session::{SessionEvent, SessionEvents, Subscription};

/// Route content visibility while the guard is deciding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardStatus {
    Checking,
    Allowed(String),
}

/// Route panics and `log` output to the browser console.
pub fn init_logging(level: log::Level) {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(level).is_err() {
        log::debug!("shell: logger already installed");
    }
}

/// Turn `SessionEvent::Invalidated` into a full-document navigation to the
/// login page. Fires at most once per page lifetime; the reload discards all
/// in-memory state anyway.
pub fn install_forced_logout(events: &SessionEvents, login_path: &str) -> Subscription {
    let fired = Rc::new(Cell::new(false));
    let target = login_path.to_owned();
    events.subscribe(move |event| {
        if *event != SessionEvent::Invalidated || fired.replace(true) {
            return;
        }
        log::warn!("shell: session invalidated by server; reloading {target}");
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(err) = window.location().set_href(&target) {
            log::error!("shell: forced logout navigation failed: {err:?}");
        }
    })
}

/// Run the guard on every location change and apply redirects in place.
///
/// Returns a signal that route views can use to hold back protected content
/// until the current path is allowed.
pub fn install_route_guard<F>(guard: Rc<NavigationGuard>, navigate: F) -> RwSignal<GuardStatus>
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    let status = RwSignal::new(GuardStatus::Checking);
    let location = use_location();
    Effect::new(move || {
        let path = location.pathname.get();
        status.set(GuardStatus::Checking);
        let guard = Rc::clone(&guard);
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            match guard.evaluate(&path).await {
                Evaluation::Decided(GuardDecision::Allow) => status.set(GuardStatus::Allowed(path)),
                Evaluation::Decided(GuardDecision::RedirectTo(to)) => {
                    navigate(&to, NavigateOptions { replace: true, ..NavigateOptions::default() });
                }
                Evaluation::Superseded => {}
            }
        });
    });
    status
}
