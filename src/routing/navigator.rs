//! History-driven navigation.
//!
//! # Responsibilities
//! - Validate navigation targets against the mount prefix
//! - Resolve targets through the route table
//! - Keep history and the mounted view in step with the navigation state
//!
//! # Design Decisions
//! - Single owner: every transition takes `&mut self`, no locks
//! - Invalid targets leave history, state and views untouched
//! - Navigating to the current path is a no-op (no push, no remount)
//! - Pop events (back/forward) never push a new entry

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::routing::history::History;
use crate::routing::matcher::RouteParams;
use crate::routing::router::{Resolution, RouteTable, ViewId};

/// Receives mount notifications for resolved views.
pub trait ViewHost {
    /// Mount `view`. `props` is present only for routes that forward parameters.
    fn mount(&mut self, view: &ViewId, props: Option<&RouteParams>);

    /// Unmount the previously mounted `view`.
    fn unmount(&mut self, view: &ViewId);
}

/// A notification delivered to a [`ViewHost`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ViewEvent {
    Mount {
        view: ViewId,
        #[serde(skip_serializing_if = "Option::is_none")]
        props: Option<RouteParams>,
    },
    Unmount {
        view: ViewId,
    },
}

/// A host that records every notification it receives.
#[derive(Debug, Default)]
pub struct RecordingHost {
    events: Vec<ViewEvent>,
    mounted: Option<ViewId>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[ViewEvent] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<ViewEvent> {
        std::mem::take(&mut self.events)
    }

    /// The view currently mounted, if any.
    pub fn mounted(&self) -> Option<&ViewId> {
        self.mounted.as_ref()
    }
}

impl ViewHost for RecordingHost {
    fn mount(&mut self, view: &ViewId, props: Option<&RouteParams>) {
        self.mounted = Some(view.clone());
        self.events.push(ViewEvent::Mount {
            view: view.clone(),
            props: props.cloned(),
        });
    }

    fn unmount(&mut self, view: &ViewId) {
        if self.mounted.as_ref() == Some(view) {
            self.mounted = None;
        }
        self.events.push(ViewEvent::Unmount { view: view.clone() });
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("navigation path is empty")]
    EmptyPath,

    #[error("path '{path}' is outside the application base '{base}'")]
    OutsideBase { path: String, base: String },
}

/// Current location as seen by the navigator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationState {
    /// Full path, including base, query and fragment.
    pub path: String,

    pub view: ViewId,

    /// Index of the matched route; `None` when the fallback is shown.
    pub route: Option<usize>,

    /// Every parameter extracted from the path.
    pub params: RouteParams,

    /// Whether the parameters are forwarded to the view.
    pub props: bool,
}

impl NavigationState {
    fn new(path: &str, resolution: Resolution) -> Self {
        Self {
            path: path.to_string(),
            view: resolution.view,
            route: resolution.route,
            params: resolution.params,
            props: resolution.props,
        }
    }

    /// The read-only projection handed to the mounted view.
    pub fn view_props(&self) -> Option<&RouteParams> {
        self.props.then_some(&self.params)
    }

    pub fn is_fallback(&self) -> bool {
        self.route.is_none()
    }
}

/// Dispatches navigation events to views.
#[derive(Debug)]
pub struct Navigator<H, V> {
    routes: Arc<RouteTable>,
    base: String,
    history: H,
    host: V,
    state: NavigationState,
}

impl<H: History, V: ViewHost> Navigator<H, V> {
    /// Resolve `initial`, record it as the current history entry and mount
    /// its view.
    pub fn start(
        routes: Arc<RouteTable>,
        base: &str,
        mut history: H,
        mut host: V,
        initial: &str,
    ) -> Result<Self, NavigationError> {
        let base = normalize_base(base);
        let relative = relative_path(&base, initial)?;
        let resolution = routes.resolve(&relative);

        history.replace(initial);
        host.mount(&resolution.view, resolution.forwarded_params());

        tracing::debug!(path = %initial, view = %resolution.view, "Navigator started");

        Ok(Self {
            routes,
            base,
            history,
            host,
            state: NavigationState::new(initial, resolution),
        })
    }

    /// Navigate to `path`, pushing a new history entry.
    pub fn navigate(&mut self, path: &str) -> Result<&NavigationState, NavigationError> {
        let relative = relative_path(&self.base, path)?;
        if self.state.path == path {
            tracing::debug!(path = %path, "Already at path, navigation ignored");
            return Ok(&self.state);
        }

        self.history.push(path);
        Ok(self.transition(path, &relative))
    }

    /// Handle a history pop (the location already changed to `path`).
    pub fn on_pop(&mut self, path: &str) -> Result<&NavigationState, NavigationError> {
        let relative = relative_path(&self.base, path)?;
        if self.state.path == path {
            return Ok(&self.state);
        }
        Ok(self.transition(path, &relative))
    }

    /// Step back in history. `Ok(None)` when there is nothing to go back to.
    pub fn back(&mut self) -> Result<Option<&NavigationState>, NavigationError> {
        let location = self.history.back().map(str::to_owned);
        match location {
            Some(path) => self.on_pop(&path).map(Some),
            None => Ok(None),
        }
    }

    /// Step forward in history. `Ok(None)` when already at the newest entry.
    pub fn forward(&mut self) -> Result<Option<&NavigationState>, NavigationError> {
        let location = self.history.forward().map(str::to_owned);
        match location {
            Some(path) => self.on_pop(&path).map(Some),
            None => Ok(None),
        }
    }

    pub fn current(&self) -> &NavigationState {
        &self.state
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn host(&self) -> &V {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut V {
        &mut self.host
    }

    fn transition(&mut self, path: &str, relative: &str) -> &NavigationState {
        let resolution = self.routes.resolve(relative);

        self.host.unmount(&self.state.view);
        self.host.mount(&resolution.view, resolution.forwarded_params());

        tracing::debug!(
            from = %self.state.path,
            to = %path,
            view = %resolution.view,
            "Navigated"
        );

        self.state = NavigationState::new(path, resolution);
        &self.state
    }
}

fn normalize_base(base: &str) -> String {
    let trimmed = base.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// Path relative to `base`, always starting with `/`.
fn relative_path(base: &str, path: &str) -> Result<String, NavigationError> {
    if path.is_empty() {
        return Err(NavigationError::EmptyPath);
    }
    let outside = || NavigationError::OutsideBase {
        path: path.to_string(),
        base: base.to_string(),
    };
    if !path.starts_with('/') {
        return Err(outside());
    }
    if base == "/" {
        return Ok(path.to_string());
    }

    let rest = path.strip_prefix(base).ok_or_else(outside)?;
    match rest.chars().next() {
        None => Ok("/".to_string()),
        Some('/') => Ok(rest.to_string()),
        Some('?') | Some('#') => Ok(format!("/{rest}")),
        Some(_) => Err(outside()),
    }
}
