//! # State Navigator
//!
//! Binds a navigation history to application state:
//!
//! - **Typed Routes** - A [`RouteCodec`] turns pathnames into your route type and back
//! - **Async Transitions** - Each navigation runs a [`StateTransition`] producing the next state
//! - **Navigation From State** - Payloads may carry a [`NavigationRequest`] that gets dispatched
//! - **Blocking Prompts** - A [`TransitionBlocker`] asks for confirmation before leaving
//! - **Narrowing** - Write route logic against a sub-state and lift it with a [`Lens`]
//! - **Memory History** - An in-process [`MemoryHistory`] for tests and non-browser hosts
//!
//! # Quick Start
//!
//! ```
//! use state_navigator::*;
//! use std::sync::Arc;
//!
//! #[derive(Debug, Clone, PartialEq)]
//! enum Page { Home, Item(u32), NotFound }
//!
//! enum Msg { Open(u32), Opened }
//!
//! let history = Arc::new(MemoryHistory::new("/"));
//!
//! let bindings = CoordinatorBuilder::<Page, Msg, Page>::new()
//!     .history(history.clone())
//!     .codec(codec_fn(
//!         |path: &str| match path {
//!             "/" => Some(Page::Home),
//!             _ => path.strip_prefix("/items/")?.parse().ok().map(Page::Item),
//!         },
//!         |page: &Page| match page {
//!             Page::Item(id) => format!("/items/{id}"),
//!             _ => "/".to_string(),
//!         },
//!     ))
//!     .not_found(Page::NotFound)
//!     .extractor(|msg: Msg| match msg {
//!         Msg::Open(id) => Extracted::navigate(NavigationRequest::push_route(Page::Item(id)), Msg::Opened),
//!         other => Extracted::pass(other),
//!     })
//!     .default_state(|_response, page: &Page| page.clone())
//!     .transition(transition_fn(
//!         |page: Page, _response: NavigationResponse, _state: Page| async move { (page, None) },
//!     ))
//!     .build()
//!     .unwrap();
//!
//! // A payload asking for navigation is dispatched to the history
//! let state = StateThunk::of(bindings.default_state.clone());
//! bindings.sync_side_effect.run(Msg::Open(3), state);
//! assert_eq!(history.location().pathname, "/items/3");
//! ```
//!
//! # Hooks
//!
//! [`CoordinatorBuilder::build`] hands out [`Bindings`]. The host drives them:
//!
//! - [`SyncSideEffect::run`] for every payload it produces
//! - [`OnMount::run`] once, when it becomes active
//! - [`AsyncCallbackRegistrar`] to run the transition after each navigation
//! - [`SyncCallbackRegistrar`] (only with a blocker) to confirm before leaving
//!
//! # Feature Flags
//!
//! - `log` (default) - Uses the standard `log` crate for logging
//! - `tracing` - Uses the `tracing` crate for structured logging (mutually exclusive with `log`)
//! - `cache` (default) - LRU cache for parsed routes, see [`CoordinatorBuilder::parse_cache`]

#![doc(html_root_url = "https://docs.rs/state-navigator/0.1.0")]
#![cfg_attr(docsrs, feature(doc_cfg))]
// Lints are configured in Cargo.toml [lints] section

// Logging abstraction
pub mod logging;

// Cache (optional)
#[cfg(feature = "cache")]
pub mod cache;

// Navigation vocabulary
pub mod request;
pub mod response;

// History
pub mod history;

// Route and state plumbing
pub mod codec;
pub mod extract;
pub mod guards;
pub mod narrow;
pub mod state;

// Error handling
pub mod error;

// Coordinator
pub mod coordinator;

// Re-export main types for convenient access
#[cfg(feature = "cache")]
pub use cache::{CacheStats, RouteCache};
pub use codec::{codec_fn, FnCodec, RouteCodec};
pub use coordinator::{
    AsyncCallbackRegistrar, AsyncStateStep, Bindings, CoordinatorBuilder, OnMount, StepOutput,
    SyncCallbackRegistrar, SyncSideEffect,
};
pub use error::{ConfigError, HistoryError};
pub use extract::{ExtractNavigation, Extracted, NoNavigation};
pub use guards::{blocker_fn, Blockers, BoxedBlocker, FnBlocker, TransitionBlocker};
pub use history::{
    Blocker, Confirmation, HistoryAction, HistoryProvider, Listener, Location, MemoryHistory,
    Subscription,
};
pub use narrow::{narrow_blocker, narrow_transition, Lens, Narrowed};
pub use request::{FoldNavigationRequest, NavigationRequest};
pub use response::NavigationResponse;
pub use state::{transition_fn, BoxFuture, BoxedTransition, FnTransition, StateThunk, StateTransition};
