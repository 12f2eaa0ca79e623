//! Navigation history
//!
//! [`HistoryProvider`] is the seam between the coordinator and whatever owns
//! the real session history (a browser, a webview bridge, a test stub).
//! [`MemoryHistory`] is the in-process implementation:
//! - Forward/backward traversal with `go(n)`
//! - Forward entries truncated on push
//! - Configurable history limits
//! - Listeners and blocking prompts

use crate::error::HistoryError;
use crate::{debug_log, error_log, trace_log, warn_log};
use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

// ============================================================================
// Actions and Locations
// ============================================================================

/// The kind of history mutation that produced the current location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HistoryAction {
    Push,
    Pop,
    Replace,
}

impl HistoryAction {
    /// Map a raw action string as reported by a browser-style history.
    ///
    /// `"PUSH"` and `"POP"` are recognised; anything else is treated as a replace.
    pub fn from_raw(action: &str) -> Self {
        match action {
            "PUSH" => Self::Push,
            "POP" => Self::Pop,
            _ => Self::Replace,
        }
    }

    /// Raw spelling of the action
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Push => "PUSH",
            Self::Pop => "POP",
            Self::Replace => "REPLACE",
        }
    }
}

impl fmt::Display for HistoryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A history location split into its path, query and fragment
///
/// `search` keeps its leading `?` and `hash` its leading `#`, both empty when absent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    pub pathname: String,
    pub search: String,
    pub hash: String,
}

impl Location {
    /// Create a location with only a pathname
    pub fn new(pathname: impl Into<String>) -> Self {
        Self {
            pathname: pathname.into(),
            search: String::new(),
            hash: String::new(),
        }
    }

    /// Split a path such as `/items/4?tab=info#top`.
    ///
    /// An empty pathname becomes `/`.
    ///
    /// # Example
    ///
    /// ```
    /// use state_navigator::Location;
    ///
    /// let location = Location::parse("/items/4?tab=info#top");
    /// assert_eq!(location.pathname, "/items/4");
    /// assert_eq!(location.search, "?tab=info");
    /// assert_eq!(location.hash, "#top");
    /// ```
    pub fn parse(path: &str) -> Self {
        let (rest, hash) = match path.find('#') {
            Some(idx) => path.split_at(idx),
            None => (path, ""),
        };
        let (pathname, search) = match rest.find('?') {
            Some(idx) => rest.split_at(idx),
            None => (rest, ""),
        };

        Self {
            pathname: if pathname.is_empty() {
                "/".to_string()
            } else {
                pathname.to_string()
            },
            search: search.to_string(),
            hash: hash.to_string(),
        }
    }

    /// Full path including query and fragment
    pub fn href(&self) -> String {
        format!("{}{}{}", self.pathname, self.search, self.hash)
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::new("/")
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.pathname, self.search, self.hash)
    }
}

// ============================================================================
// Provider Trait
// ============================================================================

/// Callback run after every completed transition
pub type Listener = Arc<dyn Fn(&Location, HistoryAction) + Send + Sync>;

/// Callback asked before every transition.
///
/// Returning `Some(message)` asks for a confirmation prompt with that message.
pub type Blocker = Arc<dyn Fn(&Location, HistoryAction) -> Option<String> + Send + Sync>;

/// Answers a confirmation prompt; `true` lets the transition proceed
pub type Confirmation = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Handle returned by [`HistoryProvider::listen`] and [`HistoryProvider::block`]
///
/// Dropping the handle keeps the callback registered; call
/// [`cancel`](Subscription::cancel) to remove it.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    /// Wrap an unsubscribe function
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// A subscription with nothing to undo
    pub fn noop() -> Self {
        Self { cancel: None }
    }

    /// Remove the registered callback
    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

/// Session history the coordinator reads from and writes to.
///
/// Mutations are fire-and-forget: there is no acknowledgement and no rollback.
/// Implementations must not hold internal locks while running listeners or
/// blockers, since a listener may navigate again.
pub trait HistoryProvider: Send + Sync + 'static {
    /// Current location
    fn location(&self) -> Location;

    /// Action that produced the current location
    fn action(&self) -> HistoryAction;

    /// Push a new entry
    fn push(&self, path: &str);

    /// Replace the current entry
    fn replace(&self, path: &str);

    /// Move through history by `delta` entries
    fn go(&self, delta: isize);

    fn go_back(&self) {
        self.go(-1);
    }

    fn go_forward(&self) {
        self.go(1);
    }

    /// Run `listener` after every transition
    fn listen(&self, listener: Listener) -> Subscription;

    /// Ask `blocker` before every transition
    fn block(&self, blocker: Blocker) -> Subscription;
}

// ============================================================================
// Memory History
// ============================================================================

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| {
        error_log!("Mutex poisoned by a panicking callback, recovering");
        poisoned.into_inner()
    })
}

/// Callbacks keyed by registration id, kept in registration order
struct Registry<T> {
    next_id: u64,
    items: Vec<(u64, T)>,
}

impl<T: Clone> Registry<T> {
    fn new() -> Self {
        Self {
            next_id: 0,
            items: Vec::new(),
        }
    }

    fn insert(&mut self, item: T) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push((id, item));
        id
    }

    fn remove(&mut self, id: u64) {
        self.items.retain(|(item_id, _)| *item_id != id);
    }

    fn snapshot(&self) -> Vec<T> {
        self.items.iter().map(|(_, item)| item.clone()).collect()
    }
}

fn subscribe<T>(registry: &Arc<Mutex<Registry<T>>>, item: T) -> Subscription
where
    T: Clone + Send + 'static,
{
    let id = lock(registry).insert(item);
    let registry = Arc::clone(registry);
    Subscription::new(move || lock(&registry).remove(id))
}

/// Entry stack with a cursor
#[derive(Debug)]
struct Stack {
    entries: Vec<Location>,
    current: usize,
    /// Maximum number of entries (0 = unlimited)
    max_size: usize,
    action: HistoryAction,
}

impl Stack {
    fn current(&self) -> &Location {
        &self.entries[self.current]
    }

    fn push(&mut self, location: Location) {
        // Remove forward history when pushing
        self.entries.truncate(self.current + 1);
        self.entries.push(location);
        self.current += 1;
        self.action = HistoryAction::Push;
        self.enforce_size_limit();
    }

    fn replace(&mut self, location: Location) {
        self.entries[self.current] = location;
        self.action = HistoryAction::Replace;
    }

    /// Index `delta` entries away from the cursor, if there is one
    fn offset(&self, delta: isize) -> Option<usize> {
        if delta == 0 {
            return None;
        }
        self.current
            .checked_add_signed(delta)
            .filter(|index| *index < self.entries.len())
    }

    fn enforce_size_limit(&mut self) {
        if self.max_size > 0 && self.entries.len() > self.max_size {
            // Drop the oldest entries, the cursor always stays on a live entry
            let excess = self.entries.len() - self.max_size;
            self.entries.drain(0..excess);
            self.current = self.current.saturating_sub(excess);
        }
    }
}

/// Events waiting for delivery, drained by whichever call queued first
#[derive(Debug, Default)]
struct Outbox {
    queue: VecDeque<(Location, HistoryAction)>,
    draining: bool,
}

/// In-memory session history.
///
/// Starts with a single entry and the `Pop` action, the way a browser reports
/// a freshly loaded page.
///
/// # Example
///
/// ```
/// use state_navigator::{HistoryProvider, MemoryHistory};
///
/// let history = MemoryHistory::new("/");
/// history.push("/items/1");
/// history.push("/items/2");
/// history.go_back();
///
/// assert_eq!(history.location().pathname, "/items/1");
/// assert!(history.can_go_forward());
/// ```
pub struct MemoryHistory {
    stack: Mutex<Stack>,
    listeners: Arc<Mutex<Registry<Listener>>>,
    blockers: Arc<Mutex<Registry<Blocker>>>,
    confirmation: Option<Confirmation>,
    outbox: Mutex<Outbox>,
}

impl MemoryHistory {
    const DEFAULT_MAX_SIZE: usize = 1000;

    /// Create a history with a single entry
    pub fn new(initial_path: impl AsRef<str>) -> Self {
        Self::with_max_size(initial_path, Self::DEFAULT_MAX_SIZE)
    }

    /// Create with a custom entry limit (0 = unlimited)
    pub fn with_max_size(initial_path: impl AsRef<str>, max_size: usize) -> Self {
        Self::from_stack(Stack {
            entries: vec![Location::parse(initial_path.as_ref())],
            current: 0,
            max_size,
            action: HistoryAction::Pop,
        })
    }

    /// Restore a history from saved paths and a cursor position
    pub fn with_entries<I, T>(entries: I, index: usize) -> Result<Self, HistoryError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let entries: Vec<Location> = entries
            .into_iter()
            .map(|path| Location::parse(path.as_ref()))
            .collect();

        if entries.is_empty() {
            return Err(HistoryError::EmptyEntries);
        }
        if index >= entries.len() {
            return Err(HistoryError::IndexOutOfRange {
                index,
                len: entries.len(),
            });
        }

        Ok(Self::from_stack(Stack {
            entries,
            current: index,
            max_size: Self::DEFAULT_MAX_SIZE,
            action: HistoryAction::Pop,
        }))
    }

    /// Install the hook that answers blocking prompts.
    ///
    /// Without one, prompted transitions are allowed and a warning is logged.
    pub fn with_confirmation<F>(mut self, confirm: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.confirmation = Some(Arc::new(confirm));
        self
    }

    fn from_stack(stack: Stack) -> Self {
        Self {
            stack: Mutex::new(stack),
            listeners: Arc::new(Mutex::new(Registry::new())),
            blockers: Arc::new(Mutex::new(Registry::new())),
            confirmation: None,
            outbox: Mutex::new(Outbox::default()),
        }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        lock(&self.stack).entries.len()
    }

    /// Always false, a history keeps at least its current entry
    pub fn is_empty(&self) -> bool {
        lock(&self.stack).entries.is_empty()
    }

    /// Position of the current entry
    pub fn index(&self) -> usize {
        lock(&self.stack).current
    }

    /// Snapshot of all entries
    pub fn entries(&self) -> Vec<Location> {
        lock(&self.stack).entries.clone()
    }

    pub fn can_go_back(&self) -> bool {
        lock(&self.stack).current > 0
    }

    pub fn can_go_forward(&self) -> bool {
        let stack = lock(&self.stack);
        stack.current + 1 < stack.entries.len()
    }

    /// Ask the blockers, and the confirmation hook if one of them prompts
    fn confirm_transition(&self, target: &Location, action: HistoryAction) -> bool {
        let blockers = lock(&self.blockers).snapshot();
        let Some(message) = blockers.iter().find_map(|blocker| blocker(target, action)) else {
            return true;
        };

        match &self.confirmation {
            Some(confirm) => {
                let allowed = confirm(&message);
                if !allowed {
                    debug_log!("Transition to '{}' declined: {}", target, message);
                }
                allowed
            }
            None => {
                warn_log!(
                    "No confirmation hook installed, allowing transition to '{}' despite prompt: {}",
                    target,
                    message
                );
                true
            }
        }
    }

    /// Deliver an event to every listener.
    ///
    /// Events raised by listeners are queued and delivered after the current
    /// one has reached all listeners, so every listener sees the same order.
    fn notify(&self, location: Location, action: HistoryAction) {
        {
            let mut outbox = lock(&self.outbox);
            outbox.queue.push_back((location, action));
            if outbox.draining {
                trace_log!("Queued {} behind the event being delivered", action);
                return;
            }
            outbox.draining = true;
        }

        loop {
            let (location, action) = {
                let mut outbox = lock(&self.outbox);
                match outbox.queue.pop_front() {
                    Some(event) => event,
                    None => {
                        outbox.draining = false;
                        return;
                    }
                }
            };

            let listeners = lock(&self.listeners).snapshot();
            trace_log!(
                "Notifying {} listener(s) of {} to '{}'",
                listeners.len(),
                action,
                location
            );
            for listener in listeners {
                listener(&location, action);
            }
        }
    }
}

impl HistoryProvider for MemoryHistory {
    fn location(&self) -> Location {
        lock(&self.stack).current().clone()
    }

    fn action(&self) -> HistoryAction {
        lock(&self.stack).action
    }

    fn push(&self, path: &str) {
        let location = Location::parse(path);
        if !self.confirm_transition(&location, HistoryAction::Push) {
            return;
        }
        lock(&self.stack).push(location.clone());
        self.notify(location, HistoryAction::Push);
    }

    fn replace(&self, path: &str) {
        let location = Location::parse(path);
        if !self.confirm_transition(&location, HistoryAction::Replace) {
            return;
        }
        lock(&self.stack).replace(location.clone());
        self.notify(location, HistoryAction::Replace);
    }

    fn go(&self, delta: isize) {
        let target = {
            let stack = lock(&self.stack);
            stack
                .offset(delta)
                .map(|index| (index, stack.entries[index].clone()))
        };
        let Some((index, location)) = target else {
            debug_log!("Ignoring go({}): no entry at that offset", delta);
            return;
        };

        if !self.confirm_transition(&location, HistoryAction::Pop) {
            return;
        }
        let location = {
            let mut stack = lock(&self.stack);
            // A blocker may have navigated in the meantime
            if index >= stack.entries.len() {
                return;
            }
            stack.current = index;
            stack.action = HistoryAction::Pop;
            stack.entries[index].clone()
        };
        self.notify(location, HistoryAction::Pop);
    }

    fn listen(&self, listener: Listener) -> Subscription {
        subscribe(&self.listeners, listener)
    }

    fn block(&self, blocker: Blocker) -> Subscription {
        subscribe(&self.blockers, blocker)
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("/")
    }
}

impl fmt::Debug for MemoryHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stack = lock(&self.stack);
        f.debug_struct("MemoryHistory")
            .field("entries", &stack.entries)
            .field("current", &stack.current)
            .field("action", &stack.action)
            .field("listeners", &lock(&self.listeners).items.len())
            .field("blockers", &lock(&self.blockers).items.len())
            .finish()
    }
}
