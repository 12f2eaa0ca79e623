//! Navigation requests issued by application logic
//!
//! A [`NavigationRequest`] is an intent to move the history. The coordinator
//! consumes each one exactly once and performs the matching history call.

use std::fmt;

/// An intent to change the current location.
///
/// # Example
///
/// ```
/// use state_navigator::NavigationRequest;
///
/// #[derive(Debug, Clone, PartialEq)]
/// enum Page { Item(u32) }
///
/// let request = NavigationRequest::push_route(Page::Item(7));
/// assert_eq!(request.route(), Some(&Page::Item(7)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationRequest<R> {
    /// Push the rendered path of a typed route
    PushRoute(R),
    /// Replace the current entry with the rendered path of a typed route
    ReplaceRoute(R),
    /// Push a raw path
    PushPath(String),
    /// Replace the current entry with a raw path
    ReplacePath(String),
    /// Move through history by a relative offset
    GoOffset(isize),
    /// Equivalent to `GoOffset(-1)`
    GoBack,
    /// Equivalent to `GoOffset(1)`
    GoForward,
}

/// Visitor used by [`NavigationRequest::fold`], one method per variant.
pub trait FoldNavigationRequest<R> {
    /// Result of handling a request
    type Output;

    fn push_route(&mut self, route: R) -> Self::Output;
    fn replace_route(&mut self, route: R) -> Self::Output;
    fn push_path(&mut self, path: String) -> Self::Output;
    fn replace_path(&mut self, path: String) -> Self::Output;
    fn go(&mut self, offset: isize) -> Self::Output;
    fn go_back(&mut self) -> Self::Output;
    fn go_forward(&mut self) -> Self::Output;
}

impl<R> NavigationRequest<R> {
    pub fn push_route(route: R) -> Self {
        Self::PushRoute(route)
    }

    pub fn replace_route(route: R) -> Self {
        Self::ReplaceRoute(route)
    }

    pub fn push_path(path: impl Into<String>) -> Self {
        Self::PushPath(path.into())
    }

    pub fn replace_path(path: impl Into<String>) -> Self {
        Self::ReplacePath(path.into())
    }

    pub fn go(offset: isize) -> Self {
        Self::GoOffset(offset)
    }

    pub fn go_back() -> Self {
        Self::GoBack
    }

    pub fn go_forward() -> Self {
        Self::GoForward
    }

    /// Hand the request to a visitor, consuming it.
    pub fn fold<V>(self, visitor: &mut V) -> V::Output
    where
        V: FoldNavigationRequest<R>,
    {
        match self {
            Self::PushRoute(route) => visitor.push_route(route),
            Self::ReplaceRoute(route) => visitor.replace_route(route),
            Self::PushPath(path) => visitor.push_path(path),
            Self::ReplacePath(path) => visitor.replace_path(path),
            Self::GoOffset(offset) => visitor.go(offset),
            Self::GoBack => visitor.go_back(),
            Self::GoForward => visitor.go_forward(),
        }
    }

    /// Convert the route type, leaving path and traversal variants as they are.
    pub fn map_route<T>(self, f: impl FnOnce(R) -> T) -> NavigationRequest<T> {
        match self {
            Self::PushRoute(route) => NavigationRequest::PushRoute(f(route)),
            Self::ReplaceRoute(route) => NavigationRequest::ReplaceRoute(f(route)),
            Self::PushPath(path) => NavigationRequest::PushPath(path),
            Self::ReplacePath(path) => NavigationRequest::ReplacePath(path),
            Self::GoOffset(offset) => NavigationRequest::GoOffset(offset),
            Self::GoBack => NavigationRequest::GoBack,
            Self::GoForward => NavigationRequest::GoForward,
        }
    }

    /// Typed route carried by the request, if any
    pub fn route(&self) -> Option<&R> {
        match self {
            Self::PushRoute(route) | Self::ReplaceRoute(route) => Some(route),
            _ => None,
        }
    }

    /// Check if the request moves through existing entries instead of writing one
    pub fn is_history_traversal(&self) -> bool {
        matches!(self, Self::GoOffset(_) | Self::GoBack | Self::GoForward)
    }
}

impl<R: fmt::Debug> fmt::Display for NavigationRequest<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PushRoute(route) => write!(f, "push route {:?}", route),
            Self::ReplaceRoute(route) => write!(f, "replace route {:?}", route),
            Self::PushPath(path) => write!(f, "push path {}", path),
            Self::ReplacePath(path) => write!(f, "replace path {}", path),
            Self::GoOffset(offset) => write!(f, "go {}", offset),
            Self::GoBack => f.write_str("go back"),
            Self::GoForward => f.write_str("go forward"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records which visitor method ran
    struct Recorder;

    impl FoldNavigationRequest<u32> for Recorder {
        type Output = String;

        fn push_route(&mut self, route: u32) -> String {
            format!("push_route:{route}")
        }
        fn replace_route(&mut self, route: u32) -> String {
            format!("replace_route:{route}")
        }
        fn push_path(&mut self, path: String) -> String {
            format!("push_path:{path}")
        }
        fn replace_path(&mut self, path: String) -> String {
            format!("replace_path:{path}")
        }
        fn go(&mut self, offset: isize) -> String {
            format!("go:{offset}")
        }
        fn go_back(&mut self) -> String {
            "go_back".to_string()
        }
        fn go_forward(&mut self) -> String {
            "go_forward".to_string()
        }
    }

    #[test]
    fn test_fold_dispatches_each_variant() {
        let cases = vec![
            (NavigationRequest::push_route(1), "push_route:1"),
            (NavigationRequest::replace_route(2), "replace_route:2"),
            (NavigationRequest::push_path("/a"), "push_path:/a"),
            (NavigationRequest::replace_path("/b"), "replace_path:/b"),
            (NavigationRequest::go(-3), "go:-3"),
            (NavigationRequest::go_back(), "go_back"),
            (NavigationRequest::go_forward(), "go_forward"),
        ];

        for (request, expected) in cases {
            assert_eq!(request.fold(&mut Recorder), expected);
        }
    }

    #[test]
    fn test_map_route() {
        let mapped = NavigationRequest::push_route(7_u32).map_route(|id| format!("item-{id}"));
        assert_eq!(mapped, NavigationRequest::PushRoute("item-7".to_string()));

        let untouched: NavigationRequest<String> =
            NavigationRequest::<u32>::go(2).map_route(|id| id.to_string());
        assert_eq!(untouched, NavigationRequest::GoOffset(2));
    }

    #[test]
    fn test_route_accessor() {
        assert_eq!(NavigationRequest::replace_route(5_u32).route(), Some(&5));
        assert_eq!(NavigationRequest::<u32>::push_path("/x").route(), None);
    }

    #[test]
    fn test_history_traversal() {
        assert!(NavigationRequest::<u32>::go_back().is_history_traversal());
        assert!(NavigationRequest::<u32>::go(0).is_history_traversal());
        assert!(!NavigationRequest::push_route(1_u32).is_history_traversal());
    }

    #[test]
    fn test_display() {
        assert_eq!(NavigationRequest::push_route(3_u32).to_string(), "push route 3");
        assert_eq!(NavigationRequest::<u32>::go(-1).to_string(), "go -1");
    }
}
