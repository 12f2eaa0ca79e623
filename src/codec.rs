//! Route codec
//!
//! Converts between path strings and the application's typed routes. The
//! matching grammar belongs to the application; the coordinator only needs
//! a partial parser and a total renderer.

use std::fmt;

/// Parses pathnames into routes and renders routes back into paths.
///
/// `parse` returns `None` for paths the application does not know; the
/// coordinator substitutes its not-found route in that case.
///
/// # Example
///
/// ```
/// use state_navigator::RouteCodec;
///
/// #[derive(Debug, Clone, PartialEq)]
/// enum Page { Home, Item(u32) }
///
/// struct PageCodec;
///
/// impl RouteCodec<Page> for PageCodec {
///     fn parse(&self, path: &str) -> Option<Page> {
///         match path.trim_end_matches('/') {
///             "" => Some(Page::Home),
///             other => other.strip_prefix("/items/")?.parse().ok().map(Page::Item),
///         }
///     }
///
///     fn render(&self, route: &Page) -> String {
///         match route {
///             Page::Home => "/".to_string(),
///             Page::Item(id) => format!("/items/{id}"),
///         }
///     }
/// }
///
/// assert_eq!(PageCodec.parse("/items/3"), Some(Page::Item(3)));
/// assert_eq!(PageCodec.parse_or("/nope", Page::Home), Page::Home);
/// ```
pub trait RouteCodec<R>: Send + Sync + 'static {
    /// Parse a pathname
    fn parse(&self, path: &str) -> Option<R>;

    /// Render a route as a path
    fn render(&self, route: &R) -> String;

    /// Parse a pathname, falling back to `fallback`
    fn parse_or(&self, path: &str, fallback: R) -> R {
        self.parse(path).unwrap_or(fallback)
    }
}

/// Create a codec from a pair of functions
///
/// # Example
///
/// ```
/// use state_navigator::{codec_fn, RouteCodec};
///
/// let codec = codec_fn(
///     |path: &str| path.strip_prefix("/n/")?.parse::<u32>().ok(),
///     |n: &u32| format!("/n/{n}"),
/// );
///
/// assert_eq!(codec.parse("/n/12"), Some(12));
/// assert_eq!(codec.render(&5), "/n/5");
/// ```
pub fn codec_fn<R, P, F>(parse: P, render: F) -> FnCodec<P, F>
where
    P: Fn(&str) -> Option<R> + Send + Sync + 'static,
    F: Fn(&R) -> String + Send + Sync + 'static,
{
    FnCodec { parse, render }
}

/// Codec created from a parse function and a render function
pub struct FnCodec<P, F> {
    parse: P,
    render: F,
}

impl<R, P, F> RouteCodec<R> for FnCodec<P, F>
where
    P: Fn(&str) -> Option<R> + Send + Sync + 'static,
    F: Fn(&R) -> String + Send + Sync + 'static,
{
    fn parse(&self, path: &str) -> Option<R> {
        (self.parse)(path)
    }

    fn render(&self, route: &R) -> String {
        (self.render)(route)
    }
}

impl<P, F> fmt::Debug for FnCodec<P, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnCodec").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Page {
        Home,
        Item(u32),
        NotFound,
    }

    fn codec() -> impl RouteCodec<Page> {
        codec_fn(
            |path: &str| match path {
                "/" => Some(Page::Home),
                _ => path
                    .strip_prefix("/items/")?
                    .parse()
                    .ok()
                    .map(Page::Item),
            },
            |page: &Page| match page {
                Page::Home => "/".to_string(),
                Page::Item(id) => format!("/items/{id}"),
                Page::NotFound => "/404".to_string(),
            },
        )
    }

    #[test]
    fn test_fn_codec_parse() {
        let codec = codec();
        assert_eq!(codec.parse("/"), Some(Page::Home));
        assert_eq!(codec.parse("/items/42"), Some(Page::Item(42)));
        assert_eq!(codec.parse("/items/abc"), None);
    }

    #[test]
    fn test_fn_codec_render() {
        let codec = codec();
        assert_eq!(codec.render(&Page::Item(7)), "/items/7");
        assert_eq!(codec.render(&Page::Home), "/");
    }

    #[test]
    fn test_parse_or_falls_back() {
        let codec = codec();
        assert_eq!(codec.parse_or("/missing", Page::NotFound), Page::NotFound);
        assert_eq!(codec.parse_or("/items/1", Page::NotFound), Page::Item(1));
    }
}
