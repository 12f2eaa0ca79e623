//! Item Browser Demo - Coordinator Example
//!
//! Drives the coordinator hooks from a minimal host loop over a memory history.
//! Run with `RUST_LOG=debug` to see dispatches.

use state_navigator::*;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq)]
enum Page {
    Home,
    Item(u32),
    NotFound,
}

#[derive(Debug, Clone, Default)]
struct Browser {
    selected: Option<u32>,
    unsaved: bool,
    visits: usize,
}

#[derive(Debug)]
enum Msg {
    Open(u32),
    Back,
    Loaded(u32),
}

fn codec() -> impl RouteCodec<Page> {
    codec_fn(
        |path: &str| match path {
            "/" => Some(Page::Home),
            _ => path.strip_prefix("/items/")?.parse().ok().map(Page::Item),
        },
        |page: &Page| match page {
            Page::Item(id) => format!("/items/{id}"),
            Page::Home | Page::NotFound => "/".to_string(),
        },
    )
}

fn extract(msg: Msg) -> Extracted<Msg, Page> {
    match msg {
        Msg::Open(id) => Extracted::navigate(NavigationRequest::push_route(Page::Item(id)), Msg::Loaded(id)),
        Msg::Back => Extracted::navigate(NavigationRequest::go_back(), Msg::Back),
        other => Extracted::pass(other),
    }
}

async fn load(page: Page, response: NavigationResponse, mut browser: Browser) -> (Browser, Option<Msg>) {
    browser.visits += 1;
    match page {
        // unknown pages bounce back home
        Page::NotFound => (browser, Some(Msg::Open(1))),
        Page::Item(id) => {
            println!("  [{response}] showing item {id}");
            browser.selected = Some(id);
            browser.unsaved = id == 3;
            (browser, None)
        }
        Page::Home => {
            println!("  [{response}] showing home");
            browser.selected = None;
            browser.unsaved = false;
            (browser, None)
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::init();

    let history = Arc::new(MemoryHistory::new("/missing").with_confirmation(|message| {
        println!("  confirm: {message} -> yes");
        true
    }));

    let bindings = match CoordinatorBuilder::<Browser, Msg, Page>::new()
        .history(Arc::clone(&history))
        .codec(codec())
        .not_found(Page::NotFound)
        .extractor(extract)
        .default_state(|_, page: &Page| Browser {
            selected: match page {
                Page::Item(id) => Some(*id),
                _ => None,
            },
            ..Browser::default()
        })
        .transition(transition_fn(load))
        .block_transition(blocker_fn(
            |browser: &Browser, _: NavigationResponse, _: &Page| {
                browser.unsaved.then(|| "Discard your notes?".to_string())
            },
        ))
        .parse_cache(32)
        .build()
    {
        Ok(bindings) => bindings,
        Err(error) => {
            eprintln!("failed to start: {error}");
            return;
        }
    };

    let state = Arc::new(Mutex::new(StateThunk::of(bindings.default_state.clone())));
    let pending = Arc::new(Mutex::new(Vec::new()));

    let queue = Arc::clone(&pending);
    let _listening = bindings.async_callback_registrar.subscribe(move |step| {
        queue.lock().unwrap().push(step);
    });
    let reader = Arc::clone(&state);
    let _blocking = bindings
        .sync_callback_registrar
        .as_ref()
        .map(|registrar| {
            registrar.subscribe(StateThunk::new(move || reader.lock().unwrap().get()))
        });

    println!("mount at {}", history.location());
    let current = state.lock().unwrap().clone();
    let (_, mounted) = bindings.on_mount.run(current).await;
    *state.lock().unwrap() = mounted;
    drain(&pending, &state).await;

    for msg in [Msg::Open(2), Msg::Open(3), Msg::Back] {
        println!("send {msg:?}");
        let current = state.lock().unwrap().clone();
        let (residual, next) = bindings.sync_side_effect.run(msg, current);
        *state.lock().unwrap() = next;
        drain(&pending, &state).await;
        println!("  residual {residual:?}");
    }

    let browser = state.lock().unwrap().get();
    println!(
        "done at {} with {:?} after {} visits",
        history.location(),
        browser.selected,
        browser.visits
    );
}

/// Run queued steps in order until navigation settles
async fn drain(pending: &Mutex<Vec<AsyncStateStep<Browser, Msg>>>, state: &Mutex<StateThunk<Browser>>) {
    loop {
        let steps: Vec<_> = pending.lock().unwrap().drain(..).collect();
        if steps.is_empty() {
            break;
        }
        for step in steps {
            let current = state.lock().unwrap().clone();
            let (_, next) = step(current).await;
            *state.lock().unwrap() = next;
        }
    }
}
