use leptos::*;

use crate::api::ApiClient;

/// Runs `f` inside a fresh reactive runtime and disposes it afterwards.
pub fn with_runtime<T>(f: impl FnOnce() -> T) -> T {
    let runtime = leptos::create_runtime();
    let result = f();
    runtime.dispose();
    result
}

/// Like [`with_runtime`], with `client` provided as the page's API context.
pub fn with_api_context<T>(client: ApiClient, f: impl FnOnce() -> T) -> T {
    with_runtime(|| {
        provide_context(client);
        f()
    })
}

struct SuppressResources;

impl SuppressResources {
    fn new() -> Self {
        leptos_reactive::suppress_resource_load(true);
        Self
    }
}

impl Drop for SuppressResources {
    fn drop(&mut self) {
        leptos_reactive::suppress_resource_load(false);
    }
}

pub fn render_to_string<F, N>(view: F) -> String
where
    F: FnOnce() -> N + 'static,
    N: IntoView + 'static,
{
    let _guard = SuppressResources::new();
    with_runtime(|| view().into_view().render_to_string().to_string())
}
