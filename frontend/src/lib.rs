mod api;
mod components;
pub mod config;
mod pages;
pub mod reset;
pub mod router;
#[cfg(test)]
mod test_support;
pub mod utils;

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    log::info!("Starting ReStock frontend (wasm)");

    // If window.__RESTOCK_ENV is present (env.js), it takes precedence over
    // ./config.json. The pages mount after it resolves so the reset flow
    // picks up the configured mode.
    wasm_bindgen_futures::spawn_local(async move {
        config::init().await;
        router::mount_app();
    });
}
