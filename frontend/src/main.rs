use leptos::prelude::*;
use merq_frontend::{App, AppConfig, init_logging};

// Use lol_alloc as the global allocator for smaller WASM size
#[cfg(target_arch = "wasm32")]
use lol_alloc::{AssumeSingleThreaded, FreeListAllocator};

#[cfg(target_arch = "wasm32")]
#[global_allocator]
static ALLOCATOR: AssumeSingleThreaded<FreeListAllocator> =
    unsafe { AssumeSingleThreaded::new(FreeListAllocator::new()) };

pub fn main() {
    console_error_panic_hook::set_once();

    let config = AppConfig::from_build_env();
    init_logging(config.log_level);
    tracing::info!(api = %config.api_base_url, "starting merq");

    mount_to_body(move || view! { <App config=config.clone() /> });
}
