mod engine;
mod error;
mod rpc;
mod tools;

use engine::core::app_setup::create_app;

fn main() {
    #[cfg(target_arch = "wasm32")]
    {
        if let Err(error) = engine::core::window_config::verify_render_surface() {
            web_sys::console::error_1(&error.to_string().into());
            return;
        }

        let mut app = create_app();
        wasm_bindgen_futures::spawn_local(async move {
            app.run();
        });
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        create_app().run();
    }
}
