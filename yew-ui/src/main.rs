// SPDX-License-Identifier: MIT OR Apache-2.0

#[cfg(target_arch = "wasm32")]
fn main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("failed to initialize logger");
    yew::Renderer::<confab_ui::app::AppRoot>::new().render();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("confab-ui is a browser app; build it for wasm32 with trunk");
}
