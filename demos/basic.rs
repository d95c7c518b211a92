//! Standalone demo: opens a window with a two-handle chroma picker.
//!
//! Run with `RUST_LOG=floem_chroma=debug` to follow handle changes.

use floem::prelude::*;
use floem::window::WindowConfig;
use floem_chroma::{chroma_picker, ChromaPicker, HandleId, SharedPicker, SolidColor};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut picker = ChromaPicker::new();
    picker.add_handle(Some(SolidColor::from_hsb(0.6, 0.8, 1.0)));
    picker.add_handle(Some(SolidColor::from_hsb(0.05, 0.7, 0.9)));
    picker.set_delegate(|_: &ChromaPicker, id: HandleId, color: SolidColor| {
        log::info!("{id} -> {color}");
    });
    let shared = SharedPicker::new(picker);

    floem::Application::new()
        .window(
            move |_| {
                chroma_picker(shared.clone())
                    .on_event_stop(floem::event::EventListener::WindowClosed, |_| {
                        floem::quit_app()
                    })
            },
            Some(
                WindowConfig::default()
                    .size((320.0, 400.0))
                    .title("floem-chroma"),
            ),
        )
        .run();
}
