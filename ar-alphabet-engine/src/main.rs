use ar_alphabet_engine::create_app;

fn main() {
    println!("=== AR ALPHABET FLASHCARDS ===");
    let mut app = create_app();

    #[cfg(target_arch = "wasm32")]
    {
        wasm_bindgen_futures::spawn_local(async move {
            app.run();
        });
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        app.run();
    }
}
