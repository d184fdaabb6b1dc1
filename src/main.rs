#[cfg(feature = "csr")]
pub fn main() {
    // to run: `trunk serve --open` (index.html enables the `csr` feature)
    use talent_finder::app::App;

    talent_finder::utils::panic_hook::init();
    leptos::mount_to_body(App);
}

#[cfg(not(feature = "csr"))]
pub fn main() {
    // no client-side main function without a renderer;
    // build with `--features csr` or through Trunk
}
