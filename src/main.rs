use log::info;

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(priere_landing::config::log_level()).expect("error initializing log");

    info!("Starting landing page behaviors");
    priere_landing::start();
}
