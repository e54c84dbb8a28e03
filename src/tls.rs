use std::sync::Once;

/// Install the ring crypto provider before the first `reqwest::Client` is
/// built; reqwest is compiled with `rustls-no-provider` and would panic
/// without one.
pub fn ensure_rustls_provider_installed() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        // Ignore the error in case another part of the process already installed
        // a provider (it is a process-wide singleton).
        let _ = rustls::crypto::ring::default_provider().install_default();
    });
}
