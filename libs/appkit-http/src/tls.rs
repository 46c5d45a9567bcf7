//! rustls setup shared by every client in the process.

use std::sync::{Arc, OnceLock};

use rustls_pki_types::CertificateDer;

/// OS roots, read on first use. Reading the store is slow on some platforms.
fn os_roots() -> &'static [CertificateDer<'static>] {
    static ROOTS: OnceLock<Vec<CertificateDer<'static>>> = OnceLock::new();
    ROOTS.get_or_init(|| {
        let loaded = rustls_native_certs::load_native_certs();
        for err in &loaded.errors {
            tracing::warn!(error = %err, "skipping unreadable OS root certificate");
        }
        tracing::debug!(count = loaded.certs.len(), "OS root certificates loaded");
        loaded.certs
    })
}

/// The installed process default provider, else a private aws-lc-rs one.
pub fn get_crypto_provider() -> Arc<rustls::crypto::CryptoProvider> {
    match rustls::crypto::CryptoProvider::get_default() {
        Some(provider) => Arc::clone(provider),
        None => Arc::new(rustls::crypto::aws_lc_rs::default_provider()),
    }
}

/// Client config trusting the OS certificate store.
///
/// # Errors
/// The store yields no usable certificate, or the provider rejects the
/// default protocol versions.
pub fn native_roots_client_config() -> Result<rustls::ClientConfig, String> {
    let mut store = rustls::RootCertStore::empty();
    let (added, ignored) = store.add_parsable_certificates(os_roots().iter().cloned());
    if ignored > 0 {
        tracing::warn!(added, ignored, "unparsable OS root certificates ignored");
    }
    if added == 0 {
        return Err("OS certificate store has no usable root certificate".to_owned());
    }

    let builder = rustls::ClientConfig::builder_with_provider(get_crypto_provider())
        .with_safe_default_protocol_versions()
        .map_err(|e| format!("unsupported TLS protocol versions: {e}"))?;
    Ok(builder.with_root_certificates(store).with_no_client_auth())
}
