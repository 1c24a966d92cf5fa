use rand::{distributions::Alphanumeric, thread_rng, Rng};

const TOKEN_LEN: usize = 48;

/// Mints an opaque session token. A token stays valid until the user logs
/// out; there is no expiry.
pub fn generate_token() -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LEN)
        .map(char::from)
        .collect()
}
