//! Synthetic session tokens.
//!
//! Tokens are not credentials; they only tag a login so two logins of the
//! same profile can be told apart.

use chrono::Utc;
use rand::Rng;

const TOKEN_PREFIX: &str = "session_";
const SUFFIX_LEN: usize = 9;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generates `session_<unix-millis>_<9 random base-36 chars>`.
pub fn generate_session_token() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();

    format!("{TOKEN_PREFIX}{}_{suffix}", Utc::now().timestamp_millis())
}
