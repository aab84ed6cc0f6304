use rand::Rng;

const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const PREFIX: &str = "user_";
const SUFFIX_LEN: usize = 7;

/// Generates a fresh conversation id of the form `user_xxxxxxx`, where the
/// suffix is seven random base-36 characters. Uniqueness is only
/// probabilistic; the backend treats an unseen id as a new conversation.
pub fn new_session_id() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect();
    format!("{}{}", PREFIX, suffix)
}

/// Whether `id` has the shape produced by [`new_session_id`].
pub fn is_session_id(id: &str) -> bool {
    match id.strip_prefix(PREFIX) {
        Some(suffix) => {
            suffix.len() == SUFFIX_LEN && suffix.bytes().all(|b| ALPHABET.contains(&b))
        }
        None => false,
    }
}
