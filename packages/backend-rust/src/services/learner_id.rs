use sha2::{Digest, Sha256};
use uuid::Uuid;

const ID_PREFIX: &str = "user_";

/// Learner id for a display name. The same name always maps to the same id;
/// without a name a random one is drawn.
pub fn generate_learner_id(name: Option<&str>) -> String {
    match name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => {
            let digest = Sha256::digest(name.as_bytes());
            format!("{ID_PREFIX}{}", &hex::encode(digest)[..8])
        }
        None => {
            let simple = Uuid::new_v4().simple().to_string();
            format!("{ID_PREFIX}{}", &simple[..12])
        }
    }
}
