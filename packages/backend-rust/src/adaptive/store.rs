use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use adaptive_quiz_algo::LearnerProfile;

type SharedProfile = Arc<Mutex<LearnerProfile>>;

/// Learner profiles keyed by learner id, one lock per learner.
///
/// The outer map lock is only held to look up or insert an entry; all profile
/// reads and writes happen under the learner's own mutex, so different
/// learners never wait on each other and one learner's operations are
/// serialized.
#[derive(Default)]
pub struct ProfileStore {
    profiles: RwLock<HashMap<String, SharedProfile>>,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entry(&self, learner_id: &str) -> SharedProfile {
        if let Some(profile) = self.profiles.read().get(learner_id) {
            return Arc::clone(profile);
        }
        let mut profiles = self.profiles.write();
        Arc::clone(profiles.entry(learner_id.to_string()).or_default())
    }

    /// Runs `f` with exclusive access to the learner's profile, creating it on
    /// first reference.
    pub fn with_profile<T>(&self, learner_id: &str, f: impl FnOnce(&mut LearnerProfile) -> T) -> T {
        let profile = self.entry(learner_id);
        let mut guard = profile.lock();
        f(&mut *guard)
    }

    pub fn get_or_create(&self, learner_id: &str) -> LearnerProfile {
        self.with_profile(learner_id, |profile| profile.clone())
    }

    /// Replaces the learner's profile with a fresh one. Returns whether the
    /// learner was known before.
    pub fn reset(&self, learner_id: &str) -> bool {
        let existed = self.profiles.read().contains_key(learner_id);
        self.with_profile(learner_id, |profile| *profile = LearnerProfile::default());
        existed
    }

    pub fn contains(&self, learner_id: &str) -> bool {
        self.profiles.read().contains_key(learner_id)
    }

    pub fn len(&self) -> usize {
        self.profiles.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.read().is_empty()
    }
}
