pub mod learner_id;
