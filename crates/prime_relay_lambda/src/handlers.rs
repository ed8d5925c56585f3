pub mod classifier;
pub mod dispatcher;
