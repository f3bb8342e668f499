pub mod artifact;
pub mod record;
pub mod session;
