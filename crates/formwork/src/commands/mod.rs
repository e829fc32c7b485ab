pub mod secrets;
pub mod synth;
pub mod validate;
