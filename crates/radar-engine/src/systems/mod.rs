pub mod lens;
pub mod reveal;
pub mod sweep;
