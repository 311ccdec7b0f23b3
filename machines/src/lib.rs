pub mod gb;

pub use gb::GameBoySystem;
