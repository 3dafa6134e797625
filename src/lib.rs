// Public library interface for packcircles-rs
// The command line tool and the debug-pack diagnostic both build on these modules

pub mod circles;
pub mod input;
pub mod layout;
pub mod render;
