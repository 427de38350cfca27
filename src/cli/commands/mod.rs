pub mod check;
mod command_result;
pub mod helper;
pub mod hoist;
pub mod init;
pub mod params;
pub mod patterns;
pub mod refs;
pub mod resolve;

pub use command_result::*;
