mod command_result;
pub mod expand;
pub mod init;
pub mod resolve;

pub use command_result::*;
