pub mod command;
pub mod server;

pub use command::{parse_command, Command};
pub use server::{default_socket_path, send, CommandServer};
