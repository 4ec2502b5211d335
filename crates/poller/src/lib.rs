pub mod client;
pub mod poll_loop;
