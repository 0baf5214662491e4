mod job;
mod requester;
mod server;

pub use job::Job;
pub use requester::{Query, Requester};
pub use server::Jenkins;
