// Handlers module

pub mod catalog;
pub mod query;
pub mod rejection;
pub mod status;

pub use catalog::{examples_handler, tools_handler};
pub use query::{query_handler, stream_query_handler};
pub use rejection::{handle_rejection, AgentNotInitialized, InvalidQuery};
pub use status::{health_handler, root_handler};
