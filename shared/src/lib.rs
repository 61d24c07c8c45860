pub mod account;
pub mod config;
pub mod env;
pub mod errors;
pub mod naming;
pub mod runtime;
pub mod services;
pub mod session;
pub mod utils;

pub use account::*;
pub use config::*;
pub use env::*;
pub use errors::*;
pub use naming::*;
pub use runtime::*;
pub use services::*;
pub use session::*;
pub use utils::*;
