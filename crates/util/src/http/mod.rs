pub mod http_exec;
pub mod parser;

pub use http_exec::*;
pub use parser::*;
