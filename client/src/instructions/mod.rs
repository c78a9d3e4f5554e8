pub mod program_instructions;
pub mod rpc;
pub mod utils;
