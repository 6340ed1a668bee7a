pub mod parse;
pub mod tensor;

pub use parse::*;
pub use tensor::*;
