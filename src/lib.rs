pub mod check;
pub mod codegen;
pub mod compile_unit_info;
pub mod context;
pub mod driver;
pub mod ir;
pub mod parser;
