pub mod method_type;
pub mod pta;
