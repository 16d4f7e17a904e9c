pub mod icons;
pub mod operator;

pub use operator::OperatorUI;
