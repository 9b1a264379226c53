pub mod category;
pub mod campaign;
