pub mod mapping;
pub mod outcome;
pub mod record;
pub mod table;
