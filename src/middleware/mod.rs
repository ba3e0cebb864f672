pub mod path_id;
pub mod validate;
