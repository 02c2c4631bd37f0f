pub mod body;
pub mod tokens;
