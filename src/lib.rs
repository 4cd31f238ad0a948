pub mod assets;
pub mod commands;
pub mod container;
pub mod git;
pub mod platform;
pub mod product;
