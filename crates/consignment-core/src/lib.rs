#![doc = include_str!("../README.md")]

mod common;
pub mod repository;

pub use common::*;
pub use repository::{ActorRepository, LockRepository, Repository};
