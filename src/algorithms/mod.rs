pub mod ab_join;
pub mod common;
pub mod naive;
pub mod stomp;
