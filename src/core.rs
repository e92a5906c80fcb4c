pub mod library;
pub mod domain;
pub mod repository;
pub mod command;
pub mod controller;
pub mod events;
