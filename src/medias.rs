use crate::core::domain::Identifiable;
use crate::core::library::MediaKind;

pub mod domain;
pub mod dto;
pub mod factory;
pub mod repository;

pub(crate) trait Media: Identifiable {
    fn kind(&self) -> MediaKind;
    fn is_available(&self) -> bool;
    fn is_borrowable(&self) -> bool;
}
