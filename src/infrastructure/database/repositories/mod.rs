//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod availability_repository;
pub mod repository_provider;
pub mod reservation_repository;
pub mod room_repository;

pub use repository_provider::SeaOrmRepositoryProvider;
