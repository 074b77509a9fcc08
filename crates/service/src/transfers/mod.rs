//! Transfers module: three-layer architecture (domain in `models`, repository, service).

pub mod repo;
pub mod repository;
pub mod service;

pub use repository::TransferRepository;
pub use service::TransferService;
