mod repository;

pub use repository::RepositoryConfig;
