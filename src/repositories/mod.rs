pub mod article;
pub mod user;

pub use article::{ArticleRepository, ArticleRepositoryTrait, ListPage};
pub use user::{UserRepository, UserRepositoryTrait};
