/// Source of unique identifiers for new posts and users.
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> String;
}
