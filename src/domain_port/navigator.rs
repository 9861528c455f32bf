/// Navigation effect invoked on logout. The session core never forces
/// navigation from any other operation.
pub trait Navigator: Send + Sync {
    fn to_login(&self);
}
