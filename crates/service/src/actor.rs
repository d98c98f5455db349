/// Identity an audit entry is attributed to.
///
/// There is no authentication yet, so the API layer passes [`Actor::system`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Actor(String);

impl Actor {
    pub const SYSTEM: &'static str = "System";

    pub fn new(name: impl Into<String>) -> Self { Self(name.into()) }

    pub fn system() -> Self { Self::new(Self::SYSTEM) }

    pub fn name(&self) -> &str { &self.0 }
}

impl Default for Actor {
    fn default() -> Self { Self::system() }
}
