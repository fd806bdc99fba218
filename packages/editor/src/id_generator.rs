use crate::node::NodeId;

/// Sequential ID generator for the nodes of one parse generation
///
/// Ids have the form `<generation>-<counter>`. The session hands out a new
/// generation for every fresh parse, so ids never repeat within a session.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    generation: u64,
    count: u64,
}

impl IdGenerator {
    pub fn new(generation: u64) -> Self {
        Self {
            generation,
            count: 0,
        }
    }

    /// Generate next sequential ID
    pub fn new_id(&mut self) -> NodeId {
        self.count += 1;
        NodeId::new(format!("{}-{}", self.generation, self.count))
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of ids handed out so far
    pub fn issued(&self) -> u64 {
        self.count
    }
}
