/// One-dimensional string tensor of serialized examples
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelInput {
    examples: Vec<Vec<u8>>,
}

impl ModelInput {
    /// The shape the model expects per instance: `[1]`
    pub fn single(example: Vec<u8>) -> Self {
        Self {
            examples: vec![example],
        }
    }

    pub fn examples(&self) -> &[Vec<u8>] {
        &self.examples
    }

    pub fn shape(&self) -> [usize; 1] {
        [self.examples.len()]
    }
}
