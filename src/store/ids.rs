//! Snowflake id generation shared by all stores

use std::sync::Arc;

use snowflaked::sync::Generator;

#[derive(Clone)]
pub struct IdGenerator {
    inner: Arc<Generator>,
}

impl IdGenerator {
    pub fn new(instance: u16) -> Self {
        Self {
            inner: Arc::new(Generator::new(instance)),
        }
    }

    pub fn next(&self) -> i64 {
        self.inner.generate()
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new(0)
    }
}
