use vexy::prelude::*;

/// Mock BomReader for testing
pub struct MockBomReader {
    pub content: String,
    pub should_fail: bool,
}

impl MockBomReader {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            should_fail: false,
        }
    }

    pub fn with_failure() -> Self {
        Self {
            content: String::new(),
            should_fail: true,
        }
    }
}

impl BomReader for MockBomReader {
    fn read_bom(&self, _source: &InputSource) -> Result<String> {
        if self.should_fail {
            anyhow::bail!("Mock BOM read failure");
        }
        Ok(self.content.clone())
    }
}
