/// Module for converting byte offsets to line:column positions
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Source code
    source: Arc<str>,
    /// Byte offset of each line start
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(source: impl Into<Arc<str>>) -> Self {
        let source = source.into();
        let mut line_starts = vec![0];

        for (i, ch) in source.char_indices() {
            if ch == '\n' {
                line_starts.push(i + 1);
            }
        }

        Self {
            source,
            line_starts,
        }
    }

    /// Convert byte offset to 1-based line and column.
    /// Columns count characters, not bytes.
    pub fn get_location(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.source.len());
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(line) => line.saturating_sub(1),
        };

        let line_start = self.line_starts[line];
        let column = self
            .source
            .get(line_start..offset)
            .map_or(0, |prefix| prefix.chars().count());

        (line + 1, column + 1) // 1-based
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_line() {
        let index = LineIndex::new("class A {}\n");
        assert_eq!(index.get_location(0), (1, 1));
        assert_eq!(index.get_location(6), (1, 7));
    }

    #[test]
    fn test_later_lines() {
        let index = LineIndex::new("package a;\n\nimport b.*;\n");
        assert_eq!(index.get_location(11), (2, 1));
        assert_eq!(index.get_location(12), (3, 1));
        assert_eq!(index.get_location(19), (3, 8));
    }

    #[test]
    fn test_columns_count_chars() {
        // "é" is two bytes
        let index = LineIndex::new("// é x\n");
        assert_eq!(index.get_location(6), (1, 6));
    }

    #[test]
    fn test_offset_past_end_is_clamped() {
        let index = LineIndex::new("ab");
        assert_eq!(index.get_location(100), (1, 3));
    }
}
