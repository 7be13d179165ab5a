use memchr::memchr;
use memchr::memmem;

use crate::segments::MathSegment;

pub(crate) const BLOCK_DELIMITER: &str = "$$";
pub(crate) const INLINE_DELIMITER: u8 = b'$';

pub struct MathLexer<'src> {
    source: &'src str,
    current: usize,
    segments: Vec<MathSegment>,
}

impl<'src> MathLexer<'src> {
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        MathLexer {
            source,
            current: 0,
            segments: Vec::new(),
        }
    }

    #[must_use]
    pub fn tokenize(mut self) -> Vec<MathSegment> {
        let mut text_start = 0;

        while let Some((start, end)) = self.next_block() {
            self.lex_inline(text_start, start);

            let inner = start + BLOCK_DELIMITER.len()..end - BLOCK_DELIMITER.len();
            self.segments.push(MathSegment::block(&self.source[inner]));

            text_start = end;
        }

        self.lex_inline(text_start, self.source.len());

        self.segments
    }

    /// Find the next `$$ ... $$` span at or after the cursor.
    ///
    /// The closer is searched from the first byte after the opener, so the
    /// shortest span wins and `$$$$` is an empty block. A missing closer means
    /// no later opener can match either, so the scan ends.
    fn next_block(&mut self) -> Option<(usize, usize)> {
        let open = self.find_from(self.current, BLOCK_DELIMITER)?;
        let body = open + BLOCK_DELIMITER.len();

        let Some(close) = self.find_from(body, BLOCK_DELIMITER) else {
            self.current = self.source.len();
            return None;
        };

        let end = close + BLOCK_DELIMITER.len();
        self.current = end;
        Some((open, end))
    }

    /// Split `source[start..end]` into text and `$ ... $` segments.
    fn lex_inline(&mut self, start: usize, end: usize) {
        let mut text_start = start;
        let mut cursor = start;

        while let Some(open) = self.find_dollar(cursor, end) {
            let Some(close) = self.find_dollar(open + 1, end) else {
                break;
            };

            if close == open + 1 {
                // `$$` never opens an inline span; retry one byte on.
                cursor = open + 1;
                continue;
            }

            self.push_text(text_start, open);
            self.segments
                .push(MathSegment::inline(&self.source[open + 1..close]));

            text_start = close + 1;
            cursor = close + 1;
        }

        self.push_text(text_start, end);
    }

    fn push_text(&mut self, start: usize, end: usize) {
        if start < end {
            self.segments
                .push(MathSegment::text(&self.source[start..end]));
        }
    }

    #[inline]
    fn find_dollar(&self, from: usize, end: usize) -> Option<usize> {
        memchr(INLINE_DELIMITER, &self.source.as_bytes()[from..end]).map(|offset| from + offset)
    }

    #[inline]
    fn find_from(&self, from: usize, needle: &str) -> Option<usize> {
        memmem::find(&self.source.as_bytes()[from..], needle.as_bytes()).map(|offset| from + offset)
    }
}
