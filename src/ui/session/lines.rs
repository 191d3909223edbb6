//! Line reassembly for the inbound stream.

use std::collections::VecDeque;

/// Maximum number of completed lines kept for scrollback.
pub const LOG_CAPACITY: usize = 250;

/// Longest run of bytes held as a single line. Longer lines are broken up.
pub const MAX_LINE_BYTES: usize = 4096;

/// Result of feeding one chunk into a [`LineBuffer`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ingest {
    /// Lines completed by this chunk, oldest first.
    pub completed: Vec<String>,
}

impl Ingest {
    /// True when the log grew, i.e. the view should follow to the bottom.
    pub fn should_scroll(&self) -> bool {
        !self.completed.is_empty()
    }
}

/// Turns an arbitrarily split stream into complete display lines.
///
/// Holds the unterminated tail of the stream plus a FIFO log capped at
/// [`LOG_CAPACITY`] entries. The tail never contains `\n` and is at most
/// [`MAX_LINE_BYTES`] long between calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineBuffer {
    log: VecDeque<String>,
    tail: String,
    capacity: usize,
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::with_capacity(LOG_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            log: VecDeque::with_capacity(capacity),
            tail: String::new(),
            capacity,
        }
    }

    /// Append a chunk of inbound text.
    ///
    /// Every `\n` closes a line. Carriage returns are removed anywhere in a
    /// completed line and lines left empty are dropped. Text after the last
    /// `\n` stays in the tail until a later chunk completes it.
    ///
    /// A line longer than [`MAX_LINE_BYTES`] is broken into pieces of at
    /// most that size, cut on char boundaries counted from the start of the
    /// line, so the tail stays bounded and the result does not depend on
    /// where the stream was split. Only `chunk` is scanned for delimiters.
    pub fn ingest(&mut self, chunk: &str) -> Ingest {
        let mut completed = Vec::new();

        let mut rest = chunk;
        while let Some((head, after)) = rest.split_once('\n') {
            self.tail.push_str(head);
            let line = std::mem::take(&mut self.tail);
            let mut view = line.as_str();
            while let Some(piece) = split_overlong(&mut view) {
                keep(piece, &mut completed);
            }
            keep(view, &mut completed);
            rest = after;
        }

        self.tail.push_str(rest);
        if self.tail.len() > MAX_LINE_BYTES {
            let buffered = std::mem::take(&mut self.tail);
            let mut view = buffered.as_str();
            while let Some(piece) = split_overlong(&mut view) {
                keep(piece, &mut completed);
            }
            self.tail = view.to_string();
        }

        for line in &completed {
            self.push_line(line.clone());
        }

        Ingest { completed }
    }

    /// Append a line that did not come from the stream (e.g. an error notice).
    pub fn push_line(&mut self, line: String) {
        self.log.push_back(line);
        while self.log.len() > self.capacity {
            self.log.pop_front();
        }
    }

    /// Drop the in-progress partial line without logging it.
    pub fn discard_tail(&mut self) {
        self.tail.clear();
    }

    pub fn lines(&self) -> &VecDeque<String> {
        &self.log
    }

    pub fn tail(&self) -> &str {
        &self.tail
    }

    pub fn len(&self) -> usize {
        self.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Cut the first [`MAX_LINE_BYTES`] (or fewer, to stay on a char boundary)
/// off `text` when it is longer than that.
fn split_overlong<'a>(text: &mut &'a str) -> Option<&'a str> {
    if text.len() <= MAX_LINE_BYTES {
        return None;
    }
    let mut cut = MAX_LINE_BYTES;
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    let (head, rest) = text.split_at(cut);
    *text = rest;
    Some(head)
}

fn keep(raw: &str, completed: &mut Vec<String>) {
    let line = raw.replace('\r', "");
    if !line.is_empty() {
        completed.push(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(buffer: &LineBuffer) -> Vec<&str> {
        buffer.lines().iter().map(String::as_str).collect()
    }

    #[test]
    fn chunk_without_newline_only_grows_tail() {
        let mut buffer = LineBuffer::new();
        let ingest = buffer.ingest("partial");
        assert!(ingest.completed.is_empty());
        assert!(!ingest.should_scroll());
        assert_eq!(buffer.tail(), "partial");
        assert!(buffer.is_empty());
    }

    #[test]
    fn line_split_across_chunks_is_reassembled() {
        let mut buffer = LineBuffer::new();
        buffer.ingest("hello wor");
        let ingest = buffer.ingest("ld\nfoo\r\nbar");
        assert_eq!(ingest.completed, vec!["hello world", "foo"]);
        assert_eq!(buffer.tail(), "bar");
    }

    #[test]
    fn trailing_newline_leaves_empty_tail() {
        let mut buffer = LineBuffer::new();
        buffer.ingest("one\ntwo\n");
        assert_eq!(collect(&buffer), vec!["one", "two"]);
        assert_eq!(buffer.tail(), "");
    }

    #[test]
    fn blank_and_carriage_return_only_lines_are_dropped() {
        let mut buffer = LineBuffer::new();
        let ingest = buffer.ingest("\n\n\r\n\r\r\nx\n");
        assert_eq!(ingest.completed, vec!["x"]);
    }

    #[test]
    fn carriage_returns_stripped_mid_line() {
        let mut buffer = LineBuffer::new();
        let ingest = buffer.ingest("a\rb\r\n");
        assert_eq!(ingest.completed, vec!["ab"]);
    }

    #[test]
    fn crlf_straddling_chunk_boundary() {
        let mut buffer = LineBuffer::new();
        buffer.ingest("line\r");
        let ingest = buffer.ingest("\n");
        assert_eq!(ingest.completed, vec!["line"]);
    }

    #[test]
    fn log_is_capped_with_oldest_evicted_first() {
        let mut buffer = LineBuffer::new();
        for i in 0..300 {
            buffer.ingest(&format!("line {i}\n"));
            assert!(buffer.len() <= LOG_CAPACITY);
        }
        assert_eq!(buffer.len(), LOG_CAPACITY);
        assert_eq!(buffer.lines().front().map(String::as_str), Some("line 50"));
        assert_eq!(buffer.lines().back().map(String::as_str), Some("line 299"));
    }

    #[test]
    fn single_burst_larger_than_capacity_keeps_newest() {
        let mut buffer = LineBuffer::with_capacity(3);
        let ingest = buffer.ingest("a\nb\nc\nd\ne\n");
        assert_eq!(ingest.completed.len(), 5);
        assert_eq!(collect(&buffer), vec!["c", "d", "e"]);
    }

    #[test]
    fn push_line_respects_capacity() {
        let mut buffer = LineBuffer::with_capacity(2);
        buffer.push_line("a".into());
        buffer.push_line("b".into());
        buffer.push_line("c".into());
        assert_eq!(collect(&buffer), vec!["b", "c"]);
    }

    #[test]
    fn discard_tail_keeps_log() {
        let mut buffer = LineBuffer::new();
        buffer.ingest("done\nhalf");
        buffer.discard_tail();
        assert_eq!(buffer.tail(), "");
        assert_eq!(collect(&buffer), vec!["done"]);
    }

    #[test]
    fn endless_line_keeps_tail_bounded() {
        let mut buffer = LineBuffer::new();
        let chunk = "x".repeat(1024);
        for _ in 0..10_000 {
            buffer.ingest(&chunk);
            assert!(buffer.tail().len() <= MAX_LINE_BYTES);
        }
        assert_eq!(buffer.len(), LOG_CAPACITY);
        assert!(buffer
            .lines()
            .iter()
            .all(|line| line.len() == MAX_LINE_BYTES));
    }

    #[test]
    fn overlong_line_in_one_chunk_is_broken_up() {
        let mut buffer = LineBuffer::new();
        let text = format!("{}tail end\n", "a".repeat(MAX_LINE_BYTES));
        let ingest = buffer.ingest(&text);
        assert_eq!(ingest.completed.len(), 2);
        assert_eq!(ingest.completed[0].len(), MAX_LINE_BYTES);
        assert_eq!(ingest.completed[1], "tail end");
        assert_eq!(buffer.tail(), "");
    }

    #[test]
    fn line_of_exactly_max_bytes_stays_whole() {
        let mut buffer = LineBuffer::new();
        let line = "b".repeat(MAX_LINE_BYTES);
        buffer.ingest(&line);
        assert_eq!(buffer.tail().len(), MAX_LINE_BYTES);
        let ingest = buffer.ingest("\n");
        assert_eq!(ingest.completed, vec![line]);
    }

    #[test]
    fn overlong_cut_respects_char_boundaries_and_chunking() {
        // Two-byte chars put the cut point in the middle of a char.
        let stream = format!("a{}\nrest", "é".repeat(MAX_LINE_BYTES));
        let mut whole = LineBuffer::new();
        whole.ingest(&stream);

        for split in [1, 700, MAX_LINE_BYTES - 1, MAX_LINE_BYTES + 1, stream.len() - 3] {
            let split = (0..=split)
                .rev()
                .find(|i| stream.is_char_boundary(*i))
                .unwrap();
            let mut chunked = LineBuffer::new();
            chunked.ingest(&stream[..split]);
            chunked.ingest(&stream[split..]);
            assert_eq!(chunked.lines(), whole.lines(), "split at {split}");
            assert_eq!(chunked.tail(), whole.tail(), "split at {split}");
        }

        assert!(whole.lines().iter().all(|line| line.len() <= MAX_LINE_BYTES));
        assert_eq!(whole.tail(), "rest");
    }
}
